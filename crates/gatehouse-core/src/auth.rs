//! Authorization service.
//!
//! Implements the registration, login and logout workflows on top of a
//! [`UserStorage`]. Like the rest of the core it is a pure state machine:
//! every call returns the actions the caller must execute, and nothing is
//! printed or stored outside the registry.
//!
//! ## Failure handling
//!
//! - `register` recovers `UsernameBusy` into a warning
//! - `login` / `logout` recover `StateError` (already in that state) into an
//!   informational line and still report the session change
//! - every other error is returned to the caller
//!
//! Each successful state change and each recovered error produces exactly one
//! [`AuthAction::Log`].

use crate::{
    action::AuthAction,
    error::AuthError,
    registry::UserStorage,
    user::{Role, User, UserState},
};

/// Registration, login and logout over a user registry.
#[derive(Debug, Clone, Default)]
pub struct AuthService<S: UserStorage> {
    storage: S,
}

impl<S: UserStorage> AuthService<S> {
    /// Create a service that owns `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read access to the registry.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write access to the registry, for callers that apply their own
    /// transitions (session eviction, bans).
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Register a new user in [`UserState::LoggedOut`].
    ///
    /// A taken username is reported as a warning and leaves the registry
    /// unchanged.
    pub fn register(&mut self, username: &str, password: &str, role: Role) -> Vec<AuthAction> {
        match self.storage.add(User::new(username, password, role)) {
            Ok(()) => vec![AuthAction::info(format!("New {role} {username} registered"))],
            Err(e) => vec![AuthAction::warn(format!("Registration failed: {e}"))],
        }
    }

    /// Verify credentials and start a session.
    ///
    /// On success the returned actions contain one [`AuthAction::LoggedIn`]
    /// followed by one log line. A user that is already logged in still gets
    /// the `LoggedIn` action; the repeated transition is only reported.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotExist` if the username is not registered
    /// - `AuthError::UserBanned` if the account is banned
    /// - `AuthError::UserDataIncorrect` if the password does not match
    pub fn login(&mut self, username: &str, password: &str) -> Result<Vec<AuthAction>, AuthError> {
        let user = self
            .storage
            .get(username)
            .ok_or_else(|| AuthError::UserNotExist { username: username.to_string() })?;

        if user.state() == UserState::Banned {
            return Err(AuthError::UserBanned { username: username.to_string() });
        }

        if !user.password_matches(password) {
            return Err(AuthError::UserDataIncorrect { username: username.to_string() });
        }

        let role = user.role();
        let log = match self.storage.change_state(username, UserState::LoggedIn) {
            Ok(()) => AuthAction::info(format!("User {username} logged in")),
            Err(e) if e.is_recoverable() => {
                AuthAction::info(format!("User {username} has already logged in"))
            },
            Err(e) => return Err(e),
        };

        Ok(vec![AuthAction::LoggedIn { username: username.to_string(), role }, log])
    }

    /// End a session.
    ///
    /// Logging out a user that is already logged out is reported and still
    /// yields the [`AuthAction::LoggedOut`] action.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotExist` if the username is not registered
    /// - `AuthError::UserBanned` if the account is banned
    pub fn logout(&mut self, username: &str) -> Result<Vec<AuthAction>, AuthError> {
        let log = match self.storage.change_state(username, UserState::LoggedOut) {
            Ok(()) => AuthAction::info(format!("User {username} logged out")),
            Err(e) if e.is_recoverable() => {
                AuthAction::info(format!("User {username} has already logged out"))
            },
            Err(e) => return Err(e),
        };

        Ok(vec![AuthAction::LoggedOut { username: username.to_string() }, log])
    }
}
