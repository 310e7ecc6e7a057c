//! Active session tracking.
//!
//! At most one admin and one regular user are active at a time. Making a
//! different user active in an occupied slot evicts the previous holder: the
//! registry moves them to `LoggedOut` unless they are banned, since a ban
//! outranks session eviction.
//!
//! Slots hold usernames only. The registry stays the sole owner of the
//! records, so the session can never act on a stale copy.

use crate::{
    action::AuthAction,
    error::AuthError,
    registry::UserStorage,
    user::{Role, User, UserState},
};

/// The currently active admin and regular user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    current_admin: Option<String>,
    current_regular_user: Option<String>,
}

impl SessionContext {
    /// Create a context with both slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Username of the active admin.
    pub fn current_admin(&self) -> Option<&str> {
        self.current_admin.as_deref()
    }

    /// Username of the active regular user.
    pub fn current_regular_user(&self) -> Option<&str> {
        self.current_regular_user.as_deref()
    }

    /// Active user for `role`.
    pub fn current(&self, role: Role) -> Option<&str> {
        match role {
            Role::Admin => self.current_admin(),
            Role::RegularUser => self.current_regular_user(),
        }
    }

    /// Make `username` the active admin, evicting a different previous admin.
    ///
    /// # Errors
    ///
    /// See [`SessionContext::set`].
    pub fn set_admin(
        &mut self,
        username: &str,
        storage: &mut impl UserStorage,
    ) -> Result<Vec<AuthAction>, AuthError> {
        self.set(Role::Admin, username, storage)
    }

    /// Make `username` the active regular user, evicting a different previous
    /// holder.
    ///
    /// # Errors
    ///
    /// See [`SessionContext::set`].
    pub fn set_regular_user(
        &mut self,
        username: &str,
        storage: &mut impl UserStorage,
    ) -> Result<Vec<AuthAction>, AuthError> {
        self.set(Role::RegularUser, username, storage)
    }

    /// Make `username` the active user for `role`.
    ///
    /// The slot is left untouched on error.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotExist` if the registry does not know `username`
    /// - `AuthError::PermissionDenied` if the user does not have `role`
    /// - `AuthError::UserBanned` if the user is banned
    pub fn set(
        &mut self,
        role: Role,
        username: &str,
        storage: &mut impl UserStorage,
    ) -> Result<Vec<AuthAction>, AuthError> {
        let user = storage
            .get(username)
            .ok_or_else(|| AuthError::UserNotExist { username: username.to_string() })?;

        if user.role() != role {
            return Err(AuthError::PermissionDenied { username: username.to_string() });
        }

        if user.state() == UserState::Banned {
            return Err(AuthError::UserBanned { username: username.to_string() });
        }

        let slot = match role {
            Role::Admin => &mut self.current_admin,
            Role::RegularUser => &mut self.current_regular_user,
        };
        let previous = slot.replace(username.to_string());
        Ok(evict_if_replaced(previous, username, role, storage))
    }

    /// Empty the admin slot. No eviction side effect.
    pub fn clear_admin(&mut self) {
        self.current_admin = None;
    }

    /// Empty the regular user slot. No eviction side effect.
    pub fn clear_regular_user(&mut self) {
        self.current_regular_user = None;
    }

    /// Empty whichever slot holds `username`.
    ///
    /// Returns true if a slot was cleared.
    pub fn clear_if_holding(&mut self, username: &str) -> bool {
        if self.current_admin.as_deref() == Some(username) {
            self.clear_admin();
            return true;
        }

        if self.current_regular_user.as_deref() == Some(username) {
            self.clear_regular_user();
            return true;
        }

        false
    }

    /// Apply a session action produced by the authorization service.
    ///
    /// `LoggedIn` fills the slot for the user's role, `LoggedOut` clears the
    /// slot holding the user. `Log` actions are ignored. Returns the eviction
    /// notices, if any.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`SessionContext::set`] for `LoggedIn`.
    pub fn apply(
        &mut self,
        action: &AuthAction,
        storage: &mut impl UserStorage,
    ) -> Result<Vec<AuthAction>, AuthError> {
        match action {
            AuthAction::LoggedIn { username, role } => self.set(*role, username, storage),
            AuthAction::LoggedOut { username } => {
                self.clear_if_holding(username);
                Ok(Vec::new())
            },
            AuthAction::Log { .. } => Ok(Vec::new()),
        }
    }
}

/// Force the displaced slot holder out of their session.
fn evict_if_replaced(
    previous: Option<String>,
    incoming: &str,
    role: Role,
    storage: &mut impl UserStorage,
) -> Vec<AuthAction> {
    let Some(previous) = previous else {
        return Vec::new();
    };

    if previous == incoming {
        return Vec::new();
    }

    let state = storage.get(&previous).map(User::state);
    if state == Some(UserState::LoggedIn) {
        if let Err(e) = storage.change_state(&previous, UserState::LoggedOut) {
            return vec![AuthAction::warn(format!("Could not evict {previous}: {e}"))];
        }
    }

    let label = match role {
        Role::Admin => "Admin",
        Role::RegularUser => "User",
    };
    vec![AuthAction::info(format!("{label} {previous} logged out from system"))]
}
