//! User records and the values attached to them.

use std::fmt;

/// Privilege class of a user.
///
/// Assigned at registration and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// May ban regular users and list every regular user. Cannot be banned.
    Admin,
    /// May place bets and list their own bets.
    RegularUser,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::RegularUser => write!(f, "regular user"),
        }
    }
}

/// Session state of a user.
///
/// # Transitions
///
/// ```text
/// LoggedOut ──login──▶ LoggedIn
/// LoggedIn ──logout──▶ LoggedOut
/// LoggedOut | LoggedIn ──ban──▶ Banned   (never for Role::Admin)
/// ```
///
/// `Banned` is terminal. A transition to the current state is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserState {
    /// Registered but not in a session. Initial state.
    #[default]
    LoggedOut,
    /// Credentials verified, session active.
    LoggedIn,
    /// Locked out by an admin.
    Banned,
}

impl fmt::Display for UserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged out"),
            Self::LoggedIn => write!(f, "logged in"),
            Self::Banned => write!(f, "banned"),
        }
    }
}

/// A registered identity.
///
/// Records are owned by the registry. Outside of it they are only ever seen
/// through shared references, so `state` can only change via
/// [`UserStorage::change_state`](crate::UserStorage::change_state).
///
/// # Security
///
/// - **Debug Redaction**: The `Debug` impl never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    password: String,
    state: UserState,
    role: Role,
}

impl User {
    /// Create a new user in the [`UserState::LoggedOut`] state.
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            state: UserState::LoggedOut,
            role,
        }
    }

    /// Unique key of this user.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current session state.
    pub fn state(&self) -> UserState {
        self.state
    }

    /// Privilege class.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns true if `password` matches the stored credential.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    pub(crate) fn set_state(&mut self, state: UserState) {
        self.state = state;
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("state", &self.state)
            .field("role", &self.role)
            .finish()
    }
}

/// A wager placed by a regular user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bet {
    /// Free-text description of the wager.
    pub description: String,
}

impl Bet {
    /// Create a bet with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_logged_out() {
        let user = User::new("alex", "123", Role::RegularUser);
        assert_eq!(user.state(), UserState::LoggedOut);
        assert_eq!(user.role(), Role::RegularUser);
    }

    #[test]
    fn password_comparison_is_exact() {
        let user = User::new("alex", "123", Role::RegularUser);
        assert!(user.password_matches("123"));
        assert!(!user.password_matches("123 "));
        assert!(!user.password_matches(""));
    }

    #[test]
    fn debug_redacts_password() {
        let user = User::new("alex", "hunter2", Role::Admin);
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("alex"));
    }
}
