//! Operations for model-based testing.
//!
//! Operations are generated randomly by proptest (or decoded from fuzz input)
//! and applied to both the model and the real system.

use arbitrary::Arbitrary;
use gatehouse_core::AuthError;

/// User identifier. Mapped to a username by [`username`].
pub type UserId = u8;

/// Number of distinct users operations refer to.
///
/// Kept small so random sequences hit collisions, re-logins and bans often.
pub const USER_SPACE: u8 = 6;

/// Number of distinct passwords. A login guesses right roughly one time in
/// `PASSWORD_SPACE`.
const PASSWORD_SPACE: u8 = 3;

/// Username for a user ID.
pub fn username(id: UserId) -> String {
    format!("user{id}")
}

/// Inverse of [`username`].
pub fn user_id(username: &str) -> Option<UserId> {
    username.strip_prefix("user")?.parse().ok()
}

/// Password for a password seed.
pub fn password(seed: u8) -> String {
    format!("pw{}", seed % PASSWORD_SPACE)
}

/// Bet description for a bet seed.
pub fn bet_description(seed: u8) -> String {
    format!("bet #{seed}")
}

/// Operations that can be applied to the system.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Register a user.
    Register {
        /// User to register.
        user: UserId,
        /// Registers an admin instead of a regular user.
        admin: bool,
        /// Password seed.
        password: u8,
    },

    /// Log a user in.
    Login {
        /// User logging in.
        user: UserId,
        /// Password seed for the attempt.
        password: u8,
    },

    /// Log a user out.
    Logout {
        /// User logging out.
        user: UserId,
    },

    /// Active admin bans a user.
    Ban {
        /// User to ban.
        target: UserId,
    },

    /// Active regular user places a bet.
    PlaceBet {
        /// Bet seed.
        seed: u8,
    },
}

impl Operation {
    /// Map every user ID into `0..user_space`.
    pub fn clamp(self, user_space: u8) -> Self {
        let space = user_space.max(1);
        match self {
            Self::Register { user, admin, password } => {
                Self::Register { user: user % space, admin, password }
            },
            Self::Login { user, password } => Self::Login { user: user % space, password },
            Self::Logout { user } => Self::Logout { user: user % space },
            Self::Ban { target } => Self::Ban { target: target % space },
            other @ Self::PlaceBet { .. } => other,
        }
    }
}

/// Result of applying an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Operation succeeded.
    Ok,

    /// Operation failed (or, for registration, was rejected and recovered).
    Error(OperationError),
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Check if operation failed.
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

/// Error kinds, without the payloads the real errors carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    /// Username already registered.
    UsernameBusy,
    /// Wrong password.
    UserDataIncorrect,
    /// Unknown user.
    UserNotExist,
    /// User is banned.
    UserBanned,
    /// Tried to ban an admin.
    PermissionDenied,
    /// Redundant transition.
    StateError,
    /// No active session for the required role.
    NoActiveSession,
}

impl From<&AuthError> for OperationError {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::UsernameBusy { .. } => Self::UsernameBusy,
            AuthError::UserDataIncorrect { .. } => Self::UserDataIncorrect,
            AuthError::UserNotExist { .. } => Self::UserNotExist,
            AuthError::UserBanned { .. } => Self::UserBanned,
            AuthError::PermissionDenied { .. } => Self::PermissionDenied,
            AuthError::StateError { .. } => Self::StateError,
            AuthError::NoActiveSession { .. } => Self::NoActiveSession,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_round_trips_through_id() {
        assert_eq!(user_id(&username(4)), Some(4));
        assert_eq!(user_id("Alex"), None);
    }

    #[test]
    fn clamp_keeps_ids_in_space() {
        let op = Operation::Ban { target: 200 }.clamp(USER_SPACE);
        assert!(matches!(op, Operation::Ban { target } if target < USER_SPACE));
    }
}
