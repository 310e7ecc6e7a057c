//! Authorization error types.

use thiserror::Error;

use crate::user::{Role, UserState};

/// Errors from registry, authorization and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Registration collided with an existing username.
    #[error("username {username} is busy")]
    UsernameBusy {
        /// The username that is already taken.
        username: String,
    },

    /// Login credentials did not match.
    #[error("incorrect credentials for {username}")]
    UserDataIncorrect {
        /// The username that failed verification.
        username: String,
    },

    /// No user is registered under this name.
    #[error("user {username} does not exist")]
    UserNotExist {
        /// The username that was looked up.
        username: String,
    },

    /// Login attempted against a banned account.
    #[error("user {username} is banned")]
    UserBanned {
        /// The banned username.
        username: String,
    },

    /// Attempt to ban an admin.
    #[error("permission denied: {username} cannot be banned")]
    PermissionDenied {
        /// The protected username.
        username: String,
    },

    /// Transition to the state the user is already in.
    #[error("user {username} is already {state}")]
    StateError {
        /// The user whose state was not changed.
        username: String,
        /// The state the user is already in.
        state: UserState,
    },

    /// A role-gated command was issued with no active session for that role.
    #[error("no {role} is logged in")]
    NoActiveSession {
        /// The role whose session slot is empty.
        role: Role,
    },
}

impl AuthError {
    /// Returns true if login/logout report this error instead of failing.
    ///
    /// Repeating a login or logout is expected operator behaviour. Every other
    /// kind is a contract violation and must reach the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::StateError { .. } => true,

            Self::UsernameBusy { .. }
            | Self::UserDataIncorrect { .. }
            | Self::UserNotExist { .. }
            | Self::UserBanned { .. }
            | Self::PermissionDenied { .. }
            | Self::NoActiveSession { .. } => false,
        }
    }
}
