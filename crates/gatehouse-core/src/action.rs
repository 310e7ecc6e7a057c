//! Actions returned by the core for the caller to execute.

use crate::user::Role;

/// Severity of a [`AuthAction::Log`] line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// State-changing success or a benign recovered error.
    Info,
    /// Recovered error the operator should notice.
    Warn,
}

/// Effects produced by authorization and session operations.
///
/// The core never performs I/O. A driver walks the returned actions in order:
/// it fills or clears session slots and emits one line per `Log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    /// Credentials matched. The caller should make this user the active
    /// session for `role`.
    LoggedIn {
        /// User that logged in.
        username: String,
        /// Role of the user, selects the session slot.
        role: Role,
    },

    /// Logout completed. The caller should clear the slot holding this user.
    LoggedOut {
        /// User that logged out.
        username: String,
    },

    /// Human-readable status line.
    Log {
        /// Severity.
        level: LogLevel,
        /// Message text.
        message: String,
    },
}

impl AuthAction {
    pub(crate) fn info(message: impl Into<String>) -> Self {
        Self::Log { level: LogLevel::Info, message: message.into() }
    }

    pub(crate) fn warn(message: impl Into<String>) -> Self {
        Self::Log { level: LogLevel::Warn, message: message.into() }
    }

    /// Returns true if this is a `Log` action.
    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_set_level() {
        assert_eq!(
            AuthAction::info("done"),
            AuthAction::Log { level: LogLevel::Info, message: "done".to_string() }
        );
        assert_eq!(
            AuthAction::warn("busy"),
            AuthAction::Log { level: LogLevel::Warn, message: "busy".to_string() }
        );
        assert!(AuthAction::info("done").is_log());
        assert!(!AuthAction::LoggedOut { username: "alex".to_string() }.is_log());
    }
}
