//! Role-specific commands.

use crate::user::Role;

/// Commands that only one role may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Move another user to `Banned`.
    BanUser,
    /// List every regular user with their state.
    ListUsers,
    /// Append a bet to one's own ledger.
    PlaceBet,
    /// Read one's own bets.
    ListOwnBets,
}

impl Capability {
    /// The role that holds this capability.
    pub fn role(self) -> Role {
        match self {
            Self::BanUser | Self::ListUsers => Role::Admin,
            Self::PlaceBet | Self::ListOwnBets => Role::RegularUser,
        }
    }
}

impl Role {
    /// Returns true if users of this role may exercise `capability`.
    pub fn can(self, capability: Capability) -> bool {
        capability.role() == self
    }
}
