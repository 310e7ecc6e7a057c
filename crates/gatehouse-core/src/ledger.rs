//! Append-only betting ledger.

use std::collections::HashMap;

use crate::user::Bet;

/// Storage for bets keyed by username.
///
/// Bets are only ever appended. The ledger does not consult the registry;
/// callers decide who is allowed to place a bet.
pub trait BetStorage {
    /// Append a bet to the user's list, creating the list on first use.
    fn append_bet(&mut self, username: &str, bet: Bet);

    /// All bets placed by `username`, in insertion order.
    ///
    /// A user without bets yields an empty slice.
    fn bets(&self, username: &str) -> &[Bet];
}

/// In-memory ledger backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    bets: HashMap<String, Vec<Bet>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl BetStorage for MemoryLedger {
    fn append_bet(&mut self, username: &str, bet: Bet) {
        self.bets.entry(username.to_string()).or_default().push(bet);
    }

    fn bets(&self, username: &str) -> &[Bet] {
        self.bets.get(username).map(Vec::as_slice).unwrap_or_default()
    }
}
