//! Real system wrapper that mirrors `ModelWorld`'s interface.

use gatehouse_core::{AuthAction, AuthError, BetStorage, LogLevel, Role, System, UserStorage};

use crate::model::{
    ObservableState, Operation, OperationError, OperationResult, USER_SPACE, bet_description,
    password, user_id, username,
};

/// Drives a real [`System`] with model [`Operation`]s.
#[derive(Debug, Default)]
pub struct SystemWorld {
    system: System,
    log_lines: usize,
}

impl SystemWorld {
    /// Create a world around an empty in-memory system.
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped system.
    pub fn system(&self) -> &System {
        &self.system
    }

    /// Total number of `Log` actions produced so far.
    pub fn log_lines(&self) -> usize {
        self.log_lines
    }

    /// Apply an operation and return the result in model terms.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match op {
            Operation::Register { user, admin, password: seed } => {
                let role = if *admin { Role::Admin } else { Role::RegularUser };
                let actions = self.system.register(&username(*user), &password(*seed), role);
                let rejected = actions
                    .iter()
                    .any(|a| matches!(a, AuthAction::Log { level: LogLevel::Warn, .. }));
                self.count_logs(&actions);

                if rejected {
                    OperationResult::Error(OperationError::UsernameBusy)
                } else {
                    OperationResult::Ok
                }
            },
            Operation::Login { user, password: seed } => {
                let result = self.system.login(&username(*user), &password(*seed));
                self.settle(result)
            },
            Operation::Logout { user } => {
                let result = self.system.logout(&username(*user));
                self.settle(result)
            },
            Operation::Ban { target } => {
                let result = self.system.ban(&username(*target));
                self.settle(result)
            },
            Operation::PlaceBet { seed } => {
                let result = self.system.place_bet(&bet_description(*seed));
                self.settle(result)
            },
        }
    }

    /// Extract observable state in model terms.
    pub fn observable_state(&self) -> ObservableState {
        let registry = self.system.registry();
        let ledger = self.system.ledger();

        let mut users = Vec::new();
        let mut bets = Vec::new();
        for id in 0..USER_SPACE {
            let name = username(id);
            if let Some(user) = registry.get(&name) {
                users.push((id, user.role(), user.state()));
            }

            let placed = ledger.bets(&name);
            if !placed.is_empty() {
                bets.push((id, placed.iter().map(|b| b.description.clone()).collect()));
            }
        }

        let session = self.system.session();
        ObservableState {
            users,
            active_admin: session.current_admin().and_then(user_id),
            active_regular_user: session.current_regular_user().and_then(user_id),
            bets,
        }
    }

    fn settle(&mut self, result: Result<Vec<AuthAction>, AuthError>) -> OperationResult {
        match result {
            Ok(actions) => {
                self.count_logs(&actions);
                OperationResult::Ok
            },
            Err(e) => OperationResult::Error(OperationError::from(&e)),
        }
    }

    fn count_logs(&mut self, actions: &[AuthAction]) {
        self.log_lines += actions.iter().filter(|a| a.is_log()).count();
    }
}

