//! Model world - the reference implementation.

use std::collections::BTreeMap;

use gatehouse_core::{Role, UserState};

use super::operation::{
    Operation, OperationError, OperationResult, UserId, bet_description, password,
};

/// A user as the model sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelUser {
    /// Role chosen at registration.
    pub role: Role,
    /// Password chosen at registration.
    pub password: String,
    /// Session state.
    pub state: UserState,
}

/// Observable state for oracle comparison.
///
/// Everything is keyed by [`UserId`] and sorted, so the comparison does not
/// depend on hash map iteration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Registered users with role and state.
    pub users: Vec<(UserId, Role, UserState)>,
    /// Active admin.
    pub active_admin: Option<UserId>,
    /// Active regular user.
    pub active_regular_user: Option<UserId>,
    /// Non-empty bet lists, in placement order.
    pub bets: Vec<(UserId, Vec<String>)>,
}

/// Model world.
#[derive(Debug, Clone, Default)]
pub struct ModelWorld {
    users: BTreeMap<UserId, ModelUser>,
    active_admin: Option<UserId>,
    active_regular_user: Option<UserId>,
    bets: BTreeMap<UserId, Vec<String>>,
}

impl ModelWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a user.
    pub fn user(&self, id: UserId) -> Option<&ModelUser> {
        self.users.get(&id)
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        let result = match op {
            Operation::Register { user, admin, password: seed } => {
                let role = if *admin { Role::Admin } else { Role::RegularUser };
                self.register(*user, role, password(*seed))
            },
            Operation::Login { user, password: seed } => self.login(*user, &password(*seed)),
            Operation::Logout { user } => self.logout(*user),
            Operation::Ban { target } => self.ban(*target),
            Operation::PlaceBet { seed } => self.place_bet(bet_description(*seed)),
        };

        match result {
            Ok(()) => OperationResult::Ok,
            Err(e) => OperationResult::Error(e),
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            users: self.users.iter().map(|(id, u)| (*id, u.role, u.state)).collect(),
            active_admin: self.active_admin,
            active_regular_user: self.active_regular_user,
            bets: self.bets.iter().map(|(id, b)| (*id, b.clone())).collect(),
        }
    }

    fn register(&mut self, id: UserId, role: Role, password: String) -> Result<(), OperationError> {
        if self.users.contains_key(&id) {
            return Err(OperationError::UsernameBusy);
        }

        self.users.insert(id, ModelUser { role, password, state: UserState::LoggedOut });
        Ok(())
    }

    fn login(&mut self, id: UserId, password: &str) -> Result<(), OperationError> {
        let user = self.users.get_mut(&id).ok_or(OperationError::UserNotExist)?;

        if user.state == UserState::Banned {
            return Err(OperationError::UserBanned);
        }
        if user.password != password {
            return Err(OperationError::UserDataIncorrect);
        }

        user.state = UserState::LoggedIn;
        let role = user.role;

        let slot = match role {
            Role::Admin => &mut self.active_admin,
            Role::RegularUser => &mut self.active_regular_user,
        };
        let previous = slot.replace(id);

        if let Some(previous) = previous.filter(|p| *p != id) {
            if let Some(evicted) = self.users.get_mut(&previous) {
                if evicted.state == UserState::LoggedIn {
                    evicted.state = UserState::LoggedOut;
                }
            }
        }

        Ok(())
    }

    fn logout(&mut self, id: UserId) -> Result<(), OperationError> {
        let user = self.users.get_mut(&id).ok_or(OperationError::UserNotExist)?;

        if user.state == UserState::Banned {
            return Err(OperationError::UserBanned);
        }

        user.state = UserState::LoggedOut;
        self.release_slot(id);
        Ok(())
    }

    fn ban(&mut self, target: UserId) -> Result<(), OperationError> {
        if self.active_admin.is_none() {
            return Err(OperationError::NoActiveSession);
        }

        let user = self.users.get_mut(&target).ok_or(OperationError::UserNotExist)?;

        if user.role == Role::Admin {
            return Err(OperationError::PermissionDenied);
        }
        if user.state == UserState::Banned {
            return Err(OperationError::StateError);
        }

        user.state = UserState::Banned;
        self.release_slot(target);
        Ok(())
    }

    fn place_bet(&mut self, description: String) -> Result<(), OperationError> {
        let id = self.active_regular_user.ok_or(OperationError::NoActiveSession)?;
        self.bets.entry(id).or_default().push(description);
        Ok(())
    }

    fn release_slot(&mut self, id: UserId) {
        if self.active_admin == Some(id) {
            self.active_admin = None;
        }
        if self.active_regular_user == Some(id) {
            self.active_regular_user = None;
        }
    }
}
