//! Composition root.
//!
//! `System` owns the registry (through the [`AuthService`]), the ledger and
//! the session context, and is the only place where they meet. It applies the
//! session actions produced by login/logout and gates role-specific commands
//! on the active session for that role.
//!
//! Every mutating command takes `&mut self`. A multi-client port must put a
//! mutex around the whole `System`, since `add`, `change_state` and session
//! updates are read-modify-write sequences.

use crate::{
    action::AuthAction,
    auth::AuthService,
    capability::Capability,
    error::AuthError,
    ledger::{BetStorage, MemoryLedger},
    registry::{MemoryRegistry, UserStorage},
    session::SessionContext,
    user::{Bet, Role, User, UserState},
};

/// Display row for [`System::list_regular_users`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// Username.
    pub username: String,
    /// Current session state.
    pub state: UserState,
}

/// Registry, authorization, ledger and session wired together.
#[derive(Debug, Clone, Default)]
pub struct System<S: UserStorage = MemoryRegistry, L: BetStorage = MemoryLedger> {
    auth: AuthService<S>,
    ledger: L,
    session: SessionContext,
}

impl System {
    /// Create a system backed by in-memory storage.
    pub fn new() -> Self {
        Self::with_storage(MemoryRegistry::new(), MemoryLedger::new())
    }
}

impl<S: UserStorage, L: BetStorage> System<S, L> {
    /// Create a system over the given registry and ledger.
    pub fn with_storage(storage: S, ledger: L) -> Self {
        Self { auth: AuthService::new(storage), ledger, session: SessionContext::new() }
    }

    /// The user registry.
    pub fn registry(&self) -> &S {
        self.auth.storage()
    }

    /// The betting ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The active sessions.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Register a new user. See [`AuthService::register`].
    pub fn register(&mut self, username: &str, password: &str, role: Role) -> Vec<AuthAction> {
        self.auth.register(username, password, role)
    }

    /// Log in and make the user the active session for their role.
    ///
    /// A different user holding that slot is evicted; the eviction notice is
    /// appended to the returned actions.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`AuthService::login`]. The session is left
    /// untouched on error.
    pub fn login(&mut self, username: &str, password: &str) -> Result<Vec<AuthAction>, AuthError> {
        let actions = self.auth.login(username, password)?;
        self.apply_session(actions)
    }

    /// Log out and clear the session slot holding the user.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`AuthService::logout`].
    pub fn logout(&mut self, username: &str) -> Result<Vec<AuthAction>, AuthError> {
        let actions = self.auth.logout(username)?;
        self.apply_session(actions)
    }

    /// Ban `target` on behalf of the active admin.
    ///
    /// On success the target's session slot, if any, is cleared without
    /// eviction: the ban already ended their session.
    ///
    /// # Errors
    ///
    /// - `AuthError::NoActiveSession` if no admin is logged in
    /// - any error of [`UserStorage::change_state`], e.g. `PermissionDenied`
    ///   when the target is an admin
    pub fn ban(&mut self, target: &str) -> Result<Vec<AuthAction>, AuthError> {
        let admin = self.actor(Capability::BanUser)?.to_string();

        self.auth.storage_mut().change_state(target, UserState::Banned)?;
        self.session.clear_if_holding(target);

        Ok(vec![AuthAction::info(format!("Admin {admin} banned {target}"))])
    }

    /// All regular users and their state, sorted by username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoActiveSession` if no admin is logged in.
    pub fn list_regular_users(&self) -> Result<Vec<UserSummary>, AuthError> {
        self.actor(Capability::ListUsers)?;

        let mut users: Vec<UserSummary> = self
            .registry()
            .regular_users()
            .into_iter()
            .map(|u| UserSummary { username: u.username().to_string(), state: u.state() })
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(users)
    }

    /// Place a bet on behalf of the active regular user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoActiveSession` if no regular user is logged in.
    pub fn place_bet(&mut self, description: &str) -> Result<Vec<AuthAction>, AuthError> {
        let username = self.actor(Capability::PlaceBet)?.to_string();

        self.ledger.append_bet(&username, Bet::new(description));

        Ok(vec![AuthAction::info(format!("User {username} placed bet: {description}"))])
    }

    /// Bets of the active regular user, in the order they were placed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoActiveSession` if no regular user is logged in.
    pub fn my_bets(&self) -> Result<&[Bet], AuthError> {
        let username = self.actor(Capability::ListOwnBets)?;
        Ok(self.ledger.bets(username))
    }

    /// Username of the user allowed to exercise `capability` right now.
    ///
    /// The slot holder's registered role must grant the capability.
    fn actor(&self, capability: Capability) -> Result<&str, AuthError> {
        let role = capability.role();
        let username = self.session.current(role).ok_or(AuthError::NoActiveSession { role })?;

        match self.registry().get(username).map(User::role) {
            Some(held) if held.can(capability) => Ok(username),
            Some(_) => Err(AuthError::PermissionDenied { username: username.to_string() }),
            None => Err(AuthError::UserNotExist { username: username.to_string() }),
        }
    }

    /// Feed session actions into the context and append eviction notices.
    fn apply_session(&mut self, mut actions: Vec<AuthAction>) -> Result<Vec<AuthAction>, AuthError> {
        let mut notices = Vec::new();
        for action in &actions {
            notices.extend(self.session.apply(action, self.auth.storage_mut())?);
        }

        actions.extend(notices);
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> System {
        let mut system = System::new();
        system.register("alex", "123", Role::RegularUser);
        system.register("vasya", "234", Role::RegularUser);
        system.register("root", "234", Role::Admin);
        system
    }

    fn state(system: &System, username: &str) -> Option<UserState> {
        system.registry().get(username).map(User::state)
    }

    #[test]
    fn login_fills_slot_by_role() {
        let mut system = system();

        system.login("alex", "123").unwrap();
        system.login("root", "234").unwrap();

        assert_eq!(system.session().current_regular_user(), Some("alex"));
        assert_eq!(system.session().current_admin(), Some("root"));
    }

    #[test]
    fn failed_login_leaves_session_untouched() {
        let mut system = system();
        system.login("alex", "123").unwrap();

        assert!(system.login("vasya", "wrong").is_err());

        assert_eq!(system.session().current_regular_user(), Some("alex"));
        assert_eq!(state(&system, "alex"), Some(UserState::LoggedIn));
    }

    #[test]
    fn second_regular_login_evicts_first() {
        let mut system = system();
        system.login("alex", "123").unwrap();

        let actions = system.login("vasya", "234").unwrap();

        assert_eq!(actions.iter().filter(|a| a.is_log()).count(), 2);
        assert_eq!(system.session().current_regular_user(), Some("vasya"));
        assert_eq!(state(&system, "alex"), Some(UserState::LoggedOut));
    }

    #[test]
    fn logout_clears_slot() {
        let mut system = system();
        system.login("alex", "123").unwrap();

        system.logout("alex").unwrap();

        assert_eq!(system.session().current_regular_user(), None);
        assert_eq!(state(&system, "alex"), Some(UserState::LoggedOut));
    }

    #[test]
    fn role_commands_require_session() {
        let mut system = system();

        assert_eq!(system.ban("alex"), Err(AuthError::NoActiveSession { role: Role::Admin }));
        assert_eq!(
            system.place_bet("anything"),
            Err(AuthError::NoActiveSession { role: Role::RegularUser })
        );
        assert!(system.list_regular_users().is_err());
        assert!(system.my_bets().is_err());
    }

    #[test]
    fn admin_session_does_not_grant_betting() {
        let mut system = system();
        system.login("root", "234").unwrap();

        let result = system.place_bet("house always wins");

        assert_eq!(result, Err(AuthError::NoActiveSession { role: Role::RegularUser }));
        assert!(system.ledger().bets("root").is_empty());
    }

    #[test]
    fn ban_clears_target_session() {
        let mut system = system();
        system.login("alex", "123").unwrap();
        system.login("root", "234").unwrap();

        system.ban("alex").unwrap();

        assert_eq!(state(&system, "alex"), Some(UserState::Banned));
        assert_eq!(system.session().current_regular_user(), None);
        assert_eq!(system.session().current_admin(), Some("root"));
    }

    #[test]
    fn ban_of_other_user_keeps_active_session() {
        let mut system = system();
        system.login("alex", "123").unwrap();
        system.login("root", "234").unwrap();

        system.ban("vasya").unwrap();

        assert_eq!(system.session().current_regular_user(), Some("alex"));
        assert_eq!(state(&system, "vasya"), Some(UserState::Banned));
    }

    #[test]
    fn list_regular_users_is_sorted() {
        let mut system = system();
        system.login("vasya", "234").unwrap();
        system.login("root", "234").unwrap();

        let users = system.list_regular_users().unwrap();

        assert_eq!(
            users,
            vec![
                UserSummary { username: "alex".to_string(), state: UserState::LoggedOut },
                UserSummary { username: "vasya".to_string(), state: UserState::LoggedIn },
            ]
        );
    }

    #[test]
    fn bets_follow_active_user() {
        let mut system = system();
        system.login("alex", "123").unwrap();
        system.place_bet("red").unwrap();
        system.place_bet("black").unwrap();

        assert_eq!(system.my_bets().unwrap(), &[Bet::new("red"), Bet::new("black")]);

        system.login("vasya", "234").unwrap();
        assert!(system.my_bets().unwrap().is_empty());
    }

    #[test]
    fn role_commands_check_capability_of_slot_holder() {
        let mut system = system();
        system.login("alex", "123").unwrap();
        system.login("root", "234").unwrap();

        assert_eq!(system.actor(Capability::BanUser), Ok("root"));
        assert_eq!(system.actor(Capability::ListUsers), Ok("root"));
        assert_eq!(system.actor(Capability::PlaceBet), Ok("alex"));
        assert_eq!(system.actor(Capability::ListOwnBets), Ok("alex"));
    }
}
