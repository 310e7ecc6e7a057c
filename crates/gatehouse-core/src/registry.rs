//! User registry abstraction.
//!
//! The registry is the single writer of user records. Callers read through
//! shared references and mutate only by key, so no component can hold a copy
//! that silently drifts from the stored record.
//!
//! # Invariants
//!
//! - Usernames are unique
//! - A user's role never changes after `add`
//! - `change_state` never performs a same-state transition
//! - Admins are never `Banned`
//! - `Banned` is terminal

use std::collections::HashMap;

use crate::{
    error::AuthError,
    user::{Role, User, UserState},
};

/// Storage for user records.
///
/// Implementations must enforce every rule documented on the methods; the
/// authorization service relies on them instead of re-checking.
pub trait UserStorage {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UsernameBusy` if the username is already present.
    fn add(&mut self, user: User) -> Result<(), AuthError>;

    /// Look up a user. `None` if not registered.
    fn get(&self, username: &str) -> Option<&User>;

    /// Move a user to `state`.
    ///
    /// # Errors
    ///
    /// - `AuthError::UserNotExist` if the username is absent
    /// - `AuthError::PermissionDenied` if banning an admin
    /// - `AuthError::StateError` if the user is already in `state`
    /// - `AuthError::UserBanned` if the user is banned and `state` is not
    fn change_state(&mut self, username: &str, state: UserState) -> Result<(), AuthError>;

    /// All users with [`Role::RegularUser`], in no particular order.
    fn regular_users(&self) -> Vec<&User>;

    /// Number of registered users.
    fn len(&self) -> usize;

    /// Returns true if no user is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory registry backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    users: HashMap<String, User>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStorage for MemoryRegistry {
    fn add(&mut self, user: User) -> Result<(), AuthError> {
        if self.users.contains_key(user.username()) {
            return Err(AuthError::UsernameBusy { username: user.username().to_string() });
        }

        self.users.insert(user.username().to_string(), user);
        Ok(())
    }

    fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    fn change_state(&mut self, username: &str, state: UserState) -> Result<(), AuthError> {
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| AuthError::UserNotExist { username: username.to_string() })?;

        if user.role() == Role::Admin && state == UserState::Banned {
            return Err(AuthError::PermissionDenied { username: username.to_string() });
        }

        if user.state() == state {
            return Err(AuthError::StateError { username: username.to_string(), state });
        }

        if user.state() == UserState::Banned {
            return Err(AuthError::UserBanned { username: username.to_string() });
        }

        user.set_state(state);
        Ok(())
    }

    fn regular_users(&self) -> Vec<&User> {
        self.users.values().filter(|u| u.role() == Role::RegularUser).collect()
    }

    fn len(&self) -> usize {
        self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(users: &[(&str, Role)]) -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        for (name, role) in users {
            registry.add(User::new(*name, "pw", *role)).unwrap();
        }
        registry
    }

    #[test]
    fn add_rejects_duplicate_username() {
        let mut registry = registry_with(&[("alex", Role::RegularUser)]);

        let result = registry.add(User::new("alex", "other", Role::Admin));

        assert_eq!(result, Err(AuthError::UsernameBusy { username: "alex".to_string() }));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("alex").map(User::role), Some(Role::RegularUser));
    }

    #[test]
    fn get_missing_user_returns_none() {
        let registry = MemoryRegistry::new();
        assert!(registry.get("nobody").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn change_state_missing_user_fails() {
        let mut registry = MemoryRegistry::new();
        let result = registry.change_state("ghost", UserState::LoggedIn);
        assert!(matches!(result, Err(AuthError::UserNotExist { .. })));
    }

    #[test]
    fn change_state_rejects_same_state() {
        let mut registry = registry_with(&[("alex", Role::RegularUser)]);

        let result = registry.change_state("alex", UserState::LoggedOut);

        assert_eq!(
            result,
            Err(AuthError::StateError { username: "alex".to_string(), state: UserState::LoggedOut })
        );
    }

    #[test]
    fn admin_cannot_be_banned() {
        let mut registry = registry_with(&[("root", Role::Admin)]);
        registry.change_state("root", UserState::LoggedIn).unwrap();

        let result = registry.change_state("root", UserState::Banned);

        assert!(matches!(result, Err(AuthError::PermissionDenied { .. })));
        assert_eq!(registry.get("root").map(User::state), Some(UserState::LoggedIn));
    }

    #[test]
    fn permission_check_precedes_state_check() {
        let mut registry = registry_with(&[("root", Role::Admin)]);

        // Admin is LoggedOut, ban is still denied rather than reported as a
        // state problem.
        let result = registry.change_state("root", UserState::Banned);
        assert!(matches!(result, Err(AuthError::PermissionDenied { .. })));
    }

    #[test]
    fn regular_user_walks_the_state_machine() {
        let mut registry = registry_with(&[("alex", Role::RegularUser)]);

        registry.change_state("alex", UserState::LoggedIn).unwrap();
        registry.change_state("alex", UserState::LoggedOut).unwrap();
        registry.change_state("alex", UserState::Banned).unwrap();

        assert_eq!(registry.get("alex").map(User::state), Some(UserState::Banned));
    }

    #[test]
    fn banned_is_terminal() {
        let mut registry = registry_with(&[("alex", Role::RegularUser)]);
        registry.change_state("alex", UserState::Banned).unwrap();

        let logout = registry.change_state("alex", UserState::LoggedOut);
        let login = registry.change_state("alex", UserState::LoggedIn);
        let again = registry.change_state("alex", UserState::Banned);

        assert!(matches!(logout, Err(AuthError::UserBanned { .. })));
        assert!(matches!(login, Err(AuthError::UserBanned { .. })));
        assert!(matches!(again, Err(AuthError::StateError { .. })));
        assert_eq!(registry.get("alex").map(User::state), Some(UserState::Banned));
    }

    #[test]
    fn regular_users_excludes_admins() {
        let registry = registry_with(&[
            ("alex", Role::RegularUser),
            ("vasya", Role::RegularUser),
            ("root", Role::Admin),
        ]);

        let mut names: Vec<_> = registry.regular_users().into_iter().map(User::username).collect();
        names.sort_unstable();

        assert_eq!(names, vec!["alex", "vasya"]);
    }
}
