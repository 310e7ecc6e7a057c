//! Fuzz target for the registry / authorization / session state machine
//!
//! Prevent privilege and session invariants from being broken by any
//! sequence of commands.
//!
//! # Strategy
//!
//! - Operation sequences: Arbitrary registrations, logins (right and wrong
//!   passwords), logouts, bans and bets
//! - Collisions: A small user space makes duplicate names, re-logins and
//!   slot replacement common
//! - Differential: Every step is replayed on the reference model
//!
//! # Invariants
//!
//! - Real system and model agree on every result and observable state
//! - Admins are NEVER `Banned`
//! - `Banned` is terminal
//! - A session slot only ever holds a `LoggedIn` user of the slot's role
//! - NEVER panic on any input

#![no_main]

use gatehouse_core::{Role, UserState};
use gatehouse_harness::{ModelWorld, Operation, SystemWorld, USER_SPACE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|ops: Vec<Operation>| {
    let mut model = ModelWorld::new();
    let mut real = SystemWorld::new();
    let mut banned = Vec::new();

    for op in ops.into_iter().take(256) {
        let op = op.clamp(USER_SPACE);

        let model_result = model.apply(&op);
        let real_result = real.apply(&op);
        assert_eq!(model_result, real_result, "result divergence on {op:?}");

        let state = real.observable_state();
        assert_eq!(state, model.observable_state(), "state divergence on {op:?}");

        for (id, role, user_state) in &state.users {
            if *role == Role::Admin {
                assert_ne!(*user_state, UserState::Banned, "admin {id} was banned");
            }
            if *user_state == UserState::Banned && !banned.contains(id) {
                banned.push(*id);
            }
        }

        for id in &banned {
            assert!(
                state.users.iter().any(|(uid, _, s)| uid == id && *s == UserState::Banned),
                "user {id} left the banned state"
            );
        }

        for (slot, role) in [(state.active_admin, Role::Admin), (state.active_regular_user, Role::RegularUser)] {
            if let Some(holder) = slot {
                assert!(
                    state
                        .users
                        .iter()
                        .any(|(uid, r, s)| *uid == holder && *r == role && *s == UserState::LoggedIn),
                    "slot for {role} holds {holder} who is not logged in"
                );
            }
        }
    }
});
