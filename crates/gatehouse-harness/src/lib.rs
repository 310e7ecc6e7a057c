//! Model-based testing harness for Gatehouse.
//!
//! The `model` module is a reference implementation of the registry,
//! authorization and session rules with none of the real types' structure.
//! [`SystemWorld`] drives the real [`gatehouse_core::System`] through the same
//! [`Operation`]s so the two can be compared step by step.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
mod system_world;

pub use model::{
    ModelUser, ModelWorld, ObservableState, Operation, OperationError, OperationResult, USER_SPACE,
    UserId, bet_description, password, user_id, username,
};
pub use system_world::SystemWorld;
