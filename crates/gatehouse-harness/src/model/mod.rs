//! Reference model for model-based testing.
//!
//! The model captures the rules of the session service as plainly as
//! possible: a map of users, two optional slots and a map of bets. It is the
//! oracle the real `System` is checked against.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Rules not structure: no registry trait, no actions, no session type
//! - Deterministic: Same inputs produce same outputs

pub mod operation;
mod world;

pub use operation::{
    Operation, OperationError, OperationResult, USER_SPACE, UserId, bet_description, password,
    user_id, username,
};
pub use world::{ModelUser, ModelWorld, ObservableState};
