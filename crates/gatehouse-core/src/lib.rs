//! Gatehouse Core
//!
//! Action-based user registry, authorization service and session tracking
//! with an attached append-only betting ledger.
//!
//! # Architecture
//!
//! ```text
//! System                 (composition root, role-gated commands)
//!   ├─ AuthService       (register / login / logout workflows)
//!   │    └─ UserStorage  (registry: sole owner of user records)
//!   ├─ SessionContext    (active admin + active regular user)
//!   └─ BetStorage        (append-only ledger keyed by username)
//! ```
//!
//! Nothing in this crate performs I/O. Operations return [`AuthAction`]s and
//! the caller decides how to execute them (log lines, session updates).
//!
//! # Components
//!
//! - [`MemoryRegistry`]: in-memory [`UserStorage`]
//! - [`MemoryLedger`]: in-memory [`BetStorage`]
//! - [`AuthService`]: authorization workflows over any [`UserStorage`]
//! - [`SessionContext`]: session slots with forced eviction on replacement
//! - [`System`]: wires all of the above together

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod auth;
mod capability;
mod error;
pub mod ledger;
pub mod registry;
mod session;
mod system;
mod user;

pub use action::{AuthAction, LogLevel};
pub use auth::AuthService;
pub use capability::Capability;
pub use error::AuthError;
pub use ledger::{BetStorage, MemoryLedger};
pub use registry::{MemoryRegistry, UserStorage};
pub use session::SessionContext;
pub use system::{System, UserSummary};
pub use user::{Bet, Role, User, UserState};
