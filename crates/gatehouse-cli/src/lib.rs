//! Gatehouse command-line driver.
//!
//! Builds a [`System`] explicitly, runs a scripted session against it and
//! executes the actions the core returns:
//! - `Log` actions become `tracing` events at the matching level
//! - errors returned by commands are reported at `warn` and never abort the
//!   run
//!
//! ## Architecture
//!
//! ```text
//! gatehouse (bin)
//!   ├─ Args / DemoConfig  (clap configuration)
//!   ├─ tracing-subscriber (fmt layer + EnvFilter)
//!   └─ run_demo           (composition root + scripted session)
//!        └─ System        (gatehouse-core)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;

use gatehouse_core::{AuthAction, AuthError, LogLevel, Role, System};

pub use error::CliError;

/// Inputs of the scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Description of the bet the regular user places.
    pub bet: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self { bet: "To me or to u".to_string() }
    }
}

/// Execute actions returned by the core.
///
/// Session actions were already applied by [`System`]; they are traced at
/// debug level. Returns the number of log lines emitted.
pub fn execute_actions(actions: &[AuthAction]) -> usize {
    let mut lines = 0;
    for action in actions {
        match action {
            AuthAction::Log { level, message } => {
                lines += 1;
                match level {
                    LogLevel::Info => tracing::info!("{}", message),
                    LogLevel::Warn => tracing::warn!("{}", message),
                }
            },
            AuthAction::LoggedIn { username, role } => {
                tracing::debug!(%username, %role, "session started");
            },
            AuthAction::LoggedOut { username } => {
                tracing::debug!(%username, "session ended");
            },
        }
    }
    lines
}

/// Execute the actions of a successful command or report its error.
///
/// Returns true if the command succeeded.
pub fn settle(result: Result<Vec<AuthAction>, AuthError>) -> bool {
    match result {
        Ok(actions) => {
            execute_actions(&actions);
            true
        },
        Err(e) => {
            tracing::warn!("Error: {}", e);
            false
        },
    }
}

/// Run the scripted session and return the resulting system.
///
/// Two regular users and two admins register; Alex logs in, out and in
/// again, places a bet and lists it; an admin lists every regular user, bans
/// Alex and finally tries to ban another admin, which is denied.
pub fn run_demo(config: &DemoConfig) -> System {
    let mut system = System::new();

    execute_actions(&system.register("Alex", "123", Role::RegularUser));
    execute_actions(&system.register("Vasya", "234", Role::RegularUser));
    execute_actions(&system.register("Admin", "234", Role::Admin));
    execute_actions(&system.register("Admin2", "234", Role::Admin));

    settle(system.login("Alex", "123"));
    settle(system.logout("Alex"));
    settle(system.login("Alex", "123"));

    settle(system.place_bet(&config.bet));
    show_my_bets(&system);

    settle(system.login("Admin", "234"));
    show_regular_users(&system);

    settle(system.ban("Alex"));
    settle(system.ban("Admin2"));

    system
}

fn show_my_bets(system: &System) {
    let username = system.session().current_regular_user().unwrap_or_default();
    match system.my_bets() {
        Ok([]) => tracing::info!("Bets empty."),
        Ok(bets) => {
            tracing::info!("{} bets:", username);
            for bet in bets {
                tracing::info!("  {}", bet.description);
            }
        },
        Err(e) => tracing::warn!("Error: {}", e),
    }
}

fn show_regular_users(system: &System) {
    match system.list_regular_users() {
        Ok(users) => {
            tracing::info!("All regular users:");
            for user in users {
                tracing::info!("  Username: {}, state: {}", user.username, user.state);
            }
        },
        Err(e) => tracing::warn!("Error: {}", e),
    }
}
