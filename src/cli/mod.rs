//! Command-line interface for an interactive playback session.
//!
//! Input lines are dispatched to commands registered by name; each command
//! drives the [`SessionController`](crate::services::session::SessionController)
//! and reports what it did.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::{CliService, LineOutcome};
pub use types::{CliError, Command, CommandResult};
