//! Interactive playback session commands

mod library;
mod modes;
mod seek;
mod state;
mod transport;
mod utils;

pub use library::{DeleteCommand, QueueCommand, RescanCommand};
pub use modes::{RepeatCommand, ShuffleCommand};
pub use seek::SeekCommand;
pub use state::StateCommand;
pub use transport::{
    GotoCommand, NextCommand, PauseCommand, PlayCommand, PreviousCommand, ToggleCommand,
};

use crate::cli::CommandRegistry;

/// Registers all playback commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register_command(Box::new(PlayCommand));
    registry.register_command(Box::new(PauseCommand));
    registry.register_command(Box::new(ToggleCommand));
    registry.register_command(Box::new(NextCommand));
    registry.register_command(Box::new(PreviousCommand));
    registry.register_command(Box::new(GotoCommand));
    registry.register_command(Box::new(SeekCommand));
    registry.register_command(Box::new(ShuffleCommand));
    registry.register_command(Box::new(RepeatCommand));
    registry.register_command(Box::new(DeleteCommand));
    registry.register_command(Box::new(RescanCommand));
    registry.register_command(Box::new(QueueCommand));
    registry.register_command(Box::new(StateCommand));
}
