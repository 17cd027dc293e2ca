use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::session::SessionController,
};

use super::utils::require_loaded;

fn metadata(name: &str, aliases: &[&str], description: &str) -> CommandMetadata {
    CommandMetadata {
        name: name.to_string(),
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        description: description.to_string(),
        args: Vec::new(),
        examples: vec![name.to_string()],
    }
}

/// Command to start or resume playback
pub struct PlayCommand;

#[async_trait]
impl Command for PlayCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        let snapshot = require_loaded(session)?;
        session.play();
        Ok(format!("Playing: {}", snapshot.track().title))
    }

    fn metadata(&self) -> CommandMetadata {
        metadata("play", &[], "Start or resume playback")
    }
}

/// Command to pause playback
pub struct PauseCommand;

#[async_trait]
impl Command for PauseCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        let snapshot = require_loaded(session)?;
        session.pause();
        Ok(format!("Paused: {}", snapshot.track().title))
    }

    fn metadata(&self) -> CommandMetadata {
        metadata("pause", &[], "Pause playback")
    }
}

/// Command to toggle between playing and paused
pub struct ToggleCommand;

#[async_trait]
impl Command for ToggleCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        let snapshot = require_loaded(session)?;
        session.play_pause();

        let action = if snapshot.is_playing() {
            "Paused"
        } else {
            "Playing"
        };
        Ok(format!("{action}: {}", snapshot.track().title))
    }

    fn metadata(&self) -> CommandMetadata {
        metadata("toggle", &["t", "play-pause"], "Toggle between play and pause")
    }
}

/// Command to skip to the next track
pub struct NextCommand;

#[async_trait]
impl Command for NextCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        let snapshot = require_loaded(session)?;
        if !snapshot.is_next_enabled() {
            return Err(CliError::SessionError("Already at the last track".to_string()));
        }

        session.next();
        Ok("Skipped to next track".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        metadata("next", &["n"], "Skip to the next track")
    }
}

/// Command to go back to the previous track
pub struct PreviousCommand;

#[async_trait]
impl Command for PreviousCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        require_loaded(session)?;
        session.previous();
        Ok("Went back".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        metadata(
            "prev",
            &["p", "previous"],
            "Go to the previous track (restarts the current one past 3 seconds)",
        )
    }
}

/// Command to play the track at a queue position
pub struct GotoCommand;

#[async_trait]
impl Command for GotoCommand {
    async fn execute(&self, session: &SessionController, args: &[String]) -> CommandResult {
        require_loaded(session)?;

        let position = args
            .first()
            .and_then(|arg| arg.parse::<usize>().ok())
            .filter(|position| *position >= 1)
            .ok_or_else(|| CliError::InvalidArgument {
                arg: "number".to_string(),
                reason: "Expected a queue position starting at 1".to_string(),
            })?;

        if !session.play_at_index(position - 1) {
            return Err(CliError::InvalidArgument {
                arg: "number".to_string(),
                reason: format!("Queue has only {} tracks", session.queue_len()),
            });
        }

        Ok(format!("Playing track {position}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "goto".to_string(),
            aliases: vec!["g".to_string()],
            description: "Play the track at a queue position".to_string(),
            args: vec![CommandArg {
                name: "number".to_string(),
                description: "Queue position as shown by 'queue'".to_string(),
                required: true,
                value_type: ArgType::Number,
            }],
            examples: vec!["goto 3".to_string()],
        }
    }
}
