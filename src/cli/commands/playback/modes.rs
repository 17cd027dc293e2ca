use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    services::{common::RepeatMode, session::SessionController},
};

use super::utils::{parse_switch, require_loaded};

/// Command to switch or toggle shuffle
pub struct ShuffleCommand;

#[async_trait]
impl Command for ShuffleCommand {
    async fn execute(&self, session: &SessionController, args: &[String]) -> CommandResult {
        require_loaded(session)?;

        let enabled = match args.first() {
            Some(value) => {
                let enabled = parse_switch("state", value)?;
                session.set_shuffle(enabled);
                enabled
            }
            None => session
                .toggle_shuffle()
                .ok_or_else(|| CliError::SessionError("Session is not active".to_string()))?,
        };

        Ok(format!("Shuffle {}", if enabled { "on" } else { "off" }))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "shuffle".to_string(),
            aliases: Vec::new(),
            description: "Toggle shuffle, or set it explicitly".to_string(),
            args: vec![CommandArg {
                name: "state".to_string(),
                description: "on or off; toggles when omitted".to_string(),
                required: false,
                value_type: ArgType::Boolean,
            }],
            examples: vec!["shuffle".to_string(), "shuffle on".to_string()],
        }
    }
}

/// Command to cycle or set the repeat mode
pub struct RepeatCommand;

#[async_trait]
impl Command for RepeatCommand {
    async fn execute(&self, session: &SessionController, args: &[String]) -> CommandResult {
        require_loaded(session)?;

        let mode = match args.first() {
            Some(value) => {
                let mode = match value.to_ascii_lowercase().as_str() {
                    "off" | "none" => RepeatMode::Off,
                    "one" | "track" => RepeatMode::One,
                    "all" | "queue" => RepeatMode::All,
                    other => {
                        return Err(CliError::InvalidArgument {
                            arg: "mode".to_string(),
                            reason: format!("Expected off, one or all, got '{other}'"),
                        });
                    }
                };
                session.set_repeat_mode(mode);
                mode
            }
            None => session
                .cycle_repeat_mode()
                .ok_or_else(|| CliError::SessionError("Session is not active".to_string()))?,
        };

        Ok(format!("Repeat {mode}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "repeat".to_string(),
            aliases: vec!["loop".to_string()],
            description: "Cycle the repeat mode (off, all, one), or set it explicitly".to_string(),
            args: vec![CommandArg {
                name: "mode".to_string(),
                description: "off, one or all; cycles when omitted".to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec!["repeat".to_string(), "repeat one".to_string()],
        }
    }
}
