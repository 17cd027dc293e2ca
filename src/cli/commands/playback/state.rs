use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, formatting::format_state, types::CommandMetadata},
    services::session::SessionController,
};

/// Command to print the current playback state
pub struct StateCommand;

#[async_trait]
impl Command for StateCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        Ok(format!(
            "{} ({})",
            format_state(&session.state()),
            session.status()
        ))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "state".to_string(),
            aliases: vec!["status".to_string()],
            description: "Show the current playback state".to_string(),
            args: Vec::new(),
            examples: vec!["state".to_string()],
        }
    }
}
