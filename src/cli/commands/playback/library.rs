use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_queue,
        types::CommandMetadata,
    },
    services::session::SessionController,
};

use super::utils::require_loaded;

/// Command to delete the current track from the library
pub struct DeleteCommand;

#[async_trait]
impl Command for DeleteCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        let snapshot = require_loaded(session)?;
        let title = snapshot.track().title.clone();

        if !session.delete_current().await {
            return Err(CliError::SessionError(format!("Could not delete '{title}'")));
        }

        if session.state().is_empty() {
            return Ok(format!("Deleted '{title}'. The library is now empty"));
        }

        Ok(format!("Deleted '{title}'"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "delete".to_string(),
            aliases: vec!["rm".to_string()],
            description: "Delete the current track from the library".to_string(),
            args: Vec::new(),
            examples: vec!["delete".to_string()],
        }
    }
}

/// Command to reload the library
pub struct RescanCommand;

#[async_trait]
impl Command for RescanCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        let count = session.rescan().await;
        Ok(format!("Library scan completed. Items: {count}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "rescan".to_string(),
            aliases: Vec::new(),
            description: "Reload the library and rebuild the queue".to_string(),
            args: Vec::new(),
            examples: vec!["rescan".to_string()],
        }
    }
}

/// Command to list the queue
pub struct QueueCommand;

#[async_trait]
impl Command for QueueCommand {
    async fn execute(&self, session: &SessionController, _args: &[String]) -> CommandResult {
        let current = session.state().current_index();
        Ok(format_queue(&session.queue(), current))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "queue".to_string(),
            aliases: vec!["ls".to_string()],
            description: "List the queued tracks".to_string(),
            args: Vec::new(),
            examples: vec!["queue".to_string()],
        }
    }
}
