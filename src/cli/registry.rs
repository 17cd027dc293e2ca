use std::collections::HashMap;

use super::{
    CliError, Command, CommandResult,
    commands::playback,
    formatting::{format_command, format_description, format_header, format_usage},
    types::CommandMetadata,
};
use crate::services::session::SessionController;

/// Registry of interactive session commands.
///
/// Commands are looked up by name or alias; help text and argument count
/// checks come from each command's metadata.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    aliases: HashMap<String, String>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Registry without any commands.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Creates a registry holding every built-in command.
    pub fn with_all_commands() -> Self {
        let mut registry = Self::new();
        registry.register_all_commands();
        registry
    }

    /// Registers a command under its name and aliases.
    ///
    /// A command with the same name replaces the previous one.
    pub fn register_command(&mut self, command: Box<dyn Command>) {
        let metadata = command.metadata();

        for alias in metadata.aliases {
            self.aliases.insert(alias, metadata.name.clone());
        }
        self.commands.insert(metadata.name, command);
    }

    /// Executes a command by name or alias.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` for unknown names and
    /// `CliError::InvalidArguments` when the argument count does not match
    /// the command's metadata. Other errors come from the command itself.
    pub async fn execute(
        &self,
        session: &SessionController,
        command_name: &str,
        args: &[String],
    ) -> CommandResult {
        let command = self.find(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!("'{command_name}' (try 'help')"))
        })?;

        Self::validate_args(&command.metadata(), args)?;

        command.execute(session, args).await
    }

    /// Lists all registered command names, sorted alphabetically.
    pub fn list_commands(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Help text for every registered command.
    pub fn help(&self) -> String {
        let mut lines = vec![format_header("Commands:")];

        for name in self.list_commands() {
            let Some(command) = self.commands.get(&name) else {
                continue;
            };
            let metadata = command.metadata();

            let args: Vec<String> = metadata
                .args
                .iter()
                .map(|arg| {
                    if arg.required {
                        format!("<{}>", arg.name)
                    } else {
                        format!("[{}]", arg.name)
                    }
                })
                .collect();

            lines.push(format!(
                "  {} {}  {}",
                format_command(&metadata.name),
                format_usage(&args.join(" ")),
                format_description(&metadata.description)
            ));
        }

        lines.push(format!(
            "  {}  {}",
            format_command("quit"),
            format_description("Leave the session")
        ));

        lines.join("\n")
    }

    fn find(&self, name: &str) -> Option<&dyn Command> {
        let name = self.aliases.get(name).map_or(name, String::as_str);
        self.commands.get(name).map(|command| &**command)
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let accepted = metadata.args.iter().filter(|arg| arg.required).count()
            ..=metadata.args.len();

        if accepted.contains(&args.len()) {
            return Ok(());
        }

        let expected = if accepted.start() == accepted.end() {
            accepted.start().to_string()
        } else {
            format!("{} to {}", accepted.start(), accepted.end())
        };

        Err(CliError::InvalidArguments(format!(
            "'{}' takes {expected} argument(s), got {}",
            metadata.name,
            args.len()
        )))
    }

    /// Adds the playback command set.
    pub fn register_all_commands(&mut self) {
        playback::register_commands(self);
    }
}
