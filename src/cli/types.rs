use async_trait::async_trait;
use thiserror::Error;

use crate::services::session::SessionController;

/// Failure of a single interactive command. The session keeps running.
#[derive(Error, Debug)]
pub enum CliError {
    /// Unknown name or alias
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Too few or too many arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Argument value rejected
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Nothing loaded, or the session is not ready
    #[error("Session error: {0}")]
    SessionError(String),

    /// Reading input or writing output failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Text to print, or the reason the command failed.
pub type CommandResult = Result<String, CliError>;

/// One positional argument in a command's usage line.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// Placeholder shown in help, e.g. `position`
    pub name: String,

    /// Accepted forms
    pub description: String,

    /// Required arguments are shown as `<name>`, optional ones as `[name]`
    pub required: bool,

    /// Expected value kind
    pub value_type: ArgType,
}

/// Kind of value an argument expects.
#[derive(Debug, Clone)]
pub enum ArgType {
    /// Free-form text
    String,

    /// Integer
    Number,

    /// `on` / `off`
    Boolean,
}

/// Name, aliases, usage and examples of a command.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// Primary name
    pub name: String,

    /// Alternative names
    pub aliases: Vec<String>,

    /// One-line summary for help
    pub description: String,

    /// Positional arguments in order
    pub args: Vec<CommandArg>,

    /// Example lines for help
    pub examples: Vec<String>,
}

/// A command of the interactive session.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command against `session`.
    ///
    /// The registry has already validated the argument count against the
    /// command's metadata.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values or when the session
    /// cannot serve the command.
    async fn execute(&self, session: &SessionController, args: &[String]) -> CommandResult;

    /// Static description used by the registry.
    fn metadata(&self) -> CommandMetadata;
}
