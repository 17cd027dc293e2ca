use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, instrument};

use super::{
    CommandRegistry,
    formatting::{format_error, format_state},
    types::CommandResult,
};
use crate::services::session::{PlayerState, SessionController};

/// Result of one interactive input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Text to print
    Output(String),
    /// Nothing to do (blank line)
    Nothing,
    /// The user asked to leave
    Quit,
}

/// High-level service that turns input lines into session commands.
pub struct CliService {
    registry: CommandRegistry,
}

impl Default for CliService {
    fn default() -> Self {
        Self::new()
    }
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    pub fn new() -> Self {
        CliService {
            registry: CommandRegistry::with_all_commands(),
        }
    }

    /// Executes one input line against `session`.
    ///
    /// The first word selects the command, the rest are its arguments.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` for unknown commands, otherwise
    /// whatever the command reports.
    pub async fn execute_line(
        &self,
        session: &SessionController,
        line: &str,
    ) -> Result<LineOutcome, super::CliError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(LineOutcome::Nothing);
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        match command {
            "quit" | "exit" | "q" => Ok(LineOutcome::Quit),
            "help" | "?" => Ok(LineOutcome::Output(self.registry.help())),
            _ => self.execute(session, command, &args).await.map(LineOutcome::Output),
        }
    }

    async fn execute(
        &self,
        session: &SessionController,
        command: &str,
        args: &[String],
    ) -> CommandResult {
        self.registry.execute(session, command, args).await
    }

    /// Lists all available command names.
    pub fn list_all(&self) -> Vec<String> {
        self.registry.list_commands()
    }

    /// Reads commands from `input` until it ends or the user quits.
    ///
    /// Every state change other than a position tick is printed as it is
    /// published.
    ///
    /// # Errors
    /// Returns an error if reading `input` fails
    #[instrument(skip_all)]
    pub async fn run_interactive<R>(
        &self,
        session: &SessionController,
        input: R,
    ) -> Result<(), super::CliError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut states = Box::pin(session.subscribe());
        let mut last_shown = session.state();

        println!("{}", format_state(&last_shown));

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        break;
                    };

                    match self.execute_line(session, &line).await {
                        Ok(LineOutcome::Output(output)) => {
                            if !output.trim().is_empty() {
                                println!("{output}");
                            }
                        }
                        Ok(LineOutcome::Nothing) => {}
                        Ok(LineOutcome::Quit) => break,
                        Err(e) => eprintln!("{}", format_error(&e.to_string())),
                    }
                }

                Some(state) = states.next() => {
                    if !is_position_tick(&last_shown, &state) {
                        println!("{}", format_state(&state));
                    }
                    last_shown = state;
                }
            }
        }

        Ok(())
    }
}

fn is_position_tick(previous: &PlayerState, next: &PlayerState) -> bool {
    match (previous.snapshot(), next.snapshot()) {
        (Some(previous), Some(next)) => {
            previous.with_seek_position(next.seek_position_ms()) == *next
        }
        _ => false,
    }
}
