use crate::{
    cli::CliError,
    services::session::{PlaybackSnapshot, SessionController, SessionStatus},
};

/// The loaded snapshot, or an error explaining why there is none.
pub fn require_loaded(session: &SessionController) -> Result<PlaybackSnapshot, CliError> {
    if session.status() == SessionStatus::Unavailable {
        return Err(CliError::SessionError(
            "Playback engine is unavailable".to_string(),
        ));
    }

    session
        .state()
        .snapshot()
        .cloned()
        .ok_or_else(|| CliError::SessionError("No track loaded".to_string()))
}

/// Parses an on/off switch argument.
pub fn parse_switch(arg: &str, value: &str) -> Result<bool, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CliError::InvalidArgument {
            arg: arg.to_string(),
            reason: format!("Expected on or off, got '{value}'"),
        }),
    }
}
