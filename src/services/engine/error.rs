/// Errors that can occur while obtaining a playback engine
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine handle never became available
    #[error("playback engine unavailable: {0}")]
    Unavailable(String),

    /// The engine was connected but has since gone away
    #[error("playback engine disconnected")]
    Disconnected,
}
