use std::{fmt, time::Duration};

use crate::config::PlaybackConfig;

/// Lifecycle of a playback session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// Waiting for the engine or loading the library
    #[default]
    Starting,

    /// Loaded; commands reach the engine
    Ready,

    /// The engine never became available, every command is a no-op
    Unavailable,

    /// Shut down
    Closed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Starting => write!(f, "starting"),
            SessionStatus::Ready => write!(f, "ready"),
            SessionStatus::Unavailable => write!(f, "unavailable"),
            SessionStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Timing and start-up behaviour of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long an is-playing change must stay stable before it is published
    pub is_playing_debounce: Duration,
    /// Window after a position discontinuity in which is-playing changes are
    /// withheld
    pub discontinuity_suppression: Duration,
    /// Position polling period while playing
    pub position_poll_interval: Duration,
    /// Delay between a published "playing" and the first position poll
    pub poll_start_delay: Duration,
    /// Start playing as soon as the queue is loaded
    pub autoplay: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&PlaybackConfig::default())
    }
}

impl From<&PlaybackConfig> for SessionConfig {
    fn from(config: &PlaybackConfig) -> Self {
        Self {
            is_playing_debounce: Duration::from_millis(config.is_playing_debounce_ms),
            discontinuity_suppression: Duration::from_millis(config.discontinuity_suppression_ms),
            position_poll_interval: Duration::from_millis(config.position_poll_interval_ms.max(1)),
            poll_start_delay: Duration::from_millis(config.poll_start_delay_ms),
            autoplay: config.autoplay,
        }
    }
}
