use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Playback session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PlaybackConfig {
    /// How long (ms) an is-playing change must stay stable before the UI sees it.
    pub is_playing_debounce_ms: u64,

    /// Window (ms) after a seek or transition in which is-playing changes are
    /// not shown.
    pub discontinuity_suppression_ms: u64,

    /// Position refresh period (ms) while playing. Lower is smoother but
    /// costs more CPU.
    pub position_poll_interval_ms: u64,

    /// Delay (ms) between playback starting and the first position refresh.
    pub poll_start_delay_ms: u64,

    /// Start playing as soon as the library is loaded.
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            is_playing_debounce_ms: 250,
            discontinuity_suppression_ms: 50,
            position_poll_interval_ms: 100,
            poll_start_delay_ms: 500,
            autoplay: false,
        }
    }
}
