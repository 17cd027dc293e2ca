use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::services::{common::RepeatMode, library::TrackId};

/// Persisted resume point: which track was playing and how far in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Track that was playing
    pub track_id: TrackId,
    /// Playback position in milliseconds
    pub position_ms: u64,
}

/// Playback preferences that survive restarts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackPreferences {
    /// Whether shuffle was enabled
    pub shuffle_enabled: bool,

    /// Last selected repeat mode
    pub repeat_mode: RepeatMode,

    /// Resume point written whenever playback pauses
    pub last_played: Option<Checkpoint>,

    /// Last time these preferences were written
    pub last_updated: SystemTime,
}

impl Default for PlaybackPreferences {
    fn default() -> Self {
        Self {
            shuffle_enabled: false,
            repeat_mode: RepeatMode::Off,
            last_played: None,
            last_updated: SystemTime::UNIX_EPOCH,
        }
    }
}
