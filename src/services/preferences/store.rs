use std::sync::Mutex;

use tracing::warn;

use super::{Checkpoint, PlaybackPreferences};
use crate::services::common::RepeatMode;

/// Typed key-value store for playback preferences.
///
/// Setters never fail from the caller's point of view; implementations log
/// write failures and keep the new value in memory.
pub trait PreferenceStore: Send + Sync {
    /// Whether shuffle is enabled (default false)
    fn shuffle_enabled(&self) -> bool;

    /// Persist the shuffle flag
    fn set_shuffle_enabled(&self, enabled: bool);

    /// Stored repeat mode (default off)
    fn repeat_mode(&self) -> RepeatMode;

    /// Persist the repeat mode
    fn set_repeat_mode(&self, mode: RepeatMode);

    /// Resume point, if one was ever stored
    fn last_played(&self) -> Option<Checkpoint>;

    /// Persist a resume point
    fn store_last_played(&self, checkpoint: Checkpoint);
}

/// Preference store kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    preferences: Mutex<PlaybackPreferences>,
}

impl MemoryPreferences {
    /// Create a store seeded with `preferences`.
    pub fn new(preferences: PlaybackPreferences) -> Self {
        Self {
            preferences: Mutex::new(preferences),
        }
    }

    /// Copy of everything currently stored
    pub fn snapshot(&self) -> PlaybackPreferences {
        self.preferences
            .lock()
            .map(|preferences| preferences.clone())
            .unwrap_or_default()
    }

    fn update(&self, apply: impl FnOnce(&mut PlaybackPreferences)) {
        match self.preferences.lock() {
            Ok(mut preferences) => apply(&mut preferences),
            Err(_) => warn!("Preference lock poisoned, update dropped"),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn shuffle_enabled(&self) -> bool {
        self.snapshot().shuffle_enabled
    }

    fn set_shuffle_enabled(&self, enabled: bool) {
        self.update(|preferences| preferences.shuffle_enabled = enabled);
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.snapshot().repeat_mode
    }

    fn set_repeat_mode(&self, mode: RepeatMode) {
        self.update(|preferences| preferences.repeat_mode = mode);
    }

    fn last_played(&self) -> Option<Checkpoint> {
        self.snapshot().last_played
    }

    fn store_last_played(&self, checkpoint: Checkpoint) {
        self.update(|preferences| preferences.last_played = Some(checkpoint));
    }
}
