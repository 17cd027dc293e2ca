use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
    time::SystemTime,
};

use tracing::{debug, info, instrument, warn};

use super::{Checkpoint, PlaybackPreferences, PreferenceError, PreferenceStore};
use crate::services::common::RepeatMode;

/// Preference store persisted as a JSON file.
///
/// Every setter rewrites the whole file. A missing or unreadable file yields
/// defaults rather than an error.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    preferences: Mutex<PlaybackPreferences>,
}

impl FilePreferences {
    /// Open the store at `path`, loading whatever is already there.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let preferences = match Self::load(&path) {
            Ok(Some(preferences)) => {
                info!("Loaded playback preferences");
                preferences
            }
            Ok(None) => {
                info!("No preference file found, using defaults");
                PlaybackPreferences::default()
            }
            Err(e) => {
                warn!("Invalid preference file, using defaults: {e}");
                PlaybackPreferences::default()
            }
        };

        Self {
            path,
            preferences: Mutex::new(preferences),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of everything currently stored
    pub fn snapshot(&self) -> PlaybackPreferences {
        self.preferences
            .lock()
            .map(|preferences| preferences.clone())
            .unwrap_or_default()
    }

    fn load(path: &Path) -> Result<Option<PlaybackPreferences>, PreferenceError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| PreferenceError::Io {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| PreferenceError::Serialization {
                path: path.to_path_buf(),
                details: e.to_string(),
            })
    }

    fn save(&self, preferences: &PlaybackPreferences) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PreferenceError::Io {
                path: parent.to_path_buf(),
                details: e.to_string(),
            })?;
        }

        let content =
            serde_json::to_string_pretty(preferences).map_err(|e| {
                PreferenceError::Serialization {
                    path: self.path.clone(),
                    details: e.to_string(),
                }
            })?;

        fs::write(&self.path, content).map_err(|e| PreferenceError::Io {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    fn update(&self, apply: impl FnOnce(&mut PlaybackPreferences)) {
        let Ok(mut preferences) = self.preferences.lock() else {
            warn!("Preference lock poisoned, update dropped");
            return;
        };

        apply(&mut preferences);
        preferences.last_updated = SystemTime::now();

        match self.save(&preferences) {
            Ok(()) => debug!("Playback preferences saved"),
            Err(e) => warn!("Failed to save playback preferences: {e}"),
        }
    }
}

impl PreferenceStore for FilePreferences {
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
