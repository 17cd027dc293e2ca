use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigPaths;

/// Playback preference persistence configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Path of the preference file. Defaults to
    /// `$HOME/.musicvibe/playback-state.json`.
    pub file: Option<PathBuf>,
}

impl PreferencesConfig {
    /// The configured preference file, or the default one
    ///
    /// # Errors
    /// Returns an error if no path is configured and the data directory
    /// cannot be determined or created
    pub fn file_path(&self) -> Result<PathBuf, std::io::Error> {
        match &self.file {
            Some(path) => Ok(path.clone()),
            None => ConfigPaths::preferences_file(),
        }
    }
}
