mod file_creation;

use std::{fs, path::Path};

use file_creation::create_default_config_file;
use tracing::{debug, info, instrument, warn};

use super::{Config, ConfigPaths};
use crate::{MusicVibeError, Result};

const MAX_WINDOW_MS: u64 = 5_000;

impl Config {
    /// Loads and validates a configuration file.
    ///
    /// A missing file is created with a commented header and yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read or created
    /// - The TOML content is invalid
    /// - A value is out of range (see [`Config::validate`])
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            info!("No configuration file found, creating default");
            create_default_config_file(path)?;
        }

        let content =
            fs::read_to_string(path).map_err(|e| MusicVibeError::file_access(path, e))?;

        let config: Config =
            toml::from_str(&content).map_err(|source| MusicVibeError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;

        debug!("Configuration loaded");
        Ok(config)
    }

    /// Loads the configuration, falling back to defaults on any error.
    ///
    /// Uses the main configuration file when `path` is `None`. Problems are
    /// logged, never returned.
    pub fn load_or_default(path: Option<&Path>) -> Config {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match ConfigPaths::main_config() {
                Ok(path) => path,
                Err(e) => {
                    warn!("Cannot locate configuration directory, using defaults: {e}");
                    return Config::default();
                }
            },
        };

        Self::load(&path).unwrap_or_else(|e| {
            warn!("Invalid configuration, using defaults: {e}");
            Config::default()
        })
    }

    /// Checks value ranges the schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSetting` for a zero poll interval or a timing
    /// window longer than five seconds.
    pub fn validate(&self) -> Result<()> {
        let playback = &self.playback;

        if playback.position_poll_interval_ms == 0 {
            return Err(MusicVibeError::invalid_playback(
                "position_poll_interval_ms",
                "must be greater than zero",
            ));
        }

        let windows = [
            ("is_playing_debounce_ms", playback.is_playing_debounce_ms),
            (
                "discontinuity_suppression_ms",
                playback.discontinuity_suppression_ms,
            ),
            ("position_poll_interval_ms", playback.position_poll_interval_ms),
            ("poll_start_delay_ms", playback.poll_start_delay_ms),
        ];

        for (field, value) in windows {
            if value > MAX_WINDOW_MS {
                return Err(MusicVibeError::invalid_playback(
                    field,
                    format!("{value} ms exceeds the {MAX_WINDOW_MS} ms maximum"),
                ));
            }
        }

        Ok(())
    }
}
