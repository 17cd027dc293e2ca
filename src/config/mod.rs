//! Configuration schema definitions and validation.
//!
//! Defines the complete configuration structure for MusicVibe: general
//! settings, playback timing, and where the library index and preference
//! file live. All configurations are serializable to/from TOML format.

mod general;
mod library;
mod loading;
mod paths;
mod playback;
mod preferences;

#[cfg(test)]
mod tests;

pub use general::{GeneralConfig, LogLevel};
pub use library::LibraryConfig;
pub use paths::ConfigPaths;
pub use playback::PlaybackConfig;
pub use preferences::PreferencesConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for MusicVibe.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Playback session timing and start-up behaviour.
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Track library location.
    #[serde(default)]
    pub library: LibraryConfig,

    /// Persisted playback preferences location.
    #[serde(default)]
    pub preferences: PreferencesConfig,
}
