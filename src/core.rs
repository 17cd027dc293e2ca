use std::{io, path::PathBuf, result};

use thiserror::Error;

use crate::services::library::LibraryError;

/// Errors surfaced by configuration handling and the library commands.
///
/// A running playback session never returns these: engine and storage
/// problems inside a session are logged and absorbed.
#[derive(Error, Debug)]
pub enum MusicVibeError {
    /// A setting parsed but is out of its allowed range
    #[error("invalid setting [{section}].{field}: {reason}")]
    InvalidSetting {
        /// Table the setting lives in
        section: &'static str,
        /// Setting name
        field: &'static str,
        /// What is wrong with the value
        reason: String,
    },

    /// Reading or creating a file failed
    #[error("cannot access '{}': {source}", path.display())]
    FileAccess {
        /// File or directory involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: io::Error,
    },

    /// A path could not be resolved, typically `HOME` missing
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The configuration file is not valid TOML for [`crate::config::Config`]
    #[error("malformed configuration '{}': {source}", path.display())]
    ConfigParse {
        /// Configuration file
        path: PathBuf,
        /// Parser diagnostics
        #[source]
        source: toml::de::Error,
    },

    /// Track library error
    #[error(transparent)]
    Library(#[from] LibraryError),
}

/// Result alias used across configuration and library commands.
pub type Result<T> = result::Result<T, MusicVibeError>;

impl MusicVibeError {
    /// Wraps an I/O failure on `path`.
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Rejects a `[playback]` value.
    pub fn invalid_playback(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            section: "playback",
            field,
            reason: reason.into(),
        }
    }
}
