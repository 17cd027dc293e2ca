use std::path::PathBuf;

/// Errors that can occur while loading or saving playback preferences
#[derive(thiserror::Error, Debug)]
pub enum PreferenceError {
    /// Reading or writing the preference file failed
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path of the preference file
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// The preference file could not be encoded or decoded
    #[error("invalid preference data in '{path}': {details}")]
    Serialization {
        /// Path of the preference file
        path: PathBuf,
        /// Serialization error details
        details: String,
    },
}
