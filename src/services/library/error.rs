use std::path::PathBuf;

use super::TrackId;

/// Errors that can occur while reading or changing the track library
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    /// Reading or writing the library index failed
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path of the index file
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// The library index is not valid JSON
    #[error("failed to parse library index '{path}': {details}")]
    IndexParse {
        /// Path of the index file
        path: PathBuf,
        /// Parse error details
        details: String,
    },

    /// A single track record could not be turned into a track
    #[error("invalid track record '{id}': {reason}")]
    InvalidRecord {
        /// Identifier of the offending record (may be empty)
        id: String,
        /// Why the record was rejected
        reason: String,
    },

    /// The track is not part of the library
    #[error("track {0} not found in library")]
    TrackNotFound(TrackId),
}
