use std::{collections::HashSet, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::LibraryError;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Stable identifier of a track in the library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create an identifier from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One playable audio item with its metadata.
///
/// Tracks are built once per library scan and shared immutably afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Unique identifier
    pub id: TrackId,
    /// Track title, used for ordering the library
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album the track belongs to
    pub album: String,
    /// Track length in milliseconds, always greater than zero
    pub duration_ms: u64,
    /// Opaque locator handed to the playback engine
    pub path: String,
    /// Seconds since the Unix epoch when the track was added
    pub date_added: i64,
    /// Genre, when the source provides one
    pub genre: Option<String>,
    /// Human-readable file size, e.g. "3.42 MB"
    pub size_label: String,
}

impl Track {
    /// Time the track was added to the library, if the stored value is in range
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date_added, 0)
    }
}

/// Raw track entry as stored in a library index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// Unique identifier
    pub id: String,
    /// Track title
    pub title: String,
    /// Performing artist
    #[serde(default)]
    pub artist: String,
    /// Album name
    #[serde(default)]
    pub album: String,
    /// Track length in milliseconds
    pub duration_ms: u64,
    /// Locator handed to the playback engine
    pub path: String,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub date_added: i64,
    /// Optional genre
    #[serde(default)]
    pub genre: Option<String>,
    /// File size in bytes
    #[serde(default)]
    pub size_bytes: u64,
}

impl TryFrom<TrackRecord> for Track {
    type Error = LibraryError;

    fn try_from(record: TrackRecord) -> Result<Self, Self::Error> {
        let reject = |reason: &str| LibraryError::InvalidRecord {
            id: record.id.clone(),
            reason: reason.to_string(),
        };

        if record.id.trim().is_empty() {
            return Err(reject("empty id"));
        }
        if record.duration_ms == 0 {
            return Err(reject("duration must be greater than zero"));
        }
        if record.path.trim().is_empty() {
            return Err(reject("empty path"));
        }

        Ok(Self {
            id: TrackId::new(record.id),
            title: record.title,
            artist: record.artist,
            album: record.album,
            duration_ms: record.duration_ms,
            path: record.path,
            date_added: record.date_added,
            genre: record.genre.filter(|genre| !genre.is_empty()),
            size_label: readable_size(record.size_bytes),
        })
    }
}

/// Format a byte count with two decimals and a 1024-based unit.
pub fn readable_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{value:.2} {}", SIZE_UNITS[unit])
}

/// Order tracks by title the way the library presents them.
pub(crate) fn sort_by_title(tracks: &mut [Track]) {
    tracks.sort_by(|a, b| a.title.cmp(&b.title));
}

/// Drop every track whose id was already seen, keeping the first occurrence.
pub(crate) fn drop_duplicate_ids(tracks: &mut Vec<Track>) {
    let mut seen = HashSet::new();
    tracks.retain(|track| {
        let first = seen.insert(track.id.clone());
        if !first {
            warn!("Skipping track '{}': duplicate id {}", track.title, track.id);
        }
        first
    });
}
