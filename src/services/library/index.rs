use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::{
    LibraryError, Track, TrackRecord, TrackRepository,
    track::{drop_duplicate_ids, sort_by_title},
};

/// Track repository backed by a JSON library index.
///
/// The index is a JSON array of [`TrackRecord`] objects. Entries that fail to
/// parse or validate are skipped individually, so one bad record never hides
/// the rest of the library.
#[derive(Debug)]
pub struct IndexTrackRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl IndexTrackRepository {
    /// Create a repository reading the index at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<Value>, LibraryError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| LibraryError::Io {
                    path: self.path.clone(),
                    details: e.to_string(),
                })?;

        serde_json::from_str(&content).map_err(|e| LibraryError::IndexParse {
            path: self.path.clone(),
            details: e.to_string(),
        })
    }

    async fn write_entries(&self, entries: &[Value]) -> Result<(), LibraryError> {
        let content =
            serde_json::to_string_pretty(entries).map_err(|e| LibraryError::IndexParse {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| LibraryError::Io {
                path: self.path.clone(),
                details: e.to_string(),
            })
    }

    fn parse_entry(entry: Value) -> Result<Track, LibraryError> {
        let id = Self::entry_id(&entry).unwrap_or_default().to_string();
        let record: TrackRecord =
            serde_json::from_value(entry).map_err(|e| LibraryError::InvalidRecord {
                id,
                reason: e.to_string(),
            })?;

        Track::try_from(record)
    }

    fn entry_id(entry: &Value) -> Option<&str> {
        entry.get("id").and_then(Value::as_str)
    }

    /// Read every valid track from the index, sorted by title.
    ///
    /// Malformed entries, and entries repeating an earlier id, are skipped
    /// with a warning.
    ///
    /// # Errors
    /// Returns an error if the index cannot be read or is not a JSON array.
    pub async fn scan(&self) -> Result<Vec<Track>, LibraryError> {
        let entries = self.read_entries().await?;

        let mut tracks: Vec<Track> = entries
            .into_iter()
            .filter_map(|entry| match Self::parse_entry(entry) {
                Ok(track) => Some(track),
                Err(e) => {
                    warn!("Skipping track: {e}");
                    None
                }
            })
            .collect();

        drop_duplicate_ids(&mut tracks);
        sort_by_title(&mut tracks);
        Ok(tracks)
    }

    async fn remove(&self, track: &Track) -> Result<(), LibraryError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        let before = entries.len();
        entries.retain(|entry| Self::entry_id(entry) != Some(track.id.as_str()));

        if entries.len() == before {
            return Err(LibraryError::TrackNotFound(track.id.clone()));
        }

        self.write_entries(&entries).await
    }
}

#[async_trait]
impl TrackRepository for IndexTrackRepository {
    #[instrument(skip(self), fields(index = %self.path.display()))]
    async fn list_tracks(&self) -> Vec<Track> {
        match self.scan().await {
            Ok(tracks) => {
                info!("Library scan completed. Items: {}", tracks.len());
                tracks
            }
            Err(e) => {
                warn!("Library index unavailable: {e}");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, track), fields(track = %track.id))]
    async fn delete(&self, track: &Track) -> bool {
        match self.remove(track).await {
            Ok(()) => {
                info!("Track deleted at path {}", track.path);
                true
            }
            Err(e) => {
                warn!("Failed to delete track at path {}: {e}", track.path);
                false
            }
        }
    }
}
