use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{
    Track,
    track::{drop_duplicate_ids, sort_by_title},
};

/// Source of the playable track list.
///
/// Implementations absorb their own failures: a listing that cannot be read
/// yields the tracks that could be read (possibly none), and a deletion that
/// fails reports `false`.
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// All available tracks, sorted by title ascending
    async fn list_tracks(&self) -> Vec<Track>;

    /// Remove a track from the library.
    ///
    /// Returns true only when the track was actually removed.
    async fn delete(&self, track: &Track) -> bool;
}

/// Track repository backed by an in-memory list.
#[derive(Debug, Default)]
pub struct MemoryTrackRepository {
    tracks: RwLock<Vec<Track>>,
}

impl MemoryTrackRepository {
    /// Create a repository holding `tracks`, sorted by title.
    ///
    /// Only the first track with a given id is kept.
    pub fn new(mut tracks: Vec<Track>) -> Self {
        drop_duplicate_ids(&mut tracks);
        sort_by_title(&mut tracks);
        Self {
            tracks: RwLock::new(tracks),
        }
    }

    /// Replace the whole library, e.g. after an external scan.
    pub fn replace(&self, mut tracks: Vec<Track>) {
        drop_duplicate_ids(&mut tracks);
        sort_by_title(&mut tracks);
        match self.tracks.write() {
            Ok(mut current) => *current = tracks,
            Err(_) => warn!("Track list lock poisoned, library not replaced"),
        }
    }
}

#[async_trait]
impl TrackRepository for MemoryTrackRepository {
    async fn list_tracks(&self) -> Vec<Track> {
        self.tracks
            .read()
            .map(|tracks| tracks.clone())
            .unwrap_or_default()
    }

    async fn delete(&self, track: &Track) -> bool {
        let Ok(mut tracks) = self.tracks.write() else {
            warn!("Track list lock poisoned, cannot delete {}", track.id);
            return false;
        };

        let before = tracks.len();
        tracks.retain(|candidate| candidate.id != track.id);
        let removed = tracks.len() != before;

        if removed {
            debug!("Removed track {} from memory library", track.id);
        }

        removed
    }
}
