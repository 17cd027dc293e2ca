//! Shared fixtures for the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use musicvibe::services::{
    engine::{EngineError, PlaybackEngine, SimulatedEngine},
    library::{MemoryTrackRepository, Track, TrackId, TrackRepository},
    preferences::{MemoryPreferences, PlaybackPreferences, PreferenceStore},
    session::{SessionConfig, SessionController, SessionStatus},
};

pub const TRACK_LENGTH_MS: u64 = 180_000;

pub fn track(id: &str, title: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: title.to_string(),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        duration_ms: TRACK_LENGTH_MS,
        path: format!("/music/{id}.mp3"),
        date_added: 1_700_000_000,
        genre: None,
        size_label: "4.00 MB".to_string(),
    }
}

/// Tracks "t0".."tN" titled so that title order equals id order.
pub fn tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|index| track(&format!("t{index}"), &format!("Song {index:02}")))
        .collect()
}

/// Repository wrapper that counts deletions and can refuse them.
#[derive(Debug)]
pub struct CountingRepository {
    pub inner: MemoryTrackRepository,
    deletes: AtomicUsize,
    refuse_deletes: bool,
}

impl CountingRepository {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            inner: MemoryTrackRepository::new(tracks),
            deletes: AtomicUsize::new(0),
            refuse_deletes: false,
        }
    }

    pub fn refusing(tracks: Vec<Track>) -> Self {
        Self {
            refuse_deletes: true,
            ..Self::new(tracks)
        }
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackRepository for CountingRepository {
    async fn list_tracks(&self) -> Vec<Track> {
        self.inner.list_tracks().await
    }

    async fn delete(&self, track: &Track) -> bool {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.refuse_deletes {
            return false;
        }
        self.inner.delete(track).await
    }
}

/// Repository that lists its tracks exactly as given, repeated ids included.
#[derive(Debug)]
pub struct UncheckedRepository {
    tracks: Mutex<Vec<Track>>,
}

impl UncheckedRepository {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Mutex::new(tracks),
        }
    }

    pub fn titles(&self) -> Vec<String> {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .map(|track| track.title.clone())
            .collect()
    }
}

#[async_trait]
impl TrackRepository for UncheckedRepository {
    async fn list_tracks(&self) -> Vec<Track> {
        self.tracks.lock().unwrap().clone()
    }

    async fn delete(&self, track: &Track) -> bool {
        let mut tracks = self.tracks.lock().unwrap();
        match tracks.iter().position(|candidate| candidate == track) {
            Some(position) => {
                tracks.remove(position);
                true
            }
            None => false,
        }
    }
}

/// A running session together with the collaborators it was built from.
pub struct Harness {
    pub session: SessionController,
    pub engine: Arc<SimulatedEngine>,
    pub repository: Arc<CountingRepository>,
    pub preferences: Arc<MemoryPreferences>,
}

impl Harness {
    pub async fn start(tracks: Vec<Track>) -> Self {
        Self::start_with(
            CountingRepository::new(tracks),
            PlaybackPreferences::default(),
            SessionConfig::default(),
        )
        .await
    }

    pub async fn start_with(
        repository: CountingRepository,
        preferences: PlaybackPreferences,
        config: SessionConfig,
    ) -> Self {
        let engine = SimulatedEngine::new();
        let repository = Arc::new(repository);
        let preferences = Arc::new(MemoryPreferences::new(preferences));

        let handle: Arc<dyn PlaybackEngine> = engine.clone();
        let session = SessionController::start(
            async move { Ok::<_, EngineError>(handle) },
            Arc::clone(&repository) as Arc<dyn TrackRepository>,
            Arc::clone(&preferences) as Arc<dyn PreferenceStore>,
            config,
        );

        assert_eq!(session.wait_ready().await, SessionStatus::Ready);

        Self {
            session,
            engine,
            repository,
            preferences,
        }
    }
}

/// Let the monitor and every timer run for a while.
pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(1)).await;
}
