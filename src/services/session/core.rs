use std::sync::{
    Arc, Mutex, MutexGuard, OnceLock,
    atomic::{AtomicU64, Ordering},
};

use tracing::{debug, warn};

use super::{
    PlayerState, SessionConfig, SessionStatus,
    state::{PlaybackSnapshot, Transport},
};
use crate::services::{
    common::{Property, TimerSlot},
    engine::{MediaItem, PlaybackEngine},
    library::{Track, TrackRepository},
    preferences::{Checkpoint, PreferenceStore},
};

/// State shared between the controller, its event monitor and its timers.
pub(crate) struct Session {
    pub(super) engine: OnceLock<Arc<dyn PlaybackEngine>>,
    pub(super) repository: Arc<dyn TrackRepository>,
    pub(super) preferences: Arc<dyn PreferenceStore>,
    pub(super) config: SessionConfig,
    pub(super) state: Property<PlayerState>,
    pub(super) status: Property<SessionStatus>,
    pub(super) queue: Mutex<Vec<Arc<Track>>>,
    pub(super) is_playing_debounce: TimerSlot,
    pub(super) suppression_window: TimerSlot,
    pub(super) position_polling: TimerSlot,
    pub(super) poll_generation: AtomicU64,
    publish: Mutex<()>,
}

impl Session {
    pub(super) fn new(
        repository: Arc<dyn TrackRepository>,
        preferences: Arc<dyn PreferenceStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            engine: OnceLock::new(),
            repository,
            preferences,
            config,
            state: Property::new(PlayerState::Unloaded),
            status: Property::new(SessionStatus::Starting),
            queue: Mutex::new(Vec::new()),
            is_playing_debounce: TimerSlot::new(),
            suppression_window: TimerSlot::new(),
            position_polling: TimerSlot::new(),
            poll_generation: AtomicU64::new(0),
            publish: Mutex::new(()),
        }
    }

    /// The engine, once it resolved and the session is still open.
    pub(super) fn engine(&self) -> Option<&Arc<dyn PlaybackEngine>> {
        if self.status.get() == SessionStatus::Closed {
            return None;
        }
        self.engine.get()
    }

    pub(super) fn queue(&self) -> MutexGuard<'_, Vec<Arc<Track>>> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(super) fn queue_snapshot(&self) -> Vec<Arc<Track>> {
        self.queue().clone()
    }

    pub(super) fn replace_queue(&self, tracks: Vec<Arc<Track>>) -> Vec<MediaItem> {
        let items = tracks.iter().map(|track| MediaItem::from(track.as_ref())).collect();
        *self.queue() = tracks;
        items
    }

    fn publish_guard(&self) -> MutexGuard<'_, ()> {
        self.publish
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Replace the published state.
    pub(super) fn publish(&self, state: PlayerState) -> bool {
        let _guard = self.publish_guard();
        self.state.set(state)
    }

    /// Derive a new snapshot from the latest published one.
    ///
    /// Does nothing unless a track is loaded. The read and the write happen
    /// under one lock so concurrent producers never overwrite each other with
    /// stale copies.
    pub(super) fn modify(&self, apply: impl FnOnce(&PlaybackSnapshot) -> PlaybackSnapshot) -> bool {
        self.update(|state| match state {
            PlayerState::Loaded(snapshot) => Some(PlayerState::Loaded(apply(snapshot))),
            PlayerState::Unloaded | PlayerState::Empty => None,
        })
    }

    /// Replace the state with whatever `apply` derives from the latest one.
    ///
    /// Returning `None` keeps the current state.
    pub(super) fn update(&self, apply: impl FnOnce(&PlayerState) -> Option<PlayerState>) -> bool {
        let _guard = self.publish_guard();

        match apply(&self.state.get()) {
            Some(next) => self.state.set(next),
            None => false,
        }
    }

    /// Like [`Session::modify`], skipped when `generation` is no longer current.
    pub(super) fn modify_if_current(
        &self,
        generation: u64,
        apply: impl FnOnce(&PlaybackSnapshot) -> PlaybackSnapshot,
    ) -> bool {
        self.modify(|snapshot| {
            if self.poll_generation.load(Ordering::SeqCst) == generation {
                apply(snapshot)
            } else {
                snapshot.clone()
            }
        })
    }

    /// Transport flags as the engine reports them right now.
    pub(super) fn read_transport(engine: &dyn PlaybackEngine) -> Transport {
        Transport {
            is_playing: engine.is_playing(),
            shuffle_enabled: engine.shuffle_enabled(),
            repeat_mode: engine.repeat_mode(),
            is_next_enabled: engine.has_next(),
            is_previous_enabled: engine.has_previous(),
        }
    }

    /// Build the snapshot for the engine's current item.
    ///
    /// Returns `None` when the engine has no current item or the item is not
    /// part of the queue.
    pub(super) fn snapshot_from_engine(
        &self,
        engine: &dyn PlaybackEngine,
        seek_position_ms: u64,
    ) -> Option<PlaybackSnapshot> {
        let index = engine.current_index()?;
        let track = self.queue().get(index).cloned()?;

        Some(PlaybackSnapshot::new(
            index,
            track,
            Self::read_transport(engine),
            seek_position_ms,
        ))
    }

    /// Re-read shuffle, repeat and next/previous availability from the engine.
    ///
    /// The published is-playing value is kept; it only changes through the
    /// debounce.
    pub(super) fn refresh_transport(&self) {
        let Some(engine) = self.engine() else {
            return;
        };

        let mut transport = Self::read_transport(engine.as_ref());
        self.modify(|snapshot| {
            transport.is_playing = snapshot.is_playing();
            snapshot.with_transport(transport)
        });
    }

    /// Rebuild the whole state from the engine, e.g. after missed events.
    pub(super) fn resync(&self) {
        let Some(engine) = self.engine() else {
            return;
        };

        if self.queue().is_empty() {
            self.publish(PlayerState::Empty);
            return;
        }

        let position = engine.current_position_ms();
        match self.snapshot_from_engine(engine.as_ref(), position) {
            Some(snapshot) => {
                debug!("Resynced state at index {}", snapshot.index());
                self.publish(PlayerState::Loaded(snapshot));
            }
            None => warn!("Engine has no current item, state left as is"),
        }
    }

    /// Persist the current track and position as the resume point.
    pub(super) fn write_checkpoint(&self) {
        let Some(engine) = self.engine() else {
            return;
        };
        let Some(track) = self.state.get().current_track().cloned() else {
            return;
        };

        let checkpoint = Checkpoint {
            track_id: track.id.clone(),
            position_ms: engine.current_position_ms().min(track.duration_ms),
        };

        debug!(
            "Checkpoint {} at {} ms",
            checkpoint.track_id, checkpoint.position_ms
        );
        self.preferences.store_last_played(checkpoint);
    }

    /// Cancel polling and every pending timer.
    pub(super) fn cancel_timers(&self) {
        self.poll_generation.fetch_add(1, Ordering::SeqCst);
        self.position_polling.cancel();
        self.is_playing_debounce.cancel();
        self.suppression_window.cancel();
    }
}
