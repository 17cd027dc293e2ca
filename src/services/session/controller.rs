use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::{
    PlayerState, SessionConfig, SessionStatus, core::Session, monitoring::SessionMonitor,
};
use crate::services::{
    common::RepeatMode,
    engine::{EngineError, PlaybackEngine},
    library::{Track, TrackRepository},
    preferences::PreferenceStore,
};

/// Playback session controller.
///
/// Bridges a [`PlaybackEngine`] with one observable [`PlayerState`]: commands
/// are forwarded to the engine, engine callbacks are reconciled into state,
/// noisy is-playing bursts are debounced, the position is polled while
/// playing and resume checkpoints are written on pause.
///
/// Commands never fail and never block on the engine. Until the engine
/// resolves, or forever if it never does, they are no-ops.
///
/// Dropping the controller cancels its background work but leaves the engine
/// as it is, so playback may continue.
pub struct SessionController {
    session: Arc<Session>,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl SessionController {
    /// Start a session.
    ///
    /// `engine` may resolve later; the controller is usable right away and
    /// loads the library once the engine is there. Must be called inside a
    /// tokio runtime.
    #[instrument(skip_all)]
    pub fn start<F>(
        engine: F,
        repository: Arc<dyn TrackRepository>,
        preferences: Arc<dyn PreferenceStore>,
        config: SessionConfig,
    ) -> Self
    where
        F: Future<Output = Result<Arc<dyn PlaybackEngine>, EngineError>> + Send + 'static,
    {
        info!("Starting playback session");

        let session = Arc::new(Session::new(repository, preferences, config));
        let monitor = SessionMonitor::start(Arc::clone(&session), engine);

        Self {
            session,
            monitor: Mutex::new(Some(monitor)),
        }
    }

    /// Latest published state
    pub fn state(&self) -> PlayerState {
        self.session.state.get()
    }

    /// Stream of the latest state: the current value first, then the newest
    /// value whenever it changes
    pub fn watch(&self) -> impl Stream<Item = PlayerState> + Send + use<> {
        self.session.state.watch()
    }

    /// Stream of every state published from now on, in order
    pub fn subscribe(&self) -> impl Stream<Item = PlayerState> + Send + use<> {
        self.session.state.subscribe()
    }

    /// Lifecycle of the session
    pub fn status(&self) -> SessionStatus {
        self.session.status.get()
    }

    /// Stream of lifecycle changes, starting with the current status
    pub fn watch_status(&self) -> impl Stream<Item = SessionStatus> + Send + use<> {
        self.session.status.watch()
    }

    /// Wait until loading finished, one way or another.
    ///
    /// Returns the first status other than [`SessionStatus::Starting`].
    pub async fn wait_ready(&self) -> SessionStatus {
        let mut statuses = Box::pin(self.session.status.watch());

        while let Some(status) = statuses.next().await {
            if status != SessionStatus::Starting {
                return status;
            }
        }

        SessionStatus::Closed
    }

    /// The current track
    pub fn current_track(&self) -> Option<Arc<Track>> {
        self.state().current_track().cloned()
    }

    /// Tracks in queue order
    pub fn queue(&self) -> Vec<Arc<Track>> {
        self.session.queue_snapshot()
    }

    /// Number of queued tracks
    pub fn queue_len(&self) -> usize {
        self.session.queue().len()
    }

    /// Toggle between playing and paused.
    ///
    /// The new value is published right away; the engine's confirmation is
    /// reconciled when it arrives.
    pub fn play_pause(&self) {
        let Some(engine) = self.session.engine() else {
            return;
        };
        let Some(snapshot) = self.state().snapshot().cloned() else {
            return;
        };

        let is_playing = !snapshot.is_playing();
        if is_playing {
            engine.play();
        } else {
            engine.pause();
        }

        self.session.modify(|latest| latest.with_playing(is_playing));
    }

    /// Start or resume playback.
    pub fn play(&self) {
        if !self.state().is_playing() {
            self.play_pause();
        }
    }

    /// Pause playback.
    pub fn pause(&self) {
        if self.state().is_playing() {
            self.play_pause();
        }
    }

    /// Jump to the track at `index` and play it from the start.
    ///
    /// Returns false when `index` is outside the queue.
    pub fn play_at_index(&self, index: usize) -> bool {
        let Some(engine) = self.session.engine() else {
            return false;
        };

        let len = self.queue_len();
        if index >= len {
            debug!("Index {index} outside queue of {len}");
            return false;
        }

        engine.seek_to_item(index, 0);
        engine.play();
        self.session
            .modify(|latest| latest.with_seek_position(0).with_playing(true));

        true
    }

    /// Switch shuffle on or off and remember the choice.
    pub fn set_shuffle(&self, enabled: bool) {
        let Some(engine) = self.session.engine() else {
            return;
        };

        engine.set_shuffle_enabled(enabled);
        self.session.preferences.set_shuffle_enabled(enabled);
        self.session.refresh_transport();
    }

    /// Flip shuffle. Returns the new value, `None` when the session is inert.
    pub fn toggle_shuffle(&self) -> Option<bool> {
        let engine = self.session.engine()?;

        let enabled = match self.state().snapshot() {
            Some(snapshot) => !snapshot.shuffle_enabled(),
            None => !engine.shuffle_enabled(),
        };
        self.set_shuffle(enabled);

        Some(enabled)
    }

    /// Change the repeat mode and remember the choice.
    pub fn set_repeat_mode(&self, mode: RepeatMode) {
        let Some(engine) = self.session.engine() else {
            return;
        };

        engine.set_repeat_mode(mode);
        self.session.preferences.set_repeat_mode(mode);
        self.session.refresh_transport();
    }

    /// Move to the next repeat mode: off → all → one → off.
    ///
    /// Returns the new mode, `None` when the session is inert.
    pub fn cycle_repeat_mode(&self) -> Option<RepeatMode> {
        let engine = self.session.engine()?;

        let current = match self.state().snapshot() {
            Some(snapshot) => snapshot.repeat_mode(),
            None => engine.repeat_mode(),
        };
        let mode = current.cycled();
        self.set_repeat_mode(mode);

        Some(mode)
    }

    /// Skip to the next item. The state follows the engine's transition.
    pub fn next(&self) {
        if let Some(engine) = self.session.engine() {
            engine.seek_to_next();
        }
    }

    /// Go back to the previous item. The state follows the engine's transition.
    pub fn previous(&self) {
        if let Some(engine) = self.session.engine() {
            engine.seek_to_previous();
        }
    }

    /// Seek within the current track; the position is published right away.
    pub fn seek_to(&self, position_ms: u64) {
        let Some(engine) = self.session.engine() else {
            return;
        };

        engine.seek_to(position_ms);
        self.session
            .modify(|latest| latest.with_seek_position(position_ms));
    }

    /// Delete the current track from the library and the queue.
    ///
    /// Playback continues with the track that took its place (wrapping to the
    /// start when the last one was deleted). Deleting the only track leaves
    /// the session in [`PlayerState::Empty`]. Returns false, with nothing
    /// changed, when the repository refused the deletion.
    #[instrument(skip(self))]
    pub async fn delete_current(&self) -> bool {
        let session = &self.session;
        if session.engine().is_none() {
            return false;
        }
        let state = self.state();
        let Some(snapshot) = state.snapshot() else {
            return false;
        };
        let index = snapshot.index();
        let track = Arc::clone(snapshot.track());
        let was_playing = snapshot.is_playing();

        if !session.repository.delete(&track).await {
            warn!("Repository refused to delete {}", track.id);
            return false;
        }

        let Some(engine) = session.engine().cloned() else {
            return true;
        };

        let (position, remaining) = {
            let mut queue = session.queue();
            let position = match queue.get(index) {
                Some(queued) if queued.id == track.id => Some(index),
                _ => queue.iter().position(|queued| queued.id == track.id),
            };
            let Some(position) = position else {
                debug!("Deleted track {} already left the queue", track.id);
                return true;
            };
            queue.remove(position);
            (position, queue.clone())
        };

        if remaining.is_empty() {
            info!("Deleted the last track, queue is empty");
            session.cancel_timers();
            engine.set_queue(Vec::new());
            session.publish(PlayerState::Empty);
            return true;
        }

        let next = position % remaining.len();
        let items = session.replace_queue(remaining);
        engine.set_queue(items);
        engine.prepare();
        engine.seek_to_item(next, 0);
        if was_playing {
            engine.play();
        }

        match session.snapshot_from_engine(engine.as_ref(), 0) {
            Some(snapshot) => {
                debug!("Continuing at index {next}");
                session.publish(PlayerState::Loaded(snapshot.with_playing(was_playing)));
            }
            None => session.resync(),
        }

        true
    }

    /// Reload the library and hand the new queue to the engine.
    ///
    /// When the current track is still in the library the engine is moved
    /// back to it at the same position. Returns the new queue length.
    #[instrument(skip(self))]
    pub async fn rescan(&self) -> usize {
        let session = &self.session;
        if session.engine().is_none() {
            return 0;
        }

        let previous = self.state();
        let tracks: Vec<Arc<Track>> = session
            .repository
            .list_tracks()
            .await
            .into_iter()
            .map(Arc::new)
            .collect();

        let Some(engine) = session.engine().cloned() else {
            return 0;
        };
        let position_ms = engine.current_position_ms();
        let was_playing = previous.is_playing();

        if tracks.is_empty() {
            info!("Rescan found no tracks");
            session.cancel_timers();
            session.replace_queue(Vec::new());
            engine.set_queue(Vec::new());
            session.publish(PlayerState::Empty);
            return 0;
        }

        let resume = previous.current_track().and_then(|current| {
            tracks.iter().position(|track| track.id == current.id)
        });

        let len = tracks.len();
        let items = session.replace_queue(tracks);
        engine.set_queue(items);
        engine.prepare();

        let seek_position_ms = match resume {
            Some(index) => {
                engine.seek_to_item(index, position_ms);
                position_ms
            }
            None => 0,
        };
        if was_playing {
            engine.play();
        }

        match session.snapshot_from_engine(engine.as_ref(), seek_position_ms) {
            Some(snapshot) => {
                session.publish(PlayerState::Loaded(snapshot.with_playing(was_playing)));
            }
            None => session.resync(),
        }

        info!("Rescan completed. Queue: {len}");
        len
    }

    /// Stop monitoring the engine and cancel all timers.
    ///
    /// The engine itself keeps its current state. Commands become no-ops.
    pub fn shutdown(&self) {
        let handle = match self.monitor.lock() {
            Ok(mut monitor) => monitor.take(),
            Err(_) => None,
        };

        if let Some(handle) = handle {
            handle.abort();
            debug!("Playback session shut down");
        }

        self.session.cancel_timers();
        self.session.status.set(SessionStatus::Closed);
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
