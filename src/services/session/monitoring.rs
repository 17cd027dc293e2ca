use std::{
    future::Future,
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, info, instrument, warn};

use super::{PlayerState, SessionStatus, core::Session};
use crate::services::{
    common::RepeatMode,
    engine::{EngineError, EngineEvent, PlaybackEngine},
};

/// Loads the session once the engine resolves, then translates engine
/// callbacks into state updates.
pub(crate) struct SessionMonitor;

impl SessionMonitor {
    /// Start loading and monitoring.
    ///
    /// Monitoring stops when the returned handle is aborted or the session is
    /// dropped.
    pub fn start<F>(session: Arc<Session>, engine: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<Arc<dyn PlaybackEngine>, EngineError>> + Send + 'static,
    {
        tokio::spawn(async move {
            let Some(events) = Self::initialize(&session, engine).await else {
                return;
            };

            let weak = Arc::downgrade(&session);
            drop(session);
            Self::monitor_events(weak, events).await;
        })
    }

    #[instrument(skip_all)]
    async fn initialize<F>(
        session: &Arc<Session>,
        engine: F,
    ) -> Option<broadcast::Receiver<EngineEvent>>
    where
        F: Future<Output = Result<Arc<dyn PlaybackEngine>, EngineError>> + Send,
    {
        let engine = match engine.await {
            Ok(engine) => engine,
            Err(e) => {
                error!("Playback engine unavailable, session stays inert: {e}");
                session.status.set(SessionStatus::Unavailable);
                return None;
            }
        };

        if session.engine.set(Arc::clone(&engine)).is_err() {
            warn!("Session already had an engine");
            return None;
        }

        let tracks: Vec<_> = session
            .repository
            .list_tracks()
            .await
            .into_iter()
            .map(Arc::new)
            .collect();

        if tracks.is_empty() {
            info!("Library is empty, nothing to play");
            Self::apply_saved_modes(session, engine.as_ref());
            let events = engine.subscribe();
            session.publish(PlayerState::Empty);
            session.status.set(SessionStatus::Ready);
            return Some(events);
        }

        let resume = session.preferences.last_played().and_then(|checkpoint| {
            tracks
                .iter()
                .position(|track| track.id == checkpoint.track_id)
                .map(|index| (index, checkpoint.position_ms))
        });

        let items = session.replace_queue(tracks);
        engine.set_queue(items);
        engine.prepare();
        Self::apply_saved_modes(session, engine.as_ref());

        if let Some((index, position_ms)) = resume {
            debug!("Resuming at index {index}, {position_ms} ms");
            engine.seek_to_item(index, position_ms);
        }

        let events = engine.subscribe();

        let position = engine.current_position_ms();
        match session.snapshot_from_engine(engine.as_ref(), position) {
            Some(snapshot) => {
                info!(
                    "Session loaded. Queue: {}, current: {}",
                    session.queue().len(),
                    snapshot.index()
                );
                session.publish(PlayerState::Loaded(snapshot));
            }
            None => warn!("Engine reported no current item after loading the queue"),
        }

        session.status.set(SessionStatus::Ready);

        if session.config.autoplay {
            debug!("Autoplay");
            engine.play();
            session.modify(|snapshot| snapshot.with_playing(true));
        }

        Some(events)
    }

    /// Carry the persisted shuffle and repeat choices over to the engine,
    /// so a queue loaded later by a rescan starts with them too.
    fn apply_saved_modes(session: &Session, engine: &dyn PlaybackEngine) {
        engine.set_shuffle_enabled(session.preferences.shuffle_enabled());
        engine.set_repeat_mode(session.preferences.repeat_mode());
    }

    async fn monitor_events(session: Weak<Session>, mut events: broadcast::Receiver<EngineEvent>) {
        loop {
            let event = events.recv().await;

            let Some(session) = session.upgrade() else {
                debug!("Session dropped, stopping monitor");
                return;
            };

            match event {
                Ok(event) => Self::handle_event(&session, event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Missed {missed} engine events, resyncing");
                    session.resync();
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Engine event stream closed");
                    return;
                }
            }
        }
    }

    fn handle_event(session: &Arc<Session>, event: EngineEvent) {
        debug!("Engine event: {event:?}");

        match event {
            EngineEvent::ItemTransitioned { .. } => Self::on_item_transitioned(session),
            EngineEvent::IsPlayingChanged(is_playing) => session.on_is_playing_changed(is_playing),
            EngineEvent::PositionDiscontinuity => session.on_position_discontinuity(),
            EngineEvent::ShuffleChanged(enabled) => Self::on_shuffle_changed(session, enabled),
            EngineEvent::RepeatModeChanged(mode) => Self::on_repeat_mode_changed(session, mode),
        }
    }

    fn on_item_transitioned(session: &Arc<Session>) {
        let Some(engine) = session.engine().cloned() else {
            return;
        };

        if session.queue().is_empty() {
            session.publish(PlayerState::Empty);
            return;
        }

        let mut is_playing = false;
        let published = session.update(|previous| {
            let Some(fresh) = session.snapshot_from_engine(engine.as_ref(), 0) else {
                debug!("Transition to an item outside the queue ignored");
                return None;
            };

            // Re-entering the same track (repeat one, rescan) keeps the engine's position.
            let same_track = previous
                .current_track()
                .is_some_and(|track| track.id == fresh.track().id);
            let fresh = if same_track {
                fresh.with_seek_position(engine.current_position_ms())
            } else {
                fresh
            };

            is_playing = match previous {
                PlayerState::Loaded(snapshot) => snapshot.is_playing(),
                PlayerState::Unloaded | PlayerState::Empty => engine.is_playing(),
            };

            Some(PlayerState::Loaded(fresh.with_playing(is_playing)))
        });

        if published {
            debug!("Now at index {:?}", session.state.get().current_index());
        }

        if is_playing {
            session.start_polling(Duration::ZERO);
        }
    }

    fn on_shuffle_changed(session: &Session, enabled: bool) {
        session.preferences.set_shuffle_enabled(enabled);
        session.refresh_transport();
    }

    fn on_repeat_mode_changed(session: &Session, mode: RepeatMode) {
        session.preferences.set_repeat_mode(mode);
        session.refresh_transport();
    }
}
