use std::sync::{Arc, Weak, atomic::Ordering};

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use super::core::Session;

impl Session {
    /// Handle an is-playing callback from the engine.
    ///
    /// Inside a discontinuity window the change is part of the engine's own
    /// seek mechanics: it is never published and it discards any pending
    /// publish, but polling still follows it. Outside the window the change
    /// restarts the debounce timer, so only the value that stays stable for the
    /// whole debounce delay gets published.
    pub(super) fn on_is_playing_changed(self: &Arc<Self>, is_playing: bool) {
        if self.suppression_window.is_pending() {
            debug!("Withheld is-playing={is_playing} inside discontinuity window");
            self.is_playing_debounce.cancel();
            self.follow_is_playing(is_playing);
            return;
        }

        let weak = Arc::downgrade(self);
        let delay = self.config.is_playing_debounce;

        self.is_playing_debounce.arm(async move {
            time::sleep(delay).await;
            if let Some(session) = weak.upgrade() {
                session.apply_is_playing(is_playing);
            }
        });
    }

    /// Open the window that withholds is-playing changes.
    pub(super) fn on_position_discontinuity(&self) {
        let window = self.config.discontinuity_suppression;
        self.suppression_window.arm(async move {
            time::sleep(window).await;
        });
    }

    /// Publish a settled is-playing value and start or stop polling with it.
    pub(super) fn apply_is_playing(self: &Arc<Self>, is_playing: bool) {
        let Some(engine) = self.engine().cloned() else {
            return;
        };

        let position = engine.current_position_ms();
        self.modify(|snapshot| {
            snapshot
                .with_playing(is_playing)
                .with_seek_position(position)
        });

        self.follow_is_playing(is_playing);
    }

    /// Poll while playing; checkpoint and stop polling otherwise.
    fn follow_is_playing(self: &Arc<Self>, is_playing: bool) {
        if is_playing {
            self.start_polling(self.config.poll_start_delay);
        } else {
            self.stop_polling();
            self.write_checkpoint();
        }
    }

    /// (Re)start the position polling loop after `warm_up`.
    ///
    /// The running loop, if any, is aborted first.
    pub(super) fn start_polling(self: &Arc<Self>, warm_up: time::Duration) {
        let generation = self.poll_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let weak = Arc::downgrade(self);
        let period = self.config.position_poll_interval;

        self.position_polling.arm(async move {
            time::sleep(warm_up).await;
            Self::poll_position(weak, generation, period).await;
        });
    }

    /// Stop the position polling loop.
    pub(super) fn stop_polling(&self) {
        self.poll_generation.fetch_add(1, Ordering::SeqCst);
        self.position_polling.cancel();
    }

    async fn poll_position(session: Weak<Self>, generation: u64, period: time::Duration) {
        let mut ticker = time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let Some(session) = session.upgrade() else {
                return;
            };
            if !session.poll_once(generation) {
                return;
            }
        }
    }

    /// Copy the engine position into the published snapshot.
    ///
    /// The position is only taken while the engine still sits on the
    /// snapshot's item; a transition not yet handled leaves it untouched.
    /// Returns `false` once there is no engine to poll.
    fn poll_once(&self, generation: u64) -> bool {
        let Some(engine) = self.engine() else {
            return false;
        };

        let moved = self.modify_if_current(generation, |snapshot| {
            if engine.current_index() != Some(snapshot.index()) {
                return snapshot.clone();
            }
            snapshot.with_seek_position(engine.current_position_ms())
        });
        if moved {
            trace!("Position {} ms", engine.current_position_ms());
        }

        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::services::{
        engine::{PlaybackEngine, SimulatedEngine},
        library::{MemoryTrackRepository, Track, TrackId},
        preferences::MemoryPreferences,
        session::{PlayerState, SessionConfig},
    };

    fn track(id: &str) -> Arc<Track> {
        Arc::new(Track {
            id: TrackId::new(id),
            title: format!("Title {id}"),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 120_000,
            path: format!("/music/{id}.mp3"),
            date_added: 0,
            genre: None,
            size_label: "2.00 MB".to_string(),
        })
    }

    fn loaded_session() -> (Arc<Session>, Arc<SimulatedEngine>) {
        let session = Arc::new(Session::new(
            Arc::new(MemoryTrackRepository::default()),
            Arc::new(MemoryPreferences::default()),
            SessionConfig::default(),
        ));
        let engine = SimulatedEngine::new();
        let handle: Arc<dyn PlaybackEngine> = engine.clone();
        assert!(session.engine.set(Arc::clone(&handle)).is_ok());

        let items = session.replace_queue(vec![track("a"), track("b")]);
        engine.set_queue(items);
        engine.prepare();
        let snapshot = session.snapshot_from_engine(handle.as_ref(), 0).unwrap();
        session.publish(PlayerState::Loaded(snapshot));

        (session, engine)
    }

    fn published_position(session: &Session) -> Option<u64> {
        session.state.get().snapshot().map(|s| s.seek_position_ms())
    }

    #[tokio::test(start_paused = true)]
    async fn poll_copies_the_position_of_the_current_item() {
        let (session, engine) = loaded_session();
        engine.play();
        time::sleep(Duration::from_millis(2_000)).await;

        let generation = session.poll_generation.load(Ordering::SeqCst);
        assert!(session.poll_once(generation));
        assert_eq!(published_position(&session), Some(2_000));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_ignores_an_engine_already_on_another_item() {
        let (session, engine) = loaded_session();
        engine.play();
        time::sleep(Duration::from_millis(2_000)).await;
        let generation = session.poll_generation.load(Ordering::SeqCst);
        session.poll_once(generation);

        engine.seek_to_item(1, 30_000);
        assert!(session.poll_once(generation));

        let state = session.state.get();
        assert_eq!(state.current_index(), Some(0));
        assert_eq!(published_position(&session), Some(2_000));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_leaves_the_snapshot_alone() {
        let (session, engine) = loaded_session();
        engine.play();
        time::sleep(Duration::from_millis(2_000)).await;

        let stale = session.poll_generation.load(Ordering::SeqCst);
        session.stop_polling();
        assert!(session.poll_once(stale));
        assert_eq!(published_position(&session), Some(0));
    }
}
