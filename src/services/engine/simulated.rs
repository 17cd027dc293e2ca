use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};

use rand::seq::SliceRandom;
use tokio::{sync::broadcast, task::JoinHandle, time::Instant};
use tracing::{debug, instrument, warn};

use super::{EngineEvent, MediaItem, PlaybackEngine};
use crate::services::common::RepeatMode;

const EVENT_BUFFER: usize = 128;
const CLOCK_TICK: Duration = Duration::from_millis(50);
const PREVIOUS_RESTART_THRESHOLD_MS: u64 = 3000;

/// Playback engine that keeps time with the tokio clock instead of decoding
/// audio.
///
/// It follows the same transport rules as a real engine: shuffle reorders the
/// playback order, repeat modes govern next/previous availability and what
/// happens at the end of a track, and transitions while playing report the
/// brief `false`→`true` is-playing blip real engines produce while buffering.
/// Position only advances to the end of a track by itself once
/// [`SimulatedEngine::start_clock`] has been called.
#[derive(Debug)]
pub struct SimulatedEngine {
    deck: Mutex<Deck>,
    events: broadcast::Sender<EngineEvent>,
}

#[derive(Debug, Default)]
struct Deck {
    items: Vec<MediaItem>,
    order: Vec<usize>,
    current: Option<usize>,
    playing: bool,
    position_ms: u64,
    since: Option<Instant>,
    shuffle: bool,
    repeat: RepeatMode,
    prepared: bool,
    queue_sets: usize,
}

impl Deck {
    fn duration_ms(&self) -> u64 {
        self.current
            .and_then(|index| self.items.get(index))
            .map_or(0, |item| item.duration_ms)
    }

    fn position_ms(&self) -> u64 {
        let elapsed = match (self.playing, self.since) {
            (true, Some(since)) => since.elapsed().as_millis() as u64,
            _ => 0,
        };

        (self.position_ms + elapsed).min(self.duration_ms())
    }

    fn freeze_position(&mut self) {
        self.position_ms = self.position_ms();
        self.since = self.playing.then(Instant::now);
    }

    fn order_position(&self) -> Option<usize> {
        let current = self.current?;
        self.order.iter().position(|&index| index == current)
    }

    fn next_index(&self) -> Option<usize> {
        let position = self.order_position()?;

        match self.order.get(position + 1) {
            Some(&index) => Some(index),
            None if self.repeat == RepeatMode::All => self.order.first().copied(),
            None => None,
        }
    }

    fn previous_index(&self) -> Option<usize> {
        let position = self.order_position()?;

        match position.checked_sub(1) {
            Some(previous) => self.order.get(previous).copied(),
            None if self.repeat == RepeatMode::All => self.order.last().copied(),
            None => None,
        }
    }

    fn rebuild_order(&mut self) {
        let mut order: Vec<usize> = (0..self.items.len()).collect();

        if self.shuffle {
            order.shuffle(&mut rand::thread_rng());
            if let Some(current) = self.current {
                order.retain(|&index| index != current);
                order.insert(0, current);
            }
        }

        self.order = order;
    }

    fn move_to(&mut self, index: usize, position_ms: u64) -> Vec<EngineEvent> {
        let changed = self.current != Some(index);

        self.current = Some(index);
        self.position_ms = position_ms.min(self.duration_ms());
        self.since = self.playing.then(Instant::now);

        let mut events = vec![EngineEvent::PositionDiscontinuity];
        if changed {
            events.push(EngineEvent::ItemTransitioned { index: Some(index) });
            if self.playing {
                events.push(EngineEvent::IsPlayingChanged(false));
                events.push(EngineEvent::IsPlayingChanged(true));
            }
        }

        events
    }

    fn set_playing(&mut self, playing: bool) -> Vec<EngineEvent> {
        if self.playing == playing || (playing && self.current.is_none()) {
            return Vec::new();
        }

        self.freeze_position();
        self.playing = playing;
        self.since = playing.then(Instant::now);

        vec![EngineEvent::IsPlayingChanged(playing)]
    }

    fn advance_if_ended(&mut self) -> Vec<EngineEvent> {
        let duration = self.duration_ms();
        if !self.playing || duration == 0 || self.position_ms() < duration {
            return Vec::new();
        }

        let Some(current) = self.current else {
            return Vec::new();
        };

        if self.repeat == RepeatMode::One {
            self.position_ms = 0;
            self.since = Some(Instant::now());
            return vec![
                EngineEvent::PositionDiscontinuity,
                EngineEvent::ItemTransitioned {
                    index: Some(current),
                },
            ];
        }

        match self.next_index() {
            Some(next) => {
                self.current = Some(next);
                self.position_ms = 0;
                self.since = Some(Instant::now());
                vec![
                    EngineEvent::PositionDiscontinuity,
                    EngineEvent::ItemTransitioned { index: Some(next) },
                ]
            }
            None => {
                self.position_ms = duration;
                self.playing = false;
                self.since = None;
                vec![EngineEvent::IsPlayingChanged(false)]
            }
        }
    }
}

impl Default for SimulatedEngine {
    fn default() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            deck: Mutex::new(Deck::default()),
            events,
        }
    }
}

impl SimulatedEngine {
    /// Create an engine with an empty queue.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Start the clock task that ends tracks and auto-advances the queue.
    ///
    /// The task stops on its own once the engine is dropped.
    #[instrument(skip(self))]
    pub fn start_clock(self: &Arc<Self>) -> JoinHandle<()> {
        let weak = Arc::downgrade(self);
        tokio::spawn(async move { Self::run_clock(weak).await })
    }

    async fn run_clock(engine: Weak<Self>) {
        let mut ticker = tokio::time::interval(CLOCK_TICK);

        loop {
            ticker.tick().await;

            let Some(engine) = engine.upgrade() else {
                debug!("Engine dropped, stopping clock");
                return;
            };

            let events = engine.with_deck(Deck::advance_if_ended);
            engine.emit_all(events);
        }
    }

    /// Deliver an engine callback to every listener.
    ///
    /// Platform glue uses this to forward callbacks the engine raised on its
    /// own, e.g. from a notification or a headset button.
    pub fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(event);
    }

    /// Media ids of the queued items, in queue order
    pub fn media_ids(&self) -> Vec<String> {
        self.with_deck(|deck| {
            deck.items
                .iter()
                .map(|item| item.media_id.clone())
                .collect()
        })
    }

    /// Number of times a queue was handed to this engine
    pub fn queue_sets(&self) -> usize {
        self.with_deck(|deck| deck.queue_sets)
    }

    /// Whether [`PlaybackEngine::prepare`] was called since the last queue change
    pub fn is_prepared(&self) -> bool {
        self.with_deck(|deck| deck.prepared)
    }

    fn lock(&self) -> MutexGuard<'_, Deck> {
        self.deck
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_deck<R>(&self, apply: impl FnOnce(&mut Deck) -> R) -> R {
        let mut deck = self.lock();
        apply(&mut deck)
    }

    fn emit_all(&self, events: Vec<EngineEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

impl PlaybackEngine for SimulatedEngine {
    fn set_queue(&self, items: Vec<MediaItem>) {
        let events = self.with_deck(|deck| {
            let mut events = Vec::new();
            if deck.playing {
                events.push(EngineEvent::IsPlayingChanged(false));
            }

            deck.current = (!items.is_empty()).then_some(0);
            deck.items = items;
            deck.playing = false;
            deck.position_ms = 0;
            deck.since = None;
            deck.prepared = false;
            deck.queue_sets += 1;
            deck.rebuild_order();

            events.push(EngineEvent::ItemTransitioned {
                index: deck.current,
            });
            events
        });

        self.emit_all(events);
    }

    fn prepare(&self) {
        self.with_deck(|deck| deck.prepared = deck.current.is_some());
    }

    fn play(&self) {
        let events = self.with_deck(|deck| deck.set_playing(true));
        self.emit_all(events);
    }

    fn pause(&self) {
        let events = self.with_deck(|deck| deck.set_playing(false));
        self.emit_all(events);
    }

    fn seek_to_item(&self, index: usize, position_ms: u64) {
        let events = self.with_deck(|deck| {
            if index >= deck.items.len() {
                warn!("Seek to item {index} ignored, queue has {} items", deck.items.len());
                return Vec::new();
            }
            deck.move_to(index, position_ms)
        });

        self.emit_all(events);
    }

    fn seek_to(&self, position_ms: u64) {
        let events = self.with_deck(|deck| {
            if deck.current.is_none() {
                return Vec::new();
            }
            deck.position_ms = position_ms.min(deck.duration_ms());
            deck.since = deck.playing.then(Instant::now);
            vec![EngineEvent::PositionDiscontinuity]
        });

        self.emit_all(events);
    }

    fn seek_to_next(&self) {
        let events = self.with_deck(|deck| match deck.next_index() {
            Some(next) => deck.move_to(next, 0),
            None => Vec::new(),
        });

        self.emit_all(events);
    }

    fn seek_to_previous(&self) {
        let events = self.with_deck(|deck| {
            let Some(current) = deck.current else {
                return Vec::new();
            };

            match deck.previous_index() {
                Some(previous) if deck.position_ms() <= PREVIOUS_RESTART_THRESHOLD_MS => {
                    deck.move_to(previous, 0)
                }
                _ => deck.move_to(current, 0),
            }
        });

        self.emit_all(events);
    }

    fn has_next(&self) -> bool {
        self.with_deck(|deck| deck.next_index().is_some())
    }

    fn has_previous(&self) -> bool {
        self.with_deck(|deck| deck.previous_index().is_some())
    }

    fn shuffle_enabled(&self) -> bool {
        self.with_deck(|deck| deck.shuffle)
    }

    fn set_shuffle_enabled(&self, enabled: bool) {
        let changed = self.with_deck(|deck| {
            if deck.shuffle == enabled {
                return false;
            }
            deck.shuffle = enabled;
            deck.rebuild_order();
            true
        });

        if changed {
            self.emit(EngineEvent::ShuffleChanged(enabled));
        }
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.with_deck(|deck| deck.repeat)
    }

    fn set_repeat_mode(&self, mode: RepeatMode) {
        let changed = self.with_deck(|deck| {
            let changed = deck.repeat != mode;
            deck.repeat = mode;
            changed
        });

        if changed {
            self.emit(EngineEvent::RepeatModeChanged(mode));
        }
    }

    fn current_index(&self) -> Option<usize> {
        self.with_deck(|deck| deck.current)
    }

    fn current_position_ms(&self) -> u64 {
        self.with_deck(|deck| deck.position_ms())
    }

    fn is_playing(&self) -> bool {
        self.with_deck(|deck| deck.playing)
    }

    fn item_count(&self) -> usize {
        self.with_deck(|deck| deck.items.len())
    }

    fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}
