//! Playback engine contract consumed by the session controller.

mod error;
/// In-process engine implementation driven by the tokio clock
pub mod simulated;
mod types;

pub use error::EngineError;
pub use simulated::SimulatedEngine;
pub use types::{EngineEvent, MediaItem};

use tokio::sync::broadcast;

use crate::services::common::RepeatMode;

/// Platform playback engine: decodes and renders audio, exposes transport
/// controls and reports changes as [`EngineEvent`]s.
///
/// Every command is fire-and-forget; engines confirm state changes through
/// their event stream.
pub trait PlaybackEngine: Send + Sync {
    /// Replace the queue with `items`, in order
    fn set_queue(&self, items: Vec<MediaItem>);

    /// Prepare the current item for playback
    fn prepare(&self);

    /// Start or resume playback
    fn play(&self);

    /// Pause playback
    fn pause(&self);

    /// Jump to the item at `index` and position it at `position_ms`
    fn seek_to_item(&self, index: usize, position_ms: u64);

    /// Move the current item to `position_ms`
    fn seek_to(&self, position_ms: u64);

    /// Advance to the next item
    fn seek_to_next(&self);

    /// Go back to the previous item (or restart the current one)
    fn seek_to_previous(&self);

    /// Whether a next item exists under the current shuffle/repeat settings
    fn has_next(&self) -> bool;

    /// Whether a previous item exists under the current shuffle/repeat settings
    fn has_previous(&self) -> bool;

    /// Whether shuffle is on
    fn shuffle_enabled(&self) -> bool;

    /// Switch shuffle on or off
    fn set_shuffle_enabled(&self, enabled: bool);

    /// Current repeat mode
    fn repeat_mode(&self) -> RepeatMode;

    /// Change the repeat mode
    fn set_repeat_mode(&self, mode: RepeatMode);

    /// Index of the current item, `None` when the queue is empty
    fn current_index(&self) -> Option<usize>;

    /// Position in the current item, in milliseconds
    fn current_position_ms(&self) -> u64;

    /// Whether audio is currently playing
    fn is_playing(&self) -> bool;

    /// Number of queued items
    fn item_count(&self) -> usize;

    /// Register a listener for engine callbacks
    fn subscribe(&self) -> broadcast::Receiver<EngineEvent>;
}
