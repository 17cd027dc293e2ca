use crate::services::{common::RepeatMode, library::Track};

/// Engine-side representation of a queued track.
///
/// Built from a [`Track`] only when a queue is handed to the engine; the
/// controller never keeps a second list of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Identifier of the source track
    pub media_id: String,
    /// Locator the engine decodes from
    pub uri: String,
    /// Display title
    pub title: String,
    /// Length in milliseconds
    pub duration_ms: u64,
}

impl From<&Track> for MediaItem {
    fn from(track: &Track) -> Self {
        Self {
            media_id: track.id.as_str().to_string(),
            uri: track.path.clone(),
            title: track.title.clone(),
            duration_ms: track.duration_ms,
        }
    }
}

/// Callback raised by a playback engine.
///
/// Engines deliver these in order on a single listener queue.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The current media item changed (or the queue was replaced)
    ItemTransitioned {
        /// New current item index, `None` when the queue is empty
        index: Option<usize>,
    },

    /// Playback started or stopped
    IsPlayingChanged(bool),

    /// Shuffle was switched on or off
    ShuffleChanged(bool),

    /// Repeat mode changed
    RepeatModeChanged(RepeatMode),

    /// Position jumped (seek, repeat or automatic transition)
    PositionDiscontinuity,
}
