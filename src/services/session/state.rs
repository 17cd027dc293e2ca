use std::sync::Arc;

use crate::services::{common::RepeatMode, library::Track};

/// Observable playback state shared by every UI surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PlayerState {
    /// The session has not finished loading (or its engine never became available)
    #[default]
    Unloaded,

    /// The library holds no playable track
    Empty,

    /// A queue is loaded and one of its tracks is current
    Loaded(PlaybackSnapshot),
}

impl PlayerState {
    /// The loaded snapshot, if any
    pub fn snapshot(&self) -> Option<&PlaybackSnapshot> {
        match self {
            Self::Loaded(snapshot) => Some(snapshot),
            Self::Unloaded | Self::Empty => None,
        }
    }

    /// Queue position of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.snapshot().map(PlaybackSnapshot::index)
    }

    /// The current track
    pub fn current_track(&self) -> Option<&Arc<Track>> {
        self.snapshot().map(PlaybackSnapshot::track)
    }

    /// Whether the current track is playing
    pub fn is_playing(&self) -> bool {
        self.snapshot().is_some_and(PlaybackSnapshot::is_playing)
    }

    /// Whether this is the terminal "nothing to play" state
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Immutable view of the current track and transport controls.
///
/// The seek position never exceeds the track length; every constructor and
/// modifier clamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    index: usize,
    track: Arc<Track>,
    is_playing: bool,
    shuffle_enabled: bool,
    repeat_mode: RepeatMode,
    seek_position_ms: u64,
    track_length_ms: u64,
    is_next_enabled: bool,
    is_previous_enabled: bool,
}

/// Transport flags read from the engine when a snapshot is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Transport {
    pub is_playing: bool,
    pub shuffle_enabled: bool,
    pub repeat_mode: RepeatMode,
    pub is_next_enabled: bool,
    pub is_previous_enabled: bool,
}

impl PlaybackSnapshot {
    pub(crate) fn new(
        index: usize,
        track: Arc<Track>,
        transport: Transport,
        seek_position_ms: u64,
    ) -> Self {
        let track_length_ms = track.duration_ms;

        Self {
            index,
            track,
            is_playing: transport.is_playing,
            shuffle_enabled: transport.shuffle_enabled,
            repeat_mode: transport.repeat_mode,
            seek_position_ms: seek_position_ms.min(track_length_ms),
            track_length_ms,
            is_next_enabled: transport.is_next_enabled,
            is_previous_enabled: transport.is_previous_enabled,
        }
    }

    /// Queue position of the current track
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current track
    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether shuffle is on
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Active repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Playback position within the track, in milliseconds
    pub fn seek_position_ms(&self) -> u64 {
        self.seek_position_ms
    }

    /// Length of the current track, in milliseconds
    pub fn track_length_ms(&self) -> u64 {
        self.track_length_ms
    }

    /// Whether "next" would move to another item
    pub fn is_next_enabled(&self) -> bool {
        self.is_next_enabled
    }

    /// Whether "previous" would move to another item
    pub fn is_previous_enabled(&self) -> bool {
        self.is_previous_enabled
    }

    pub(crate) fn with_seek_position(&self, position_ms: u64) -> Self {
        Self {
            seek_position_ms: position_ms.min(self.track_length_ms),
            ..self.clone()
        }
    }

    pub(crate) fn with_playing(&self, is_playing: bool) -> Self {
        Self {
            is_playing,
            ..self.clone()
        }
    }

    pub(crate) fn with_transport(&self, transport: Transport) -> Self {
        Self {
            is_playing: transport.is_playing,
            shuffle_enabled: transport.shuffle_enabled,
            repeat_mode: transport.repeat_mode,
            is_next_enabled: transport.is_next_enabled,
            is_previous_enabled: transport.is_previous_enabled,
            ..self.clone()
        }
    }

    pub(crate) fn transport(&self) -> Transport {
        Transport {
            is_playing: self.is_playing,
            shuffle_enabled: self.shuffle_enabled,
            repeat_mode: self.repeat_mode,
            is_next_enabled: self.is_next_enabled,
            is_previous_enabled: self.is_previous_enabled,
        }
    }
}
