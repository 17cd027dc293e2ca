/// Playback session commands
pub mod playback;
