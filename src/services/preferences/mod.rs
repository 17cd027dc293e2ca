//! Playback preferences: shuffle, repeat mode and the resume checkpoint.

mod error;
mod file;
mod store;
mod types;

pub use error::PreferenceError;
pub use file::FilePreferences;
pub use store::{MemoryPreferences, PreferenceStore};
pub use types::{Checkpoint, PlaybackPreferences};
