//! Track library: the ordered list of playable tracks and its storage.

mod error;
mod index;
mod repository;
mod track;

pub use error::LibraryError;
pub use index::IndexTrackRepository;
pub use repository::{MemoryTrackRepository, TrackRepository};
pub use track::{Track, TrackId, TrackRecord, readable_size};
