/// Shared reactive primitives and playback types
pub mod common;
/// Playback engine contract and the simulated engine
pub mod engine;
/// Track library and its repositories
pub mod library;
/// Persisted playback preferences
pub mod preferences;
/// Playback session controller
pub mod session;

pub use engine::{EngineEvent, MediaItem, PlaybackEngine, SimulatedEngine};
pub use library::{Track, TrackId, TrackRepository};
pub use preferences::PreferenceStore;
pub use session::{PlaybackSnapshot, PlayerState, SessionController, SessionStatus};
