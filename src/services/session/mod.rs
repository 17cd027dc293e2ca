//! Playback session: keeps one observable [`PlayerState`] in step with a
//! [`PlaybackEngine`](crate::services::engine::PlaybackEngine).

mod controller;
mod core;
mod monitoring;
mod state;
mod sync;
mod types;

pub use controller::SessionController;
pub use state::{PlaybackSnapshot, PlayerState};
pub use types::{SessionConfig, SessionStatus};
