//! MusicVibe - playback session synchronization for a track-list music player.
//!
//! The centrepiece is [`services::session::SessionController`], which keeps a
//! single observable [`services::session::PlayerState`] consistent with an
//! asynchronous playback engine, a track library and persisted preferences.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use musicvibe::services::{
//!     engine::{EngineError, PlaybackEngine, SimulatedEngine},
//!     library::{MemoryTrackRepository, TrackRepository},
//!     preferences::{MemoryPreferences, PreferenceStore},
//!     session::{SessionConfig, SessionController},
//! };
//!
//! # async fn demo() {
//! let engine: Arc<dyn PlaybackEngine> = SimulatedEngine::new();
//! let repository: Arc<dyn TrackRepository> = Arc::new(MemoryTrackRepository::default());
//! let preferences: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferences::default());
//!
//! let session = SessionController::start(
//!     async move { Ok::<_, EngineError>(engine) },
//!     repository,
//!     preferences,
//!     SessionConfig::default(),
//! );
//! session.wait_ready().await;
//! println!("{:?}", session.state());
//! # }
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Interactive command interface for driving a session.
pub mod cli;

/// Playback session, engine, library and preference services.
pub mod services;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{MusicVibeError, Result};
