//! Common utilities and abstractions for services

/// Reactive property system for fine-grained state updates
pub mod property;
/// Cancellable single-occupant task slots
pub mod timer;
/// Value types shared by several services
pub mod types;

pub use property::Property;
pub use timer::TimerSlot;
pub use types::RepeatMode;
