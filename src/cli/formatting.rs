//! Terminal rendering of help text, errors, player states and the queue.

use std::sync::Arc;

use crate::services::{library::Track, session::PlayerState};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[1;31m";
    pub const GREEN: &str = "\x1b[1;32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[1;36m";
}

fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{}", ansi::RESET)
}

/// Help section title
pub fn format_header(text: &str) -> String {
    paint(ansi::CYAN, text)
}

/// Command name in help output
pub fn format_command(text: &str) -> String {
    paint(ansi::GREEN, text)
}

/// Muted text: descriptions and placeholder states
pub fn format_description(text: &str) -> String {
    paint(ansi::DIM, text)
}

/// Usage line in help output
pub fn format_usage(text: &str) -> String {
    paint(ansi::DIM, text)
}

/// Error line
pub fn format_error(text: &str) -> String {
    paint(ansi::RED, text)
}

/// Formats a millisecond position as `m:ss`
///
/// # Examples
///
/// ```
/// use musicvibe::cli::formatting::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(83_500), "1:23");
/// ```
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// One-line summary of a playback state.
pub fn format_state(state: &PlayerState) -> String {
    let snapshot = match state {
        PlayerState::Unloaded => return format_description("(loading)"),
        PlayerState::Empty => return format_description("(no tracks)"),
        PlayerState::Loaded(snapshot) => snapshot,
    };

    let track = snapshot.track();
    let status = if snapshot.is_playing() {
        paint(ansi::GREEN, "▶")
    } else {
        paint(ansi::YELLOW, "⏸")
    };

    let mut flags = Vec::new();
    if snapshot.shuffle_enabled() {
        flags.push("shuffle".to_string());
    }
    flags.push(format!("repeat {}", snapshot.repeat_mode()));

    format!(
        "{status} [{}] {} - {}  {}/{}  {}",
        snapshot.index() + 1,
        paint(ansi::BOLD, &track.title),
        track.artist,
        format_duration(snapshot.seek_position_ms()),
        format_duration(snapshot.track_length_ms()),
        format_description(&flags.join(", "))
    )
}

/// Numbered queue listing with the current track highlighted.
pub fn format_queue(queue: &[Arc<Track>], current: Option<usize>) -> String {
    if queue.is_empty() {
        return format_description("(queue is empty)");
    }

    queue
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let line = format!(
                "{:>3}. {} - {} ({}, {})",
                index + 1,
                track.title,
                track.artist,
                format_duration(track.duration_ms),
                track.size_label
            );

            if Some(index) == current {
                paint(ansi::BOLD, &line)
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
