//! Unit tests for CLI module
//!
//! Tests position parsing, formatting, and command dispatch against an
//! in-process session.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::{sync::Arc, time::Duration};

use crate::{
    cli::{
        CliError, CliService, LineOutcome,
        commands::playback::SeekCommand,
        formatting::{format_duration, format_queue},
    },
    services::{
        engine::{EngineError, PlaybackEngine, SimulatedEngine},
        library::{MemoryTrackRepository, Track, TrackId, TrackRepository},
        preferences::{MemoryPreferences, PreferenceStore},
        session::{SessionConfig, SessionController, SessionStatus},
    },
};

fn track(id: &str, title: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: title.to_string(),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        duration_ms: 180_000,
        path: format!("/music/{id}.mp3"),
        date_added: 0,
        genre: None,
        size_label: "3.00 MB".to_string(),
    }
}

async fn session(titles: &[&str]) -> SessionController {
    let tracks = titles
        .iter()
        .enumerate()
        .map(|(index, title)| track(&index.to_string(), title))
        .collect();
    let repository: Arc<dyn TrackRepository> = Arc::new(MemoryTrackRepository::new(tracks));
    let preferences: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferences::default());
    let engine: Arc<dyn PlaybackEngine> = SimulatedEngine::new();

    let controller = SessionController::start(
        async move { Ok::<_, EngineError>(engine) },
        repository,
        preferences,
        SessionConfig::default(),
    );
    assert_eq!(controller.wait_ready().await, SessionStatus::Ready);
    controller
}

#[test]
fn parse_position_formats() {
    let length = Duration::from_secs(200);
    let current = Duration::from_secs(60);

    let parse = |input| SeekCommand::parse_position(input, current, length).unwrap();

    assert_eq!(parse("30"), Duration::from_secs(30));
    assert_eq!(parse("1:30"), Duration::from_secs(90));
    assert_eq!(parse("50%"), Duration::from_secs(100));
    assert_eq!(parse("+10"), Duration::from_secs(70));
    assert_eq!(parse("-90"), Duration::ZERO);
    assert_eq!(parse("+500"), length);
}

#[test]
fn parse_position_rejects_garbage() {
    let length = Duration::from_secs(200);

    for input in ["abc", "1:75", "150%", "+x", "1:2:3", "307445734561825861:00"] {
        let result = SeekCommand::parse_position(input, Duration::ZERO, length);
        assert!(
            matches!(result, Err(CliError::InvalidArgument { .. })),
            "{input} should be rejected"
        );
    }
}

#[test]
fn format_duration_minutes_and_seconds() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(59_999), "0:59");
    assert_eq!(format_duration(3_600_000), "60:00");
}

#[test]
fn format_queue_numbers_from_one() {
    let queue = vec![Arc::new(track("a", "First")), Arc::new(track("b", "Second"))];
    let listing = format_queue(&queue, None);

    assert!(listing.contains("  1. First - Artist (3:00, 3.00 MB)"));
    assert!(listing.contains("  2. Second"));
}

#[tokio::test]
async fn blank_and_quit_lines() {
    let cli = CliService::new();
    let session = session(&["A"]).await;

    assert_eq!(cli.execute_line(&session, "   ").await.unwrap(), LineOutcome::Nothing);
    assert_eq!(cli.execute_line(&session, "quit").await.unwrap(), LineOutcome::Quit);
}

#[tokio::test]
async fn unknown_command_is_reported() {
    let cli = CliService::new();
    let session = session(&["A"]).await;

    let result = cli.execute_line(&session, "dance").await;
    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}

#[tokio::test]
async fn argument_count_is_validated() {
    let cli = CliService::new();
    let session = session(&["A"]).await;

    let missing = cli.execute_line(&session, "seek").await;
    assert!(matches!(missing, Err(CliError::InvalidArguments(_))));

    let extra = cli.execute_line(&session, "next now please").await;
    assert!(matches!(extra, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn commands_drive_the_session() {
    let cli = CliService::new();
    let session = session(&["A", "B", "C"]).await;

    cli.execute_line(&session, "seek 1:00").await.unwrap();
    assert_eq!(
        session.state().snapshot().map(|s| s.seek_position_ms()),
        Some(60_000)
    );

    let output = cli.execute_line(&session, "repeat").await.unwrap();
    assert_eq!(output, LineOutcome::Output("Repeat all".to_string()));

    cli.execute_line(&session, "shuffle on").await.unwrap();
    assert_eq!(
        session.state().snapshot().map(|s| s.shuffle_enabled()),
        Some(true)
    );

    cli.execute_line(&session, "goto 3").await.unwrap();
    assert!(session.state().is_playing());

    let out_of_range = cli.execute_line(&session, "goto 9").await;
    assert!(matches!(out_of_range, Err(CliError::InvalidArgument { .. })));
}

#[tokio::test]
async fn aliases_resolve() {
    let cli = CliService::new();
    let session = session(&["A", "B"]).await;

    let output = cli.execute_line(&session, "ls").await.unwrap();
    let LineOutcome::Output(listing) = output else {
        panic!("queue should print a listing");
    };
    assert!(listing.contains("A - Artist"));
    assert!(listing.contains("B - Artist"));
}

#[test]
fn help_lists_every_command() {
    let cli = CliService::new();
    let names = cli.list_all();

    for name in [
        "delete", "goto", "next", "pause", "play", "prev", "queue", "repeat", "rescan", "seek",
        "shuffle", "state", "toggle",
    ] {
        assert!(names.iter().any(|n| n == name), "missing {name}");
    }
}
