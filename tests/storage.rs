//! Integration tests for the file-backed library index and preference store.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;

use musicvibe::{
    MusicVibeError,
    services::{
        common::RepeatMode,
        library::{IndexTrackRepository, LibraryError, TrackId, TrackRepository},
        preferences::{Checkpoint, FilePreferences, PreferenceStore},
    },
};
use serde_json::json;
use tempfile::TempDir;

fn write_index(dir: &TempDir, entries: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("library.json");
    fs::write(&path, serde_json::to_string_pretty(&entries).unwrap()).unwrap();
    path
}

fn entry(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "artist": "Artist",
        "album": "Album",
        "duration_ms": 200_000,
        "path": format!("/music/{id}.flac"),
        "date_added": 1_700_000_000,
        "size_bytes": 5_242_880,
    })
}

mod library_index {
    use super::*;

    #[tokio::test]
    async fn lists_valid_tracks_sorted_by_title() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            json!([
                entry("2", "Zebra"),
                entry("1", "Apple"),
                { "id": "3", "title": "Broken", "duration_ms": 0, "path": "/x.mp3" },
                { "title": "No id" },
            ]),
        );

        let repository = IndexTrackRepository::new(&path);
        let tracks = repository.list_tracks().await;

        let titles: Vec<_> = tracks.iter().map(|track| track.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Zebra"]);
        assert_eq!(tracks[0].size_label, "5.00 MB");
    }

    #[tokio::test]
    async fn repeated_ids_keep_the_first_record() {
        let dir = TempDir::new().unwrap();
        let path = write_index(
            &dir,
            json!([
                entry("a", "A"),
                entry("x", "B"),
                entry("c", "C"),
                entry("x", "D"),
            ]),
        );

        let tracks = IndexTrackRepository::new(&path).list_tracks().await;

        let titles: Vec<_> = tracks.iter().map(|track| track.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn missing_index_lists_nothing_but_scan_reports_it() {
        let dir = TempDir::new().unwrap();
        let repository = IndexTrackRepository::new(dir.path().join("missing.json"));

        assert!(repository.list_tracks().await.is_empty());
        assert!(matches!(
            repository.scan().await,
            Err(LibraryError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_index_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, "{ not json").unwrap();

        let error: MusicVibeError = IndexTrackRepository::new(&path)
            .scan()
            .await
            .unwrap_err()
            .into();
        assert!(matches!(
            error,
            MusicVibeError::Library(LibraryError::IndexParse { .. })
        ));
    }

    #[tokio::test]
    async fn delete_rewrites_the_index() {
        let dir = TempDir::new().unwrap();
        let path = write_index(&dir, json!([entry("1", "One"), entry("2", "Two")]));
        let repository = IndexTrackRepository::new(&path);

        let tracks = repository.list_tracks().await;
        assert!(repository.delete(&tracks[0]).await);
        assert!(!repository.delete(&tracks[0]).await);

        let remaining = repository.list_tracks().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, TrackId::new("2"));
    }
}

mod memory_library {
    use super::*;
    use musicvibe::services::library::{MemoryTrackRepository, Track};

    fn track(id: &str, title: &str) -> Track {
        Track {
            id: TrackId::new(id),
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 1_000,
            path: format!("/music/{id}.mp3"),
            date_added: 0,
            genre: None,
            size_label: "1.00 KB".to_string(),
        }
    }

    #[tokio::test]
    async fn repeated_ids_keep_the_first_track() {
        let repository = MemoryTrackRepository::new(vec![
            track("x", "Zulu"),
            track("a", "Alpha"),
            track("x", "Bravo"),
        ]);

        let titles: Vec<_> = repository
            .list_tracks()
            .await
            .into_iter()
            .map(|track| track.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Zulu"]);

        repository.replace(vec![track("y", "One"), track("y", "Two")]);
        assert_eq!(repository.list_tracks().await.len(), 1);
    }
}

mod preference_file {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let preferences = FilePreferences::open(dir.path().join("prefs.json"));

        assert!(!preferences.shuffle_enabled());
        assert_eq!(preferences.repeat_mode(), RepeatMode::Off);
        assert_eq!(preferences.last_played(), None);
    }

    #[test]
    fn values_survive_reopening() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let preferences = FilePreferences::open(&path);
        preferences.set_shuffle_enabled(true);
        preferences.set_repeat_mode(RepeatMode::One);
        preferences.store_last_played(Checkpoint {
            track_id: TrackId::new("42"),
            position_ms: 12_345,
        });

        let reopened = FilePreferences::open(&path);
        assert!(reopened.shuffle_enabled());
        assert_eq!(reopened.repeat_mode(), RepeatMode::One);
        assert_eq!(
            reopened.last_played(),
            Some(Checkpoint {
                track_id: TrackId::new("42"),
                position_ms: 12_345,
            })
        );
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let preferences = FilePreferences::open(&path);
        assert_eq!(preferences.repeat_mode(), RepeatMode::Off);

        preferences.set_repeat_mode(RepeatMode::All);
        assert_eq!(FilePreferences::open(&path).repeat_mode(), RepeatMode::All);
    }
}
