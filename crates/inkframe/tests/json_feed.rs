//! JSON feed source and the now-playing loop on top of it.
#![allow(clippy::expect_used)]

use std::time::Duration;

use inkframe::{FrameRenderer, JsonFileSource};
use platform::mocks::MockGateway;
use platform::{FrameOptions, NowPlayingSource, SourceError, Track};
use slideshow::{CycleOutcome, NowPlayingScheduler};

const FEED: &str = r#"{
    "current": {
        "title": "Hey Jude",
        "album": "1",
        "artist": "The Beatles",
        "album_cover_url_300px": "https://i.scdn.co/image/300",
        "is_loved": true
    },
    "recent": [
        { "title": "Let It Be", "artist": "The Beatles" },
        { "title": "Something", "artist": "The Beatles" }
    ]
}"#;

#[tokio::test]
async fn test_reads_current_track() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feed.json");
    std::fs::write(&path, FEED).expect("write feed");

    let mut source = JsonFileSource::new(&path);
    let current = source.current().await.expect("poll").expect("playing");
    assert_eq!(current.title, "Hey Jude");
    assert_eq!(current.is_loved, Some(true));
    assert_eq!(current.album_cover_url_640px, None);
}

#[tokio::test]
async fn test_most_recent_respects_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feed.json");
    std::fs::write(&path, FEED).expect("write feed");

    let mut source = JsonFileSource::new(&path);
    let recent = source.most_recent(1).await.expect("poll");
    assert_eq!(recent, vec![Track::new("let it be", "", &[])]);
}

#[tokio::test]
async fn test_null_current_is_nothing_playing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feed.json");
    std::fs::write(&path, r#"{ "current": null }"#).expect("write feed");

    let mut source = JsonFileSource::new(&path);
    assert_eq!(source.current().await.expect("poll"), None);
    assert!(source.most_recent(1).await.expect("poll").is_empty());
}

#[tokio::test]
async fn test_missing_file_is_transient() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut source = JsonFileSource::new(dir.path().join("absent.json"));
    let err = source.current().await.expect_err("no file");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_half_written_file_is_transient() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feed.json");
    std::fs::write(&path, &FEED[..40]).expect("write feed");

    let err = JsonFileSource::new(&path).current().await.expect_err("truncated");
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_directory_in_place_of_feed_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = JsonFileSource::new(dir.path()).current().await.expect_err("a directory");
    assert!(matches!(err, SourceError::Fatal(_)));
}

#[tokio::test]
async fn test_feed_to_committed_card() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("feed.json");
    std::fs::write(&path, FEED).expect("write feed");

    let gateway = MockGateway::always_ready();
    let log = gateway.log();
    let mut scheduler = NowPlayingScheduler::new(
        JsonFileSource::new(&path),
        FrameRenderer::default(),
        gateway,
        FrameOptions::default(),
        Duration::from_secs(15),
    )
    .expect("scheduler");

    let outcome = scheduler.run_cycle().await.expect("cycle");
    assert_eq!(outcome, CycleOutcome::Committed(Track::new("Hey Jude", "", &[])));
    assert_eq!(log.commit_count(), 1);
    assert_eq!(log.snapshot().frames_set, 1);
}
