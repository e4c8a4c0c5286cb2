//! Now-playing scheduler: polling, change detection and failure handling.
#![allow(clippy::expect_used)]

use std::time::Duration;

use platform::mocks::{MockGateway, MockNowPlaying, MockRenderer};
use platform::{FrameOptions, GatewayResponse, SourceError, Track};
use slideshow::{CycleOutcome, NowPlayingScheduler, SchedulerError};

const POLL: Duration = Duration::from_secs(15);

type Scheduler = NowPlayingScheduler<MockNowPlaying, MockRenderer, MockGateway>;

fn track(title: &str) -> Track {
    Track::new(title, "Album", &["Artist"])
}

fn scheduler(source: MockNowPlaying, gateway: MockGateway) -> Scheduler {
    NowPlayingScheduler::new(source, MockRenderer::new(), gateway, FrameOptions::default(), POLL)
        .expect("scheduler")
}

#[tokio::test(start_paused = true)]
async fn test_startup_poll_shows_current_track() {
    let source = MockNowPlaying::new([Ok(Some(track("Intro")))], vec![]);
    let mut s = scheduler(source, MockGateway::always_ready());

    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Committed(track("Intro")));
    assert_eq!(s.shown(), Some(&track("Intro")));
    assert!(s.pending().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_falls_back_to_most_recent() {
    let source = MockNowPlaying::new([Ok(None)], vec![track("Last"), track("Older")]);
    let mut s = scheduler(source, MockGateway::always_ready());

    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Committed(track("Last")));
}

#[tokio::test(start_paused = true)]
async fn test_nothing_to_show_is_idle() {
    let source = MockNowPlaying::new([Ok(None)], vec![]);
    let mut s = scheduler(source, MockGateway::always_ready());

    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Idle);
    assert!(s.shown().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_same_title_any_case_does_not_redraw() {
    let source = MockNowPlaying::new([Ok(Some(track("Intro"))), Ok(Some(track("INTRO")))], vec![]);
    let mut s = scheduler(source, MockGateway::always_ready());
    s.run_cycle().await.expect("first");

    tokio::time::advance(POLL).await;
    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Idle);
    assert_eq!(s.gateway().log().commit_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_new_track_shown_after_poll_interval() {
    let source = MockNowPlaying::new([Ok(Some(track("One"))), Ok(Some(track("Two")))], vec![]);
    let polls = source.polls();
    let mut s = scheduler(source, MockGateway::always_ready());
    s.run_cycle().await.expect("first");

    tokio::time::advance(POLL - Duration::from_secs(1)).await;
    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Idle);
    assert_eq!(*polls.lock().expect("polls"), 1);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Committed(track("Two")));
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_retried_next_interval() {
    let source = MockNowPlaying::new(
        [
            Err(SourceError::Transient("feed missing".into())),
            Ok(Some(track("Back"))),
        ],
        vec![],
    );
    let mut s = scheduler(source, MockGateway::always_ready());

    assert_eq!(s.run_cycle().await.expect("transient is not fatal"), CycleOutcome::Idle);
    tokio::time::advance(POLL).await;
    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Committed(track("Back")));
}

#[tokio::test(start_paused = true)]
async fn test_fatal_source_error_ends_loop() {
    let source = MockNowPlaying::new([Err(SourceError::Fatal("permission denied".into()))], vec![]);
    let s = scheduler(source, MockGateway::always_ready());

    let err = s.run().await.expect_err("loop must end");
    assert!(matches!(err, SchedulerError::Source(SourceError::Fatal(_))));
}

#[tokio::test(start_paused = true)]
async fn test_not_ready_recommits_without_rerender() {
    let source = MockNowPlaying::new([Ok(Some(track("Slow")))], vec![]);
    let gateway = MockGateway::new([GatewayResponse::NotReady(Duration::from_secs(5))]);
    let log = gateway.log();
    let mut s = scheduler(source, gateway);

    assert!(matches!(
        s.run_cycle().await.expect("cycle"),
        CycleOutcome::Retrying { wait, .. } if wait == Duration::from_secs(5)
    ));
    assert_eq!(s.pending(), Some(&track("Slow")));

    assert_eq!(s.run_cycle().await.expect("cycle"), CycleOutcome::Committed(track("Slow")));
    let record = log.snapshot();
    assert_eq!(record.frames_set, 1);
    assert!(record.commits[1] - record.commits[0] >= Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_gateway_error_ends_loop() {
    let source = MockNowPlaying::new([Ok(Some(track("Any")))], vec![]);
    let s = scheduler(source, MockGateway::new([GatewayResponse::Error("no frame to display".into())]));

    let err = s.run().await.expect_err("loop must end");
    assert!(matches!(err, SchedulerError::Gateway(_)));
}
