use super::sink::open_decoder;
use super::transport::{Clock, Transport};
use super::types::PlaybackInfo;
use super::*;
use std::fs;
use std::thread;
use std::time::Duration;

fn loaded(duration: Option<Duration>) -> Transport {
    let mut t = Transport::default();
    assert_eq!(t.loaded(Ok(duration)), AudioEvent::SourceReady);
    t
}

#[test]
fn clock_starts_stopped_at_zero() {
    let clock = Clock::default();
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(), Duration::ZERO);
}

#[test]
fn paused_clock_does_not_advance() {
    let mut clock = Clock::default();
    clock.reset(Duration::from_secs(42));
    let before = clock.elapsed();
    thread::sleep(Duration::from_millis(10));
    assert_eq!(clock.elapsed(), before);
    assert_eq!(before, Duration::from_secs(42));
}

#[test]
fn running_clock_accumulates_across_pauses() {
    let mut clock = Clock::default();
    clock.reset(Duration::from_secs(5));
    clock.start();
    thread::sleep(Duration::from_millis(15));
    clock.pause();
    let first = clock.elapsed();
    assert!(first >= Duration::from_millis(5_015));

    // A second start while running must not lose time.
    clock.start();
    clock.start();
    thread::sleep(Duration::from_millis(5));
    clock.pause();
    assert!(clock.elapsed() >= first + Duration::from_millis(5));
}

#[test]
fn reset_stops_the_clock() {
    let mut clock = Clock::default();
    clock.start();
    clock.reset(Duration::from_secs(1));
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(), Duration::from_secs(1));
}

#[test]
fn playback_error_messages_name_the_path() {
    let err = PlaybackError::Decode {
        path: "/tmp/x.mp3".into(),
        reason: "unrecognized format".into(),
    };
    assert_eq!(
        err.to_string(),
        "cannot decode /tmp/x.mp3: unrecognized format"
    );
    assert_eq!(
        PlaybackError::Disconnected.to_string(),
        "audio thread is not running"
    );
}

#[test]
fn playback_info_defaults_to_nothing_loaded() {
    let info = PlaybackInfo::default();
    assert!(info.duration.is_none());
    assert_eq!(info.elapsed, Duration::ZERO);
}

#[test]
fn missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.mp3");
    match open_decoder(&path) {
        Err(PlaybackError::Open { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Open, got {:?}", other.err()),
    }
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.mp3");
    fs::write(&path, b"this is not audio, just a few bytes of text").unwrap();
    match open_decoder(&path) {
        Err(PlaybackError::Decode { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Decode, got {:?}", other.err()),
    }
}

#[test]
fn failed_load_reports_failure_and_forgets_duration() {
    let mut t = loaded(Some(Duration::from_secs(90)));
    let err = PlaybackError::Open {
        path: "/music/gone.mp3".into(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    let event = t.loaded(Err(err));
    match event {
        AudioEvent::Failed(msg) => assert!(msg.contains("/music/gone.mp3"), "{msg}"),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(t.duration(), None);
    assert_eq!(t.elapsed(), Duration::ZERO);
    assert!(!t.is_running());
}

#[test]
fn load_starts_paused_at_zero() {
    let t = loaded(Some(Duration::from_secs(3)));
    assert_eq!(t.duration(), Some(Duration::from_secs(3)));
    assert_eq!(t.elapsed(), Duration::ZERO);
    assert!(!t.is_running());
    assert!(!t.needs_restart());
}

#[test]
fn tick_while_paused_reports_nothing() {
    let mut t = loaded(Some(Duration::from_secs(3)));
    assert!(t.tick(false).is_empty());
    assert!(t.tick(true).is_empty());
}

#[test]
fn tick_reports_position_then_end_once_drained() {
    let mut t = loaded(Some(Duration::from_secs(3)));
    t.play();
    assert_eq!(t.tick(false), vec![AudioEvent::Position]);

    assert_eq!(t.tick(true), vec![AudioEvent::Position, AudioEvent::Ended]);
    assert!(!t.is_running());
    assert_eq!(t.elapsed(), Duration::from_secs(3));
    assert!(t.needs_restart());

    // Nothing more until played again.
    assert!(t.tick(true).is_empty());
}

#[test]
fn replay_after_end_restarts_from_zero() {
    let mut t = loaded(Some(Duration::from_secs(3)));
    t.play();
    t.tick(true);
    assert!(t.needs_restart());

    t.repositioned(Duration::ZERO);
    assert!(!t.needs_restart());
    assert!(!t.is_running());
    assert_eq!(t.elapsed(), Duration::ZERO);
}

#[test]
fn seek_target_clamps_to_known_duration() {
    let t = loaded(Some(Duration::from_secs(3)));
    assert_eq!(t.seek_target(Duration::from_secs(5)), Duration::from_secs(3));
    assert_eq!(t.seek_target(Duration::from_secs(1)), Duration::from_secs(1));

    let unknown = loaded(None);
    assert_eq!(unknown.seek_target(Duration::from_secs(5)), Duration::from_secs(5));
}

#[test]
fn reposition_keeps_play_pause_state() {
    let mut paused = loaded(Some(Duration::from_secs(60)));
    paused.repositioned(Duration::from_secs(30));
    assert!(!paused.is_running());
    assert_eq!(paused.elapsed(), Duration::from_secs(30));

    let mut playing = loaded(Some(Duration::from_secs(60)));
    playing.play();
    playing.repositioned(Duration::from_secs(30));
    assert!(playing.is_running());
    assert!(playing.elapsed() >= Duration::from_secs(30));
}
