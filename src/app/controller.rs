//! The playback controller.
//!
//! Owns the playlist, the playback state and the playback handle. Every
//! mutation is published to subscribers as a fresh `PlaybackState`
//! snapshot; views render on notification and never touch the handle.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{AudioEvent, PlaybackError, PlaybackHandle};
use crate::library::{LocatorRegistry, Playlist, Track, UploadedFile};

use super::format_time;
use super::intent::Intent;
use super::state::PlaybackState;

/// Seek bar position for `current` out of `duration`. Unknown or zero
/// durations give 0 rather than NaN.
fn progress_percent(current: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(total) if !total.is_zero() => {
            (current.as_secs_f64() / total.as_secs_f64() * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

pub struct Controller<H: PlaybackHandle> {
    playlist: Playlist,
    state: PlaybackState,
    handle: H,
    locators: LocatorRegistry,
    /// Play as soon as the handle reports the new source ready.
    start_when_ready: bool,
    /// A load was issued and the handle has not answered yet; its
    /// duration and position still describe the previous source.
    loading: bool,
    subscribers: Vec<Sender<PlaybackState>>,
}

impl<H: PlaybackHandle> Controller<H> {
    pub fn new(playlist: Playlist, handle: H, volume: f32) -> Self {
        Self {
            playlist,
            state: PlaybackState::new(volume),
            handle,
            locators: LocatorRegistry::new(),
            start_when_ready: false,
            loading: false,
            subscribers: Vec::new(),
        }
    }

    /// Receive a snapshot after every state change, starting with the
    /// current one.
    pub fn subscribe(&mut self) -> Receiver<PlaybackState> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.state.clone());
        self.subscribers.push(tx);
        rx
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.state.current_index]
    }

    pub fn elapsed_text(&self) -> String {
        format_time(self.handle.current_time().as_secs_f64())
    }

    pub fn total_text(&self) -> String {
        format_time(self.handle.duration().map_or(f64::NAN, |d| d.as_secs_f64()))
    }

    fn publish(&mut self) {
        let snapshot = &self.state;
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    fn report(&mut self, context: &str, err: PlaybackError) {
        warn!(error = %err, "{context}");
        self.state.notice = Some(format!("{context}: {err}"));
    }

    /// Point the handle at the current track. Returns whether the switch
    /// was issued.
    fn switch_source(&mut self) -> bool {
        let track = self.current_track();
        let Some(path) = self.locators.resolve(&track.source) else {
            let err = PlaybackError::LocatorRevoked(track.source.to_string());
            self.report("cannot load track", err);
            return false;
        };
        match self.handle.load(&path) {
            Ok(()) => {
                self.loading = true;
                true
            }
            Err(e) => {
                self.report("cannot load track", e);
                false
            }
        }
    }

    /// Load the first track and, when `autoplay` is set, start it once it
    /// is ready.
    pub fn initialize(&mut self, autoplay: bool) {
        if let Err(e) = self.handle.set_volume(self.state.volume) {
            self.report("cannot set volume", e);
        }
        self.state.is_playing = false;
        self.start_when_ready = self.switch_source() && autoplay;
        info!(
            title = %self.current_track().title,
            tracks = self.playlist.len(),
            autoplay,
            "player initialized"
        );
        self.publish();
    }

    /// Flip between playing and paused.
    ///
    /// The state flips even when the handle call fails; a failure that
    /// surfaces later through `on_playback_error` puts it back to paused.
    pub fn toggle_play(&mut self) {
        let result = if self.state.is_playing {
            self.handle.pause()
        } else {
            self.handle.play()
        };
        if let Err(e) = result {
            self.report("playback error", e);
        }
        self.start_when_ready = false;
        self.state.is_playing = !self.state.is_playing;
        debug!(playing = self.state.is_playing, "toggled playback");
        self.publish();
    }

    pub fn next(&mut self) {
        self.skip(true);
    }

    pub fn previous(&mut self) {
        self.skip(false);
    }

    /// Pause, switch source, then play once the handle says the new source
    /// is ready.
    fn skip(&mut self, forward: bool) {
        if let Err(e) = self.handle.pause() {
            self.report("playback error", e);
        }
        self.state.is_playing = false;
        self.state.current_index = self.playlist.step_from(self.state.current_index, forward);
        self.state.progress_percent = 0.0;
        self.start_when_ready = self.switch_source();
        info!(
            index = self.state.current_index,
            title = %self.current_track().title,
            "switching track"
        );
        self.publish();
    }

    /// Jump to `new_percent` of the current track. The seek bar moves
    /// immediately without waiting for the handle.
    pub fn seek(&mut self, new_percent: f64) {
        if new_percent.is_nan() {
            return;
        }
        let percent = new_percent.clamp(0.0, 100.0);
        match self.handle.duration() {
            Some(_) if self.loading => {
                debug!(percent, "source still loading, not repositioning")
            }
            Some(total) if !total.is_zero() => {
                if let Err(e) = self.handle.seek(total.mul_f64(percent / 100.0)) {
                    self.report("seek failed", e);
                }
            }
            _ => debug!(percent, "duration unknown, not repositioning"),
        }
        self.state.progress_percent = percent;
        self.publish();
    }

    pub fn set_volume(&mut self, new_volume: f32) {
        if new_volume.is_nan() {
            return;
        }
        let volume = new_volume.clamp(0.0, 1.0);
        if let Err(e) = self.handle.set_volume(volume) {
            self.report("cannot set volume", e);
        }
        self.state.volume = volume;
        self.publish();
    }

    /// Append user files in the order given. The current track and
    /// playback are left alone.
    pub fn append_tracks(&mut self, files: Vec<UploadedFile>) {
        if files.is_empty() {
            debug!("empty upload ignored");
            return;
        }
        let count = files.len();
        let tracks: Vec<Track> = files
            .into_iter()
            .map(|f| {
                let source = self.locators.create(f.path);
                Track::new(f.name, source)
            })
            .collect();
        self.playlist.extend(tracks);
        info!(
            added = count,
            total = self.playlist.len(),
            live_locators = self.locators.live_count(),
            "tracks appended"
        );
        self.state.notice = Some(format!("added {count} track(s)"));
        self.publish();
    }

    pub fn on_position_update(&mut self) {
        if self.loading {
            return;
        }
        self.state.progress_percent =
            progress_percent(self.handle.current_time(), self.handle.duration());
        self.publish();
    }

    pub fn on_source_ready(&mut self) {
        self.loading = false;
        if !self.start_when_ready {
            self.on_position_update();
            return;
        }
        self.start_when_ready = false;
        match self.handle.play() {
            Ok(()) => self.state.is_playing = true,
            Err(e) => self.report("playback error", e),
        }
        self.publish();
    }

    pub fn on_playback_error(&mut self, message: &str) {
        warn!(error = message, "playback failed");
        self.loading = false;
        self.start_when_ready = false;
        self.state.is_playing = false;
        self.state.notice = Some(message.to_string());
        self.publish();
    }

    pub fn on_ended(&mut self) {
        // The old source finishing while the next one loads is stale news.
        if self.loading {
            return;
        }
        self.state.is_playing = false;
        self.state.progress_percent = 100.0;
        self.publish();
    }

    /// Route a notification from the playback handle.
    pub fn handle_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::SourceReady => self.on_source_ready(),
            AudioEvent::Position => self.on_position_update(),
            AudioEvent::Ended => self.on_ended(),
            AudioEvent::Failed(message) => self.on_playback_error(&message),
        }
    }

    /// Route a request from the view.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::TogglePlay => self.toggle_play(),
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
            Intent::Seek(percent) => self.seek(percent),
            Intent::SetVolume(volume) => self.set_volume(volume),
            Intent::UploadFiles(files) => self.append_tracks(files),
        }
    }

    /// End the session: revoke upload locators and stop the handle.
    pub fn teardown(&mut self, fade_out: Duration) {
        let revoked = self.locators.revoke_all();
        debug!(revoked, "revoked transient locators");
        self.handle.stop(fade_out);
        self.state.is_playing = false;
        self.publish();
    }
}
