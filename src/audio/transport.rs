//! Play/pause/end bookkeeping for the loaded source.
//!
//! Kept apart from the rodio sink so the audio thread's decisions can be
//! exercised without an output device.

use std::time::{Duration, Instant};

use super::handle::PlaybackError;
use super::types::AudioEvent;

/// Elapsed-time bookkeeping for the current source.
#[derive(Debug, Default)]
pub(super) struct Clock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Clock {
    pub(super) fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    /// Stop the clock and set it to `at`.
    pub(super) fn reset(&mut self, at: Duration) {
        self.started_at = None;
        self.accumulated = at;
    }

    pub(super) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(super) fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}

#[derive(Debug, Default)]
pub(super) struct Transport {
    clock: Clock,
    duration: Option<Duration>,
    ended: bool,
}

impl Transport {
    /// Record the outcome of a load. Either way the source starts over,
    /// paused at 0; the returned event is what the controller hears.
    pub(super) fn loaded(&mut self, result: Result<Option<Duration>, PlaybackError>) -> AudioEvent {
        self.clock.reset(Duration::ZERO);
        self.ended = false;
        match result {
            Ok(duration) => {
                self.duration = duration;
                AudioEvent::SourceReady
            }
            Err(e) => {
                self.duration = None;
                AudioEvent::Failed(e.to_string())
            }
        }
    }

    pub(super) fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub(super) fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub(super) fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// A finished source has to be rebuilt from 0 before it can play again.
    pub(super) fn needs_restart(&self) -> bool {
        self.ended
    }

    pub(super) fn play(&mut self) {
        self.clock.start();
    }

    pub(super) fn pause(&mut self) {
        self.clock.pause();
    }

    /// Seek target clamped to the known length.
    pub(super) fn seek_target(&self, to: Duration) -> Duration {
        match self.duration {
            Some(total) => to.min(total),
            None => to,
        }
    }

    /// The sink was rebuilt at `at`. Play/pause state carries over.
    pub(super) fn repositioned(&mut self, at: Duration) {
        let running = self.clock.is_running();
        self.clock.reset(at);
        self.ended = false;
        if running {
            self.clock.start();
        }
    }

    /// Periodic report. `drained` says whether the sink has run dry.
    pub(super) fn tick(&mut self, drained: bool) -> Vec<AudioEvent> {
        if !self.clock.is_running() {
            return Vec::new();
        }
        if !drained {
            return vec![AudioEvent::Position];
        }
        self.clock.pause();
        if let Some(total) = self.duration {
            self.clock.reset(total);
        }
        self.ended = true;
        vec![AudioEvent::Position, AudioEvent::Ended]
    }
}
