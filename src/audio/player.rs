use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::config::AudioSettings;

use super::handle::{PlaybackError, PlaybackHandle};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, PlaybackInfo, SharedPlayback};

/// `PlaybackHandle` backed by rodio on a dedicated audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: SharedPlayback,
    join: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    /// Start the audio thread. Its notifications arrive on the returned receiver.
    pub fn spawn(audio_settings: &AudioSettings) -> (Self, Receiver<AudioEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();
        let playback: SharedPlayback = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(
            rx,
            event_tx,
            playback.clone(),
            Duration::from_millis(audio_settings.tick_ms.max(1)),
        );

        let player = Self {
            tx,
            playback,
            join: Some(audio_handle),
        };
        (player, event_rx)
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), PlaybackError> {
        self.tx.send(cmd).map_err(|_| PlaybackError::Disconnected)
    }

    fn snapshot(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }
}

impl PlaybackHandle for AudioPlayer {
    fn load(&mut self, source: &Path) -> Result<(), PlaybackError> {
        // Forget the old source now; the audio thread fills this in once loaded.
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo::default();
        }
        self.send(AudioCmd::Load(source.to_path_buf()))
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Pause)
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Seek(position))
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
        self.send(AudioCmd::SetVolume(volume.clamp(0.0, 1.0)))
    }

    fn duration(&self) -> Option<Duration> {
        self.snapshot().duration
    }

    fn current_time(&self) -> Duration {
        self.snapshot().elapsed
    }

    fn stop(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            let _ = h.join();
            debug!("audio thread joined");
        }
    }
}
