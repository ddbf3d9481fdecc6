use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use super::handle::PlaybackError;
use super::probe::tagged_duration;
use super::sink::create_sink_at;
use super::transport::Transport;
use super::types::{AudioCmd, AudioEvent, SharedPlayback};

struct Engine {
    stream: OutputStream,
    events: Sender<AudioEvent>,
    info: SharedPlayback,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    transport: Transport,
    volume: f32,
}

impl Engine {
    fn emit(&self, event: AudioEvent) {
        // The receiver only goes away during shutdown.
        let _ = self.events.send(event);
    }

    fn fail(&self, err: PlaybackError) {
        warn!(error = %err, "playback failure");
        self.emit(AudioEvent::Failed(err.to_string()));
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.elapsed = self.transport.elapsed();
            info.duration = self.transport.duration();
        }
    }

    fn drop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// Replace the sink with a fresh one positioned at `at`, keeping the
    /// play/pause state.
    fn rebuild_at(&mut self, at: Duration) -> Result<(), PlaybackError> {
        let path = self.source.clone().ok_or(PlaybackError::NothingLoaded)?;
        self.drop_sink();

        let (sink, _) = create_sink_at(&self.stream, &path, at, self.volume)?;
        self.transport.repositioned(at);
        if self.transport.is_running() {
            sink.play();
        }
        self.sink = Some(sink);
        Ok(())
    }

    fn load(&mut self, path: PathBuf) {
        self.drop_sink();
        self.source = None;

        let result = match create_sink_at(&self.stream, &path, Duration::ZERO, self.volume) {
            Ok((sink, total)) => {
                let duration = total.or_else(|| tagged_duration(&path));
                info!(path = %path.display(), ?duration, "source loaded");
                self.sink = Some(sink);
                self.source = Some(path);
                Ok(duration)
            }
            Err(e) => {
                warn!(error = %e, "load failed");
                Err(e)
            }
        };

        let event = self.transport.loaded(result);
        self.publish();
        self.emit(event);
    }

    fn play(&mut self) {
        if self.sink.is_none() {
            self.fail(PlaybackError::NothingLoaded);
            return;
        }
        if self.transport.needs_restart() {
            if let Err(e) = self.rebuild_at(Duration::ZERO) {
                self.fail(e);
                return;
            }
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
        self.transport.play();
        self.publish();
        self.emit(AudioEvent::Position);
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.transport.pause();
        self.publish();
    }

    fn seek(&mut self, to: Duration) {
        let to = self.transport.seek_target(to);
        match self.rebuild_at(to) {
            Ok(()) => {
                debug!(position = ?to, "seeked");
                self.publish();
                self.emit(AudioEvent::Position);
            }
            Err(e) => self.fail(e),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(volume);
        }
    }

    fn tick(&mut self) {
        let drained = self.sink.as_ref().is_none_or(|s| s.empty());
        let events = self.transport.tick(drained);
        if events.is_empty() {
            return;
        }
        self.publish();
        for event in events {
            self.emit(event);
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(ref s) = self.sink {
            if self.transport.is_running() {
                fade_out_sink(s, self.volume, fade_out_ms);
            }
            s.stop();
        }
        self.transport.pause();
        self.publish();
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    info: SharedPlayback,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let err = PlaybackError::OutputDevice(e.to_string());
                error!(error = %err, "audio thread exiting");
                let _ = events.send(AudioEvent::Failed(err.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);

        let mut engine = Engine {
            stream,
            events,
            info,
            sink: None,
            source: None,
            transport: Transport::default(),
            volume: 1.0,
        };
        let mut last_tick = Instant::now();

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(path) => engine.load(path),
                    AudioCmd::Play => engine.play(),
                    AudioCmd::Pause => engine.pause(),
                    AudioCmd::Seek(to) => engine.seek(to),
                    AudioCmd::SetVolume(v) => engine.set_volume(v),
                    AudioCmd::Quit { fade_out_ms } => {
                        engine.quit(fade_out_ms);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // A busy command stream must not starve position reports.
            if last_tick.elapsed() >= tick {
                engine.tick();
                last_tick = Instant::now();
            }
        }
        debug!("audio thread stopped");
    })
}
