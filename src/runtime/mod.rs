use std::env;
use std::ffi::OsString;
use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::{Controller, PlaybackState};
use crate::audio::{AudioEvent, AudioPlayer, PlaybackHandle};
use crate::config;

mod event_loop;
mod logging;
mod settings;
mod startup;


/// Raw mode and the alternate screen, undone on drop whatever happened.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = disable_raw_mode();
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_warning) = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(Some(path)) => info!(log = %path.display(), "playcard starting"),
        Ok(None) => {}
        // Still on the normal screen, so stderr is fine here.
        Err(e) => eprintln!("playcard: logging disabled: {e}"),
    }
    if let Some(msg) = settings_warning {
        warn!("{msg}");
    }

    let upload_args: Vec<OsString> = env::args_os().skip(1).collect();

    let (audio_player, audio_events) = AudioPlayer::spawn(&settings.audio);
    let mut controller = startup::build_controller(&settings, audio_player, &upload_args)?;
    let state_rx = controller.subscribe();
    controller.initialize(settings.audio.autoplay);

    let fade_out = Duration::from_millis(settings.audio.quit_fade_out_ms);
    let result = run_session(&mut controller, fade_out, |controller| {
        run_tui(&settings, controller, &audio_events, &state_rx)
    });

    info!("playcard stopped");
    result
}

/// Run `ui` against the controller, then tear the session down even if
/// `ui` failed.
fn run_session<H, F>(
    controller: &mut Controller<H>,
    fade_out: Duration,
    ui: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    H: PlaybackHandle,
    F: FnOnce(&mut Controller<H>) -> Result<(), Box<dyn std::error::Error>>,
{
    let result = ui(controller);
    if let Err(e) = &result {
        error!(error = %e, "terminal session failed");
    }
    controller.teardown(fade_out);
    result
}

fn run_tui<H: PlaybackHandle>(
    settings: &config::Settings,
    controller: &mut Controller<H>,
    audio_events: &Receiver<AudioEvent>,
    state_rx: &Receiver<PlaybackState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut state = event_loop::EventLoopState::default();
    event_loop::run(
        &mut terminal,
        settings,
        controller,
        audio_events,
        state_rx,
        &mut state,
    )
}
