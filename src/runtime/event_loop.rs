use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::{Controller, Intent, PlaybackState};
use crate::audio::{AudioEvent, PlaybackHandle};
use crate::config::{self, ControlsSettings, LibrarySettings};
use crate::library::collect_uploads;
use crate::ui::{self, UploadPrompt};

/// What a key press in normal mode asks for.
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    Intent(Intent),
    OpenUpload,
    Quit,
    Ignore,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug)]
pub struct EventLoopState {
    pub prompt: UploadPrompt,
    /// Set when something the controller does not publish changed on screen.
    pub dirty: bool,
}

impl Default for EventLoopState {
    fn default() -> Self {
        Self {
            prompt: UploadPrompt::default(),
            dirty: true,
        }
    }
}

/// Map a key press to an action, given the state currently on screen.
pub fn action_for_key(key: KeyEvent, state: &PlaybackState, controls: &ControlsSettings) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => KeyAction::Intent(Intent::TogglePlay),
        KeyCode::Char('l') | KeyCode::Right => KeyAction::Intent(Intent::Next),
        KeyCode::Char('h') | KeyCode::Left => KeyAction::Intent(Intent::Previous),
        KeyCode::Char('L') => KeyAction::Intent(Intent::Seek(
            (state.progress_percent + controls.seek_step_percent).min(100.0),
        )),
        KeyCode::Char('H') => KeyAction::Intent(Intent::Seek(
            (state.progress_percent - controls.seek_step_percent).max(0.0),
        )),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => KeyAction::Intent(
            Intent::SetVolume((state.volume + controls.volume_step).min(1.0)),
        ),
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => KeyAction::Intent(
            Intent::SetVolume((state.volume - controls.volume_step).max(0.0)),
        ),
        KeyCode::Char(c @ '0'..='9') => {
            let tenth = c.to_digit(10).unwrap_or(0);
            KeyAction::Intent(Intent::Seek(f64::from(tenth) * 10.0))
        }
        KeyCode::Char('o') => KeyAction::OpenUpload,
        _ => KeyAction::Ignore,
    }
}

/// Resolve the prompt text into an upload, or explain why nothing was added.
pub fn upload_intent(query: &str, library: &LibrarySettings) -> Result<Intent, String> {
    let files = collect_uploads(query, library);
    if files.is_empty() {
        Err(format!("no audio files at {}", query.trim()))
    } else {
        Ok(Intent::UploadFiles(files))
    }
}

/// Main terminal event loop: applies audio notifications, redraws on
/// state changes and turns key presses into intents. Returns `Ok(())`
/// when the user quits.
pub fn run<H: PlaybackHandle>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<H>,
    audio_events: &Receiver<AudioEvent>,
    state_rx: &Receiver<PlaybackState>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = audio_events.try_recv() {
            controller.handle_event(ev);
        }

        // Render on notify: any published snapshot means the view is stale.
        while state_rx.try_recv().is_ok() {
            state.dirty = true;
        }

        if state.dirty {
            terminal.draw(|f| {
                ui::draw(f, controller, &state.prompt, &settings.ui, &settings.controls)
            })?;
            state.dirty = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, controller, state) {
                        break;
                    }
                }
                Event::Resize(_, _) => state.dirty = true,
                _ => {}
            }
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<H: PlaybackHandle>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut Controller<H>,
    state: &mut EventLoopState,
) -> bool {
    if state.prompt.open {
        state.dirty = true;
        match key.code {
            KeyCode::Esc => {
                state.prompt.open = false;
                state.prompt.query.clear();
            }
            KeyCode::Backspace => {
                state.prompt.query.pop();
            }
            KeyCode::Enter => {
                let query = std::mem::take(&mut state.prompt.query);
                state.prompt.open = false;
                match upload_intent(&query, &settings.library) {
                    Ok(intent) => {
                        info!(path = %query.trim(), "upload submitted");
                        controller.dispatch(intent);
                    }
                    Err(msg) => {
                        debug!("{msg}");
                        state.prompt.message = Some(msg);
                    }
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    state.prompt.query.push(c);
                }
            }
            _ => {}
        }
        return false;
    }

    if state.prompt.message.take().is_some() {
        state.dirty = true;
    }

    match action_for_key(key, controller.state(), &settings.controls) {
        KeyAction::Quit => return true,
        KeyAction::OpenUpload => {
            state.prompt.open = true;
            state.dirty = true;
        }
        KeyAction::Intent(intent) => controller.dispatch(intent),
        KeyAction::Ignore => {}
    }
    false
}
