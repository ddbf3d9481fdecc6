//! UI rendering for the terminal player card.
//!
//! Everything here reads from the controller; nothing mutates playback.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::Controller;
use crate::audio::PlaybackHandle;
use crate::config::{ControlsSettings, UiSettings};

const ICON_PLAY: &str = "▶";
const ICON_PAUSE: &str = "⏸";
const ICON_PREV: &str = "⏮";
const ICON_NEXT: &str = "⏭";

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next");
    // H/L is filled dynamically from config.
    map.insert("0-9", "jump to 0-90%");
    map.insert("-/+", "volume");
    map.insert("o", "add file/folder");
    map.insert("q", "quit");
    map
});

/// View-only state of the upload prompt.
#[derive(Debug, Default)]
pub struct UploadPrompt {
    pub open: bool,
    pub query: String,
    /// Outcome of the last submission, shown in the status box.
    pub message: Option<String>,
}

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_step_percent: f64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["space/p", "h/l", "H/L", "0-9", "-/+", "o", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{seek_step_percent}%"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn draw_card<H: PlaybackHandle>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<H>,
    ui_settings: &UiSettings,
) {
    let state = controller.state();
    let block = Block::bordered()
        .title(" player ")
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(2));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let title = Paragraph::new(controller.current_track().title.as_str())
        .alignment(Alignment::Center)
        .bold();
    frame.render_widget(title, rows[0]);

    let seek = Gauge::default()
        .ratio((state.progress_percent / 100.0).clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);
    frame.render_widget(seek, rows[2]);

    let times = Paragraph::new(format!(
        "{}{}{}",
        controller.elapsed_text(),
        ui_settings.time_separator,
        controller.total_text()
    ))
    .alignment(Alignment::Center);
    frame.render_widget(times, rows[3]);

    let play_icon = if state.is_playing {
        ICON_PAUSE
    } else {
        ICON_PLAY
    };
    let transport = Line::from(vec![
        Span::raw(ICON_PREV),
        Span::raw("    "),
        Span::styled(play_icon, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("    "),
        Span::raw(ICON_NEXT),
    ]);
    frame.render_widget(
        Paragraph::new(transport).alignment(Alignment::Center),
        rows[4],
    );

    let volume_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(0),
            Constraint::Length(6),
        ])
        .split(rows[6]);
    frame.render_widget(Paragraph::new("vol"), volume_row[0]);
    let volume = Gauge::default()
        .ratio(f64::from(state.volume).clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);
    frame.render_widget(volume, volume_row[1]);
    frame.render_widget(
        Paragraph::new(format!("{:>4}%", (state.volume * 100.0).round() as u16))
            .alignment(Alignment::Right),
        volume_row[2],
    );
}

fn draw_playlist<H: PlaybackHandle>(frame: &mut Frame, area: Rect, controller: &Controller<H>) {
    let current = controller.state().current_index;
    let tracks = controller.playlist().tracks();

    // Center the current track when possible; only build items for the visible window.
    let total = tracks.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = if total <= height || height == 0 {
        (0, total)
    } else {
        let half = height / 2;
        let start = current.saturating_sub(half).min(total - height);
        (start, start + height)
    };

    let items: Vec<ListItem> = tracks[start..end]
        .iter()
        .enumerate()
        .map(|(i, t)| ListItem::new(format!("{:>3}. {}", start + i + 1, t.title)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if total > 0 {
        list_state.select(Some(current - start));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn status_text<H: PlaybackHandle>(controller: &Controller<H>, prompt: &UploadPrompt) -> String {
    let state = controller.state();
    let mut parts: Vec<String> = Vec::new();

    parts.push(if state.is_playing { "Playing" } else { "Paused" }.to_string());
    parts.push(format!(
        "Track {}/{}",
        state.current_index + 1,
        controller.playlist().len()
    ));
    if let Some(msg) = prompt.message.as_ref().or(state.notice.as_ref()) {
        parts.push(msg.clone());
    }
    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw<H: PlaybackHandle>(
    frame: &mut Frame,
    controller: &Controller<H>,
    prompt: &UploadPrompt,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let mut constraints = vec![Constraint::Length(3), Constraint::Length(9)];
    if ui_settings.show_playlist {
        constraints.push(Constraint::Min(3));
    }
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Length(4));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());
    let (status_area, footer_area) = (chunks[chunks.len() - 2], chunks[chunks.len() - 1]);

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playcard ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_card(frame, chunks[1], controller, ui_settings);

    if ui_settings.show_playlist {
        draw_playlist(frame, chunks[2], controller);
    }

    let status = Paragraph::new(status_text(controller, prompt))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, status_area);

    let footer = Paragraph::new(controls_text(controls_settings.seek_step_percent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, footer_area);

    if prompt.open {
        let popup = centered_rect_sized(64, 3, frame.area());
        frame.render_widget(Clear, popup);
        let input = Paragraph::new(format!("{}_", prompt.query))
            .block(
                Block::bordered()
                    .title(" add file or folder (enter adds, esc cancels) ")
                    .padding(Padding::horizontal(1)),
            )
            .bold();
        frame.render_widget(input, popup);
    }
}
