//! UI rendering for the terminal front-end.
//!
//! [`UiView`] is the controller's UI collaborator: it records the latest
//! notification payloads, and [`draw`] renders the screen from them. No
//! playback logic lives here.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph},
};

use crate::player::UiListener;
use crate::playlist::Track;

/// Transient notice rendered in place of the track name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Playback was refused; prompt the user to start it by hand.
    Blocked,
    /// The current track's file could not be loaded.
    MediaError,
}

/// Latest UI-facing state, fed exclusively through [`UiListener`].
#[derive(Debug, Default)]
pub struct UiView {
    pub track_name: String,
    pub highlighted: usize,
    pub playing: bool,
    pub fraction: f64,
    pub elapsed: String,
    pub total: String,
    pub notice: Option<Notice>,
}

impl UiListener for UiView {
    fn track_changed(&mut self, name: &str) {
        self.track_name = name.to_string();
        // A fresh name supersedes whatever notice was covering it.
        self.notice = None;
    }

    fn playlist_highlight_changed(&mut self, index: usize) {
        self.highlighted = index;
    }

    fn play_state_changed(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn progress_changed(&mut self, fraction: f64, elapsed: &str, total: &str) {
        self.fraction = fraction;
        self.elapsed = elapsed.to_string();
        self.total = total.to_string();
    }

    fn playback_blocked(&mut self) {
        self.notice = Some(Notice::Blocked);
    }

    fn media_error(&mut self) {
        self.notice = Some(Notice::MediaError);
    }
}

fn controls_text() -> String {
    [
        "[space/p] play/pause",
        "[h/l] prev/next",
        "[j/k] select",
        "[enter] load selected",
        "[-/+] volume",
        "[q] quit",
    ]
    .join(" | ")
}

/// Render the whole screen from the recorded view state.
pub fn draw(
    f: &mut Frame,
    view: &UiView,
    tracks: &[Track],
    selected: usize,
    header_text: &str,
    volume_percent: f32,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if i == view.highlighted { "▶ " } else { "  " };
            let line = format!("{marker}{}  ({})", t.display, t.nominal_duration);
            let mut style = Style::default();
            if i == view.highlighted {
                style = style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
            }
            if i == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(line).style(style)
        })
        .collect();
    let playlist = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Playlist ")
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(playlist, chunks[1]);

    let (name_text, name_style) = match view.notice {
        Some(Notice::Blocked) => (
            "Press space to start playback".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        ),
        Some(Notice::MediaError) => (
            "Cannot play this track - check the audio file".to_string(),
            Style::default().fg(Color::Red),
        ),
        None => {
            let affordance = if view.playing { "⏸" } else { "▶" };
            (format!("{affordance}  {}", view.track_name), Style::default())
        }
    };
    let now_playing = Paragraph::new(name_text)
        .style(name_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Now playing "));
    f.render_widget(now_playing, chunks[2]);

    let elapsed = if view.elapsed.is_empty() { "0:00" } else { &view.elapsed };
    let total = if view.total.is_empty() { "0:00" } else { &view.total };
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(view.fraction.clamp(0.0, 1.0))
        .label(format!("{elapsed} / {total}"));
    f.render_widget(progress, chunks[3]);

    let footer = Paragraph::new(format!(
        "vol {:>3.0}%  {}",
        volume_percent,
        controls_text()
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[4]);
}
