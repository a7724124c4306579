use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioTransport;
use crate::player::Controller;
use crate::playlist::{Playlist, Track};
use crate::ui::UiView;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let tracks: Vec<Track> = settings
        .playlist
        .iter()
        .map(|e| Track {
            source: e.source.clone().into(),
            display: e.name.clone(),
            nominal_duration: e.duration.clone(),
        })
        .collect();
    let Some(playlist) = Playlist::new(tracks) else {
        return Err("configured playlist is empty".into());
    };

    let transport = RodioTransport::new();
    let mut controller = Controller::new(
        playlist,
        transport,
        UiView::default(),
        Duration::from_secs(settings.ui.blocked_overlay_secs),
    );
    controller.set_volume(settings.playback.volume_percent);
    controller.load(0);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
