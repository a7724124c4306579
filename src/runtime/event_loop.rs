use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioTransport;
use crate::config;
use crate::player::Controller;
use crate::ui::{self, UiView};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Playlist entry under the cursor (distinct from the loaded track).
    pub selected: usize,
    started_at: Instant,
    /// The startup autoplay is a single attempt; once spent it is never
    /// retried, whatever its outcome.
    autoplay_spent: bool,
    last_progress: Instant,
}

impl EventLoopState {
    fn new(autoplay: bool) -> Self {
        let now = Instant::now();
        Self {
            selected: 0,
            started_at: now,
            autoplay_spent: !autoplay,
            last_progress: now,
        }
    }
}

/// Main terminal event loop: drains transport events into the controller,
/// drives progress and overlay expiry, draws, and handles input. Returns
/// `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<RodioTransport, UiView>,
) -> Result<(), Box<dyn std::error::Error>> {
    let autoplay_delay = Duration::from_millis(settings.playback.autoplay_delay_ms);
    let mut state = EventLoopState::new(settings.playback.autoplay);

    loop {
        let now = Instant::now();

        if !state.autoplay_spent && now.duration_since(state.started_at) >= autoplay_delay {
            state.autoplay_spent = true;
            if !controller.state().playing {
                controller.play();
            }
        }

        controller.poll_transport();
        controller.tick(now);

        if controller.state().playing
            && now.duration_since(state.last_progress) >= PROGRESS_INTERVAL
        {
            state.last_progress = now;
            controller.on_progress();
        }

        let volume_percent = controller.state().volume * 100.0;
        terminal.draw(|f| {
            ui::draw(
                f,
                controller.ui(),
                controller.playlist().tracks(),
                state.selected,
                &settings.ui.header_text,
                volume_percent,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, controller, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    controller: &mut Controller<RodioTransport, UiView>,
    state: &mut EventLoopState,
) -> bool {
    let len = controller.playlist().len();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('p') | KeyCode::Char(' ') => controller.toggle(),
        KeyCode::Char('l') | KeyCode::Right => {
            controller.next();
            state.selected = controller.state().current;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            controller.previous();
            state.selected = controller.state().current;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.selected = (state.selected + 1) % len;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.selected = (state.selected + len - 1) % len;
        }
        KeyCode::Enter => {
            controller.load(state.selected);
        }
        KeyCode::Char(c @ '1'..='9') => {
            // Jump straight to a playlist position; out-of-range digits
            // are ignored by the controller.
            let index = c as usize - '1' as usize;
            controller.load(index);
            if index < len {
                state.selected = index;
            }
        }
        KeyCode::Char('-') => {
            let percent = controller.state().volume * 100.0 - 10.0;
            controller.set_volume(percent);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let percent = controller.state().volume * 100.0 + 10.0;
            controller.set_volume(percent);
        }
        _ => {}
    }

    false
}
