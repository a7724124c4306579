use std::time::{Duration, Instant};

use crate::playlist::Playlist;

use super::state::{Overlay, PlaybackState, UiListener};
use super::time::format_time;
use super::transport::{PlayError, Transport, TransportEvent};

/// Owns the [`PlaybackState`] and translates transport operations and
/// events into state updates and UI notifications.
///
/// One instance per session. All operations run to completion on the
/// caller's thread; the only deferred work is overlay expiry, driven by
/// [`Controller::tick`].
pub struct Controller<T: Transport, U: UiListener> {
    playlist: Playlist,
    state: PlaybackState,
    overlay: Option<Overlay>,
    transport: T,
    ui: U,
    blocked_timeout: Duration,
}

impl<T: Transport, U: UiListener> Controller<T, U> {
    /// Create a controller over `playlist`. The initial state is paused at
    /// index 0 with nothing loaded; callers follow up with `load(0)`.
    pub fn new(playlist: Playlist, transport: T, ui: U, blocked_timeout: Duration) -> Self {
        Self {
            playlist,
            state: PlaybackState::default(),
            overlay: None,
            transport,
            ui,
            blocked_timeout,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Select the track at `index` without starting playback.
    ///
    /// Resets position to zero, forgets the previous track's duration and
    /// clears any overlay. Out-of-range indices are a silent no-op.
    pub fn load(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            return;
        };

        self.state.current = index;
        self.state.playing = false;
        self.state.position = Duration::ZERO;
        self.state.duration = None;
        self.overlay = None;

        self.transport.set_source(&track.source);
        self.ui.track_changed(&track.display);
        self.ui.playlist_highlight_changed(index);
    }

    /// Attempt to start audio output.
    ///
    /// On refusal the state stays paused and a blocked overlay is raised;
    /// it expires on its own via [`Controller::tick`]. A media failure is
    /// handled like a transport error event.
    pub fn play(&mut self) {
        match self.transport.play() {
            Ok(()) => {
                self.state.playing = true;
                if matches!(self.overlay, Some(Overlay::Blocked { .. })) {
                    self.clear_overlay_restoring_name();
                }
                self.ui.play_state_changed(true);
            }
            Err(PlayError::Blocked) => {
                self.overlay = Some(Overlay::Blocked {
                    deadline: Instant::now() + self.blocked_timeout,
                });
                self.ui.playback_blocked();
            }
            Err(PlayError::Media) => self.on_transport_error(),
        }
    }

    /// Stop audio output. Always succeeds.
    pub fn pause(&mut self) {
        self.transport.pause();
        self.state.playing = false;
        self.ui.play_state_changed(false);
    }

    pub fn toggle(&mut self) {
        if self.state.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance to the next track in circular order, resuming playback if it
    /// was active (best-effort; refusal is handled as in [`Controller::play`]).
    pub fn next(&mut self) {
        self.advance(self.playlist.next_index(self.state.current), self.state.playing);
    }

    /// Go back to the previous track in circular order, with the same
    /// resume behavior as [`Controller::next`].
    pub fn previous(&mut self) {
        self.advance(self.playlist.prev_index(self.state.current), self.state.playing);
    }

    fn advance(&mut self, index: usize, resume: bool) {
        self.load(index);
        if resume {
            self.play();
        }
    }

    /// Apply a UI-range volume in `[0, 100]`, mapped linearly to the
    /// transport's `[0.0, 1.0]`. Out-of-range input is silently clamped.
    pub fn set_volume(&mut self, percent: f32) {
        let volume = percent.max(0.0).min(100.0) / 100.0;
        self.state.volume = volume;
        self.transport.set_volume(volume);
    }

    /// Recompute position and progress fraction from the transport and
    /// notify the UI. The fraction is 0.0 while the duration is unknown.
    pub fn on_progress(&mut self) {
        self.state.position = self.transport.position();
        if self.state.duration.is_none() {
            self.state.duration = self.transport.duration();
        }
        self.notify_progress();
    }

    /// Drain the transport's pending events and apply them in order.
    pub fn poll_transport(&mut self) {
        for event in self.transport.poll_events() {
            self.handle_event(event);
        }
    }

    /// Apply one transport event.
    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::MetadataReady { duration } => {
                self.state.duration = Some(duration);
                self.notify_progress();
            }
            TransportEvent::Progress => self.on_progress(),
            TransportEvent::Ended => {
                // A track that finishes naturally always carries playback
                // into the next one, including the wrap back to index 0.
                self.advance(self.playlist.next_index(self.state.current), true);
            }
            TransportEvent::Error => self.on_transport_error(),
        }
    }

    /// Expire the blocked overlay once its deadline has passed, restoring
    /// the track name it replaced.
    ///
    /// The overlay lives in controller state and every `load`, successful
    /// `play` or error replaces it, so an expiry that arrives after the
    /// context changed finds nothing to clear.
    pub fn tick(&mut self, now: Instant) {
        if let Some(Overlay::Blocked { deadline }) = self.overlay {
            if now >= deadline {
                self.clear_overlay_restoring_name();
            }
        }
    }

    fn on_transport_error(&mut self) {
        self.state.playing = false;
        self.overlay = Some(Overlay::Errored);
        self.ui.media_error();
        self.ui.play_state_changed(false);
    }

    fn clear_overlay_restoring_name(&mut self) {
        self.overlay = None;
        let track = self.playlist.track(self.state.current);
        self.ui.track_changed(&track.display);
    }

    fn notify_progress(&mut self) {
        let elapsed_secs = self.state.position.as_secs_f64();
        let total_secs = self.state.duration.map_or(0.0, |d| d.as_secs_f64());

        let fraction = if total_secs > 0.0 {
            (elapsed_secs / total_secs).min(1.0)
        } else {
            0.0
        };

        let elapsed = format_time(elapsed_secs);
        let total = format_time(total_secs);
        self.ui.progress_changed(fraction, &elapsed, &total);
    }
}
