//! Playback state and the transient overlay notifications layered on it.

use std::time::{Duration, Instant};

/// Mutable playback state, owned by the controller. Exactly one instance
/// exists per session.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    /// Selected track index. Always `< playlist.len()`.
    pub current: usize,
    /// Whether the transport is actively producing audio, not merely
    /// intended to play.
    pub playing: bool,
    /// Output volume in `[0.0, 1.0]`.
    pub volume: f32,
    /// Elapsed time within the current track.
    pub position: Duration,
    /// Total duration of the current track; known only after its metadata
    /// has loaded.
    pub duration: Option<Duration>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: 0,
            playing: false,
            volume: 1.0,
            position: Duration::ZERO,
            duration: None,
        }
    }
}

/// A transient UI state layered on top of the steady Paused/Playing state.
/// The steady state underneath either variant is Paused.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Starting output was refused. Auto-clears once `deadline` passes.
    Blocked { deadline: Instant },
    /// The current track's media is unavailable. Cleared only by loading
    /// a different track.
    Errored,
}

/// The UI collaborator: receives every user-visible consequence of a
/// controller operation.
pub trait UiListener {
    /// The selected track's display name changed (or was restored after an
    /// overlay cleared).
    fn track_changed(&mut self, name: &str);
    /// A different playlist entry should be highlighted.
    fn playlist_highlight_changed(&mut self, index: usize);
    /// The play/pause affordance should flip.
    fn play_state_changed(&mut self, playing: bool);
    /// Progress advanced: completed fraction in `[0.0, 1.0]` plus formatted
    /// elapsed and total labels.
    fn progress_changed(&mut self, fraction: f64, elapsed: &str, total: &str);
    /// Starting playback was refused; prompt the user to start it manually.
    fn playback_blocked(&mut self);
    /// The current track's media failed to load or decode.
    fn media_error(&mut self);
}
