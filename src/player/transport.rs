//! The transport seam: what the controller needs from an audio backend.

use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Why a request to start audio output was not honored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// The environment refused to start output (e.g. no output device).
    /// Recoverable: the user can try again once the situation changes.
    Blocked,
    /// The current source failed to decode or reach the output. Terminal
    /// for this track; a different track must be selected.
    Media,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Blocked => write!(f, "playback blocked by the environment"),
            PlayError::Media => write!(f, "media failed to load or decode"),
        }
    }
}

impl std::error::Error for PlayError {}

/// Events a transport raises back at the controller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The current source's metadata is known; carries the total duration.
    MetadataReady { duration: Duration },
    /// Playback position advanced.
    Progress,
    /// The current track finished naturally.
    Ended,
    /// The current source failed to load or decode.
    Error,
}

/// The audio decode/output facility, abstracted behind the operations the
/// controller needs. Implementations must make `set_source` leave the
/// transport stopped at position zero on the new source.
pub trait Transport {
    /// Point the transport at a new source. Load/decode failures are not
    /// reported here; they surface later as [`TransportEvent::Error`].
    fn set_source(&mut self, source: &Path);

    /// Attempt to start audio output.
    fn play(&mut self) -> Result<(), PlayError>;

    /// Stop audio output. Always succeeds.
    fn pause(&mut self);

    /// Apply an output volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);

    /// Elapsed playback time within the current source.
    fn position(&self) -> Duration;

    /// Total duration of the current source, once known.
    fn duration(&self) -> Option<Duration>;

    /// Drain pending events, in the order they occurred.
    fn poll_events(&mut self) -> Vec<TransportEvent>;
}
