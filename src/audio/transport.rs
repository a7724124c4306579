use std::path::Path;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::player::{PlayError, Transport, TransportEvent};

use super::sink::create_paused_sink;

/// Transport over rodio's default output stream.
///
/// A machine without a usable output device is this program's analog of
/// an environment that refuses to start playback: the stream stays absent
/// and every `play` request reports [`PlayError::Blocked`].
pub struct RodioTransport {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    volume: f32,
    // Elapsed time is tracked here: accumulated covers completed play
    // stretches, started_at the one currently running.
    started_at: Option<Instant>,
    accumulated: Duration,
    duration: Option<Duration>,
    playing: bool,
    ended_reported: bool,
    pending: Vec<TransportEvent>,
}

impl RodioTransport {
    pub fn new() -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's
                // noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                eprintln!("serenade: no audio output device: {e}");
                None
            }
        };

        Self {
            stream,
            sink: None,
            volume: 1.0,
            started_at: None,
            accumulated: Duration::ZERO,
            duration: None,
            playing: false,
            ended_reported: false,
            pending: Vec::new(),
        }
    }
}

impl Default for RodioTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for RodioTransport {
    fn set_source(&mut self, source: &Path) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.duration = None;
        self.playing = false;
        self.ended_reported = false;

        let Some(stream) = self.stream.as_ref() else {
            // No output device: leave the source unloaded. Metadata stays
            // unknown and play requests keep reporting Blocked.
            return;
        };

        match create_paused_sink(stream, source) {
            Ok((sink, duration)) => {
                sink.set_volume(self.volume);
                self.sink = Some(sink);
                self.duration = duration;
                if let Some(duration) = duration {
                    self.pending.push(TransportEvent::MetadataReady { duration });
                }
            }
            Err(e) => {
                eprintln!("serenade: cannot load {}: {e}", source.display());
                self.pending.push(TransportEvent::Error);
            }
        }
    }

    fn play(&mut self) -> Result<(), PlayError> {
        if self.stream.is_none() {
            return Err(PlayError::Blocked);
        }
        let Some(sink) = self.sink.as_ref() else {
            return Err(PlayError::Media);
        };

        sink.play();
        self.playing = true;
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        if let Some(started) = self.started_at.take() {
            self.accumulated += started.elapsed();
        }
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(volume);
        }
    }

    fn position(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |s| s.elapsed())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        let mut events = std::mem::take(&mut self.pending);

        // Sink exhaustion while playing is the natural end of the track,
        // reported exactly once.
        if self.playing && !self.ended_reported {
            if let Some(sink) = self.sink.as_ref() {
                if sink.empty() {
                    self.ended_reported = true;
                    self.playing = false;
                    if let Some(started) = self.started_at.take() {
                        self.accumulated += started.elapsed();
                    }
                    events.push(TransportEvent::Ended);
                }
            }
        }

        events
    }
}
