//! Utilities for creating `rodio` sinks from track sources.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink`, reporting the decoded duration when the container
//! carries one.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` for `source`, along with its total duration if
/// the decoder can tell. Open and decode failures are returned to the
/// caller rather than panicking; the transport surfaces them as events.
pub(super) fn create_paused_sink(
    stream: &OutputStream,
    source: &Path,
) -> Result<(Sink, Option<Duration>), Box<dyn std::error::Error + Send + Sync>> {
    let file = File::open(source)?;
    let decoded = Decoder::new(BufReader::new(file))?;
    let duration = decoded.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.append(decoded);
    sink.pause();
    Ok((sink, duration))
}
