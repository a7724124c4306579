use std::path::PathBuf;

/// One playable unit: a source locator plus display metadata.
#[derive(Debug, Clone)]
pub struct Track {
    pub source: PathBuf,
    pub display: String,
    /// Advertised length, e.g. `"3:45"`. Display-only; the real duration
    /// comes from the decoded media once its metadata is available.
    pub nominal_duration: String,
}

/// A fixed, ordered, non-empty sequence of tracks.
///
/// Construction is the only fallible operation; after that every index
/// produced by [`Playlist::next_index`] / [`Playlist::prev_index`] is valid.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist from `tracks`. Returns `None` when empty: the player
    /// has no meaningful state without at least one track.
    pub fn new(tracks: Vec<Track>) -> Option<Self> {
        if tracks.is_empty() {
            None
        } else {
            Some(Self { tracks })
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Look up a track; `None` for out-of-range indices.
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// The track at `index`. Callers hold the `index < len` invariant.
    pub fn track(&self, index: usize) -> &Track {
        &self.tracks[index]
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Next index in circular order: wraps to 0 after the last track.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Previous index in circular order: wraps to the last track before 0.
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}
