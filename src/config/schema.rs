use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/serenade/config.toml` or
/// `~/.config/serenade/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SERENADE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The fixed session playlist, in play order. Not editable at runtime.
    pub playlist: Vec<TrackEntry>,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playlist: default_playlist(),
            playback: PlaybackSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// One configured playlist entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEntry {
    /// Path to the audio file.
    pub source: String,
    /// Name shown in the playlist and the now-playing line.
    pub name: String,
    /// Advertised length, shown next to the name. Display-only.
    #[serde(default)]
    pub duration: String,
}

fn default_playlist() -> Vec<TrackEntry> {
    let durations = ["3:45", "4:12", "3:28", "4:05", "3:52"];
    durations
        .iter()
        .enumerate()
        .map(|(i, d)| TrackEntry {
            source: format!("music/song{}.mp3", i + 1),
            name: format!("Song {}", i + 1),
            duration: (*d).to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial volume in the UI range `[0, 100]`.
    pub volume_percent: f32,
    /// Whether to attempt starting playback once shortly after startup.
    pub autoplay: bool,
    /// Delay before that single autoplay attempt (milliseconds).
    pub autoplay_delay_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume_percent: 100.0,
            autoplay: true,
            autoplay_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long the "playback blocked" notice stays up before the track
    /// name is restored (seconds).
    pub blocked_overlay_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ serenade ~ ".to_string(),
            blocked_overlay_secs: 5,
        }
    }
}
