/// Format a raw seconds value as `M:SS` with the seconds zero-padded.
///
/// Non-finite or negative input (e.g. a duration that is not known yet)
/// renders as `"0:00"`.
pub fn format_time(seconds: f64) -> String {
    let s = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let mins = (s / 60.0).floor() as u64;
    let secs = (s % 60.0).floor() as u64;
    format!("{mins}:{secs:02}")
}
