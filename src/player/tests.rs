use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::*;
use crate::playlist::{Playlist, Track};

#[derive(Default)]
struct FakeInner {
    sources: Vec<PathBuf>,
    volumes: Vec<f32>,
    position: Duration,
    duration: Option<Duration>,
    play_fails_with: Option<PlayError>,
    play_calls: usize,
    pause_calls: usize,
    events: Vec<TransportEvent>,
}

/// Transport double backed by a shared cell so tests can poke positions and
/// inspect calls after handing the transport to the controller.
struct FakeTransport(Rc<RefCell<FakeInner>>);

impl FakeTransport {
    fn new() -> (Self, Rc<RefCell<FakeInner>>) {
        let inner = Rc::new(RefCell::new(FakeInner::default()));
        (Self(inner.clone()), inner)
    }
}

impl Transport for FakeTransport {
    fn set_source(&mut self, source: &Path) {
        let mut inner = self.0.borrow_mut();
        inner.sources.push(source.to_path_buf());
        inner.position = Duration::ZERO;
        inner.duration = None;
    }

    fn play(&mut self) -> Result<(), PlayError> {
        let mut inner = self.0.borrow_mut();
        inner.play_calls += 1;
        match inner.play_fails_with {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {
        self.0.borrow_mut().pause_calls += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().volumes.push(volume);
    }

    fn position(&self) -> Duration {
        self.0.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.0.borrow().duration
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.0.borrow_mut().events)
    }
}

#[derive(Default)]
struct RecordingUi {
    track_names: Vec<String>,
    highlights: Vec<usize>,
    play_states: Vec<bool>,
    progress: Vec<(f64, String, String)>,
    blocked: usize,
    media_errors: usize,
}

impl UiListener for RecordingUi {
    fn track_changed(&mut self, name: &str) {
        self.track_names.push(name.to_string());
    }
    fn playlist_highlight_changed(&mut self, index: usize) {
        self.highlights.push(index);
    }
    fn play_state_changed(&mut self, playing: bool) {
        self.play_states.push(playing);
    }
    fn progress_changed(&mut self, fraction: f64, elapsed: &str, total: &str) {
        self.progress
            .push((fraction, elapsed.to_string(), total.to_string()));
    }
    fn playback_blocked(&mut self) {
        self.blocked += 1;
    }
    fn media_error(&mut self) {
        self.media_errors += 1;
    }
}

fn five_tracks() -> Playlist {
    let tracks = (1..=5)
        .map(|n| Track {
            source: PathBuf::from(format!("music/song{n}.mp3")),
            display: format!("Song {n}"),
            nominal_duration: "3:45".into(),
        })
        .collect();
    Playlist::new(tracks).unwrap()
}

fn controller() -> (
    Controller<FakeTransport, RecordingUi>,
    Rc<RefCell<FakeInner>>,
) {
    let (transport, inner) = FakeTransport::new();
    let c = Controller::new(
        five_tracks(),
        transport,
        RecordingUi::default(),
        Duration::from_secs(5),
    );
    (c, inner)
}

#[test]
fn load_sets_source_and_notifies() {
    let (mut c, inner) = controller();
    c.load(2);

    assert_eq!(c.state().current, 2);
    assert_eq!(c.state().position, Duration::ZERO);
    assert_eq!(
        inner.borrow().sources.last().unwrap(),
        &PathBuf::from("music/song3.mp3")
    );
    assert_eq!(c.ui().track_names.last().unwrap(), "Song 3");
    assert_eq!(c.ui().highlights.last().unwrap(), &2);
    assert!(!c.state().playing);
}

#[test]
fn load_resets_position_regardless_of_prior_position() {
    let (mut c, inner) = controller();
    c.load(0);
    inner.borrow_mut().position = Duration::from_secs(30);
    c.on_progress();
    assert_eq!(c.state().position, Duration::from_secs(30));

    c.load(1);
    assert_eq!(c.state().position, Duration::ZERO);
    assert_eq!(c.state().duration, None);
}

#[test]
fn load_out_of_range_is_a_silent_noop() {
    let (mut c, inner) = controller();
    c.load(0);
    let sources_before = inner.borrow().sources.len();
    let names_before = c.ui().track_names.len();

    c.load(5);
    c.load(usize::MAX);

    assert_eq!(c.state().current, 0);
    assert_eq!(inner.borrow().sources.len(), sources_before);
    assert_eq!(c.ui().track_names.len(), names_before);
}

#[test]
fn next_five_times_cycles_back_to_start() {
    let (mut c, _inner) = controller();
    c.load(0);

    let mut seen = Vec::new();
    for _ in 0..5 {
        c.next();
        seen.push(c.state().current);
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 0]);
}

#[test]
fn previous_then_next_restores_index() {
    let (mut c, _inner) = controller();
    c.load(0);

    c.previous();
    assert_eq!(c.state().current, 4);
    c.next();
    assert_eq!(c.state().current, 0);

    c.next();
    c.previous();
    assert_eq!(c.state().current, 0);
}

#[test]
fn next_resumes_playback_only_when_it_was_active() {
    let (mut c, inner) = controller();
    c.load(0);

    c.next();
    assert_eq!(inner.borrow().play_calls, 0);
    assert!(!c.state().playing);

    c.play();
    c.next();
    assert!(c.state().playing);
    assert_eq!(inner.borrow().play_calls, 2);
}

#[test]
fn set_volume_maps_percent_linearly_and_clamps() {
    let (mut c, inner) = controller();

    c.set_volume(0.0);
    c.set_volume(100.0);
    c.set_volume(150.0);
    c.set_volume(-5.0);
    c.set_volume(50.0);

    assert_eq!(inner.borrow().volumes, vec![0.0, 1.0, 1.0, 0.0, 0.5]);
    assert_eq!(c.state().volume, 0.5);
}

#[test]
fn toggle_alternates_between_play_and_pause() {
    let (mut c, inner) = controller();
    c.load(0);

    c.toggle();
    assert!(c.state().playing);
    c.toggle();
    assert!(!c.state().playing);
    assert_eq!(inner.borrow().pause_calls, 1);
    assert_eq!(c.ui().play_states, vec![true, false]);
}

#[test]
fn blocked_play_raises_overlay_and_fires_once() {
    let (mut c, inner) = controller();
    c.load(0);
    inner.borrow_mut().play_fails_with = Some(PlayError::Blocked);

    c.play();

    assert!(!c.state().playing);
    assert_eq!(c.ui().blocked, 1);
    assert!(matches!(c.overlay(), Some(Overlay::Blocked { .. })));
    // No pause affordance flip happened.
    assert!(c.ui().play_states.is_empty());
}

#[test]
fn blocked_overlay_expires_after_timeout() {
    let (mut c, inner) = controller();
    c.load(0);
    inner.borrow_mut().play_fails_with = Some(PlayError::Blocked);
    c.play();

    let names_before = c.ui().track_names.len();

    // Before the deadline: nothing happens.
    c.tick(Instant::now());
    assert!(matches!(c.overlay(), Some(Overlay::Blocked { .. })));
    assert_eq!(c.ui().track_names.len(), names_before);

    // Past the deadline: overlay clears and the track name is restored.
    c.tick(Instant::now() + Duration::from_secs(6));
    assert_eq!(c.overlay(), None);
    assert_eq!(c.ui().track_names.len(), names_before + 1);
    assert_eq!(c.ui().track_names.last().unwrap(), "Song 1");
    assert_eq!(c.ui().blocked, 1);
}

#[test]
fn load_cancels_a_pending_blocked_overlay() {
    let (mut c, inner) = controller();
    c.load(0);
    inner.borrow_mut().play_fails_with = Some(PlayError::Blocked);
    c.play();

    c.load(1);
    assert_eq!(c.overlay(), None);
    let names_before = c.ui().track_names.len();

    // The old deadline passing must not clobber the fresher state.
    c.tick(Instant::now() + Duration::from_secs(60));
    assert_eq!(c.ui().track_names.len(), names_before);
}

#[test]
fn successful_play_clears_a_blocked_overlay() {
    let (mut c, inner) = controller();
    c.load(0);
    inner.borrow_mut().play_fails_with = Some(PlayError::Blocked);
    c.play();
    assert!(matches!(c.overlay(), Some(Overlay::Blocked { .. })));

    inner.borrow_mut().play_fails_with = None;
    c.play();

    assert!(c.state().playing);
    assert_eq!(c.overlay(), None);
    assert_eq!(c.ui().track_names.last().unwrap(), "Song 1");
}

#[test]
fn transport_error_pauses_and_raises_error_overlay() {
    let (mut c, _inner) = controller();
    c.load(0);
    c.play();
    assert!(c.state().playing);

    c.handle_event(TransportEvent::Error);

    assert!(!c.state().playing);
    assert_eq!(c.ui().media_errors, 1);
    assert_eq!(c.ui().play_states.last().unwrap(), &false);
    assert_eq!(c.overlay(), Some(Overlay::Errored));
}

#[test]
fn loading_another_track_clears_the_error_overlay() {
    let (mut c, inner) = controller();
    c.load(0);
    c.play();
    inner.borrow_mut().position = Duration::from_secs(42);
    c.on_progress();
    c.handle_event(TransportEvent::Error);

    c.load(1);

    assert_eq!(c.overlay(), None);
    assert_eq!(c.state().position, Duration::ZERO);
    assert_eq!(c.ui().track_names.last().unwrap(), "Song 2");
}

#[test]
fn error_does_not_retry_or_skip() {
    let (mut c, inner) = controller();
    c.load(0);
    c.play();
    let plays_before = inner.borrow().play_calls;

    c.handle_event(TransportEvent::Error);

    assert_eq!(c.state().current, 0);
    assert_eq!(inner.borrow().play_calls, plays_before);
}

#[test]
fn ended_advances_with_playback_forced_on() {
    let (mut c, inner) = controller();
    // Paused at the last track: the natural end still carries playback
    // over the wrap to index 0.
    c.load(4);
    assert!(!c.state().playing);

    c.handle_event(TransportEvent::Ended);

    assert_eq!(c.state().current, 0);
    assert!(c.state().playing);
    assert_eq!(inner.borrow().play_calls, 1);
}

#[test]
fn metadata_then_progress_reports_fraction_and_labels() {
    let (mut c, inner) = controller();
    c.load(0);

    c.handle_event(TransportEvent::MetadataReady {
        duration: Duration::from_secs(130),
    });
    inner.borrow_mut().position = Duration::from_secs_f64(65.4);
    c.handle_event(TransportEvent::Progress);

    let (fraction, elapsed, total) = c.ui().progress.last().unwrap().clone();
    assert!((fraction - 65.4 / 130.0).abs() < 1e-9);
    assert_eq!(elapsed, "1:05");
    assert_eq!(total, "2:10");
}

#[test]
fn progress_with_unknown_duration_guards_the_fraction() {
    let (mut c, inner) = controller();
    c.load(0);
    inner.borrow_mut().position = Duration::from_secs(10);

    c.on_progress();

    let (fraction, elapsed, total) = c.ui().progress.last().unwrap().clone();
    assert_eq!(fraction, 0.0);
    assert_eq!(elapsed, "0:10");
    assert_eq!(total, "0:00");
}

#[test]
fn poll_transport_applies_events_in_order() {
    let (mut c, inner) = controller();
    c.load(0);
    inner.borrow_mut().events = vec![
        TransportEvent::MetadataReady {
            duration: Duration::from_secs(60),
        },
        TransportEvent::Progress,
        TransportEvent::Ended,
    ];

    c.poll_transport();

    // Ended was applied last: we moved on to track 1 and are playing.
    assert_eq!(c.state().current, 1);
    assert!(c.state().playing);
    assert!(inner.borrow().events.is_empty());
}

#[test]
fn format_time_floors_and_zero_pads() {
    assert_eq!(format_time(65.4), "1:05");
    assert_eq!(format_time(5.0), "0:05");
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(3599.9), "59:59");
    assert_eq!(format_time(f64::NAN), "0:00");
    assert_eq!(format_time(-3.0), "0:00");
}
