// Playback state machine driven through a scripted backend.

use kunpeng_core::*;
use std::cell::Cell;

struct FakeAnalyser {
    bins: usize,
}

impl SpectrumSource for FakeAnalyser {
    fn bin_count(&self) -> usize {
        self.bins
    }
    fn fill(&self, out: &mut [u8]) {
        out.fill(128);
    }
}

#[derive(Default)]
struct FakeBackend {
    calls: Vec<String>,
    suspended: bool,
    fail_build: bool,
    // Flipped mid-test through `backend()`
    fail_play: Cell<bool>,
    fail_source: Cell<bool>,
}

impl FakeBackend {
    fn suspended() -> Self {
        Self {
            suspended: true,
            ..Self::default()
        }
    }
}

impl AudioBackend for FakeBackend {
    type Analyser = FakeAnalyser;

    fn build_graph(&mut self, source: &AudioSource) -> Result<FakeAnalyser, PlaybackError> {
        self.calls.push(format!("build {}", source.url()));
        if self.fail_build {
            return Err(PlaybackError::Backend("no audio context".into()));
        }
        Ok(FakeAnalyser { bins: 256 })
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.calls.push("resume".into());
        self.suspended = false;
        Ok(())
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push("play".into());
        if self.fail_play.get() {
            return Err(PlaybackError::Backend("play() rejected".into()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push("pause".into());
    }

    fn set_source(&mut self, source: &AudioSource) -> Result<(), PlaybackError> {
        self.calls.push(format!("source {}", source.url()));
        if self.fail_source.get() {
            return Err(PlaybackError::Backend("src rejected".into()));
        }
        Ok(())
    }
}

fn gesture() -> UserGesture {
    UserGesture::acknowledge()
}

#[test]
fn starts_uninitialized_without_spectrum() {
    let ctl = PlaybackController::new(FakeBackend::suspended());
    assert_eq!(ctl.state(), PlaybackState::Uninitialized);
    assert!(!ctl.is_playing());
    assert!(ctl.spectrum().is_none());
    assert_eq!(ctl.source().url(), DEFAULT_TRACK_URL);
    assert!(ctl.backend().calls.is_empty());
}

#[test]
fn first_gesture_builds_graph_resumes_and_plays() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    assert_eq!(ctl.toggle(gesture()), Ok(PlaybackState::Playing));
    assert!(ctl.is_playing());
    assert_eq!(
        ctl.backend().calls,
        vec![format!("build {DEFAULT_TRACK_URL}"), "resume".into(), "play".into()]
    );
    let spectrum = ctl.spectrum().expect("graph built");
    assert_eq!(spectrum.bin_count(), 256);
}

#[test]
fn toggling_alternates_without_rebuilding() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    ctl.toggle(gesture()).expect("start");
    assert_eq!(ctl.toggle(gesture()), Ok(PlaybackState::Paused));
    assert!(!ctl.is_playing());
    assert_eq!(ctl.toggle(gesture()), Ok(PlaybackState::Playing));
    let builds = ctl
        .backend()
        .calls
        .iter()
        .filter(|c| c.starts_with("build"))
        .count();
    assert_eq!(builds, 1);
    // context was resumed once and stays running
    let resumes = ctl.backend().calls.iter().filter(|c| *c == "resume").count();
    assert_eq!(resumes, 1);
    assert_eq!(ctl.backend().calls.last().map(String::as_str), Some("play"));
}

#[test]
fn running_context_is_not_resumed() {
    let mut ctl = PlaybackController::new(FakeBackend::default());
    ctl.toggle(gesture()).expect("start");
    assert!(!ctl.backend().calls.iter().any(|c| c == "resume"));
}

#[test]
fn failed_graph_build_stays_uninitialized() {
    let backend = FakeBackend {
        fail_build: true,
        ..FakeBackend::suspended()
    };
    let mut ctl = PlaybackController::new(backend);
    assert!(matches!(ctl.toggle(gesture()), Err(PlaybackError::Backend(_))));
    assert_eq!(ctl.state(), PlaybackState::Uninitialized);
    assert!(ctl.spectrum().is_none());
    // a later gesture retries
    assert!(ctl.toggle(gesture()).is_err());
    assert_eq!(ctl.backend().calls.len(), 2);
}

#[test]
fn rejected_play_keeps_graph_but_not_playing() {
    let backend = FakeBackend {
        fail_play: Cell::new(true),
        ..FakeBackend::suspended()
    };
    let mut ctl = PlaybackController::new(backend);
    assert!(ctl.toggle(gesture()).is_err());
    assert_eq!(ctl.state(), PlaybackState::Suspended);
    assert!(ctl.spectrum().is_some());
}

#[test]
fn source_loaded_before_first_play_is_staged() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    let upload = AudioSource::from_upload("audio/mpeg", "blob:local/1").expect("audio");
    assert_eq!(ctl.load_source(upload.clone()), Ok(PlaybackState::Uninitialized));
    assert!(ctl.backend().calls.is_empty());
    ctl.toggle(gesture()).expect("start");
    assert_eq!(ctl.backend().calls[0], "build blob:local/1");
    assert_eq!(ctl.source(), &upload);
}

#[test]
fn loading_while_playing_switches_immediately() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    ctl.toggle(gesture()).expect("start");
    let upload = AudioSource::from_upload("audio/wav", "blob:local/2").expect("audio");
    assert_eq!(ctl.load_source(upload), Ok(PlaybackState::Playing));
    let tail: Vec<&str> = ctl.backend().calls.iter().rev().take(2).map(String::as_str).collect();
    assert_eq!(tail, vec!["play", "source blob:local/2"]);
}

#[test]
fn loading_while_paused_stays_paused() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    ctl.toggle(gesture()).expect("start");
    ctl.toggle(gesture()).expect("pause");
    let upload = AudioSource::from_upload("audio/ogg", "blob:local/3").expect("audio");
    assert_eq!(ctl.load_source(upload), Ok(PlaybackState::Paused));
    assert_eq!(
        ctl.backend().calls.last().map(String::as_str),
        Some("source blob:local/3")
    );
}

#[test]
fn uploads_must_be_audio() {
    assert!(matches!(
        AudioSource::from_upload("video/mp4", "blob:x"),
        Err(PlaybackError::UnsupportedMedia(m)) if m == "video/mp4"
    ));
    assert!(AudioSource::from_upload("text/plain", "blob:x").is_err());
    let ok = AudioSource::from_upload("Audio/FLAC", "blob:y").expect("case-insensitive");
    assert_eq!(ok.url(), "blob:y");
}

#[test]
fn controller_spectrum_feeds_the_analyzer() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    let mut analyzer = FrequencyAnalyzer::new();
    assert_eq!(analyzer.snapshot(ctl.spectrum()).len(), FALLBACK_BIN_COUNT);
    ctl.toggle(gesture()).expect("start");
    let frame = analyzer.snapshot(ctl.spectrum());
    assert_eq!(frame.len(), 256);
    assert!(frame.bins().iter().all(|&b| b == 128));
}

#[test]
fn untyped_upload_is_left_to_the_media_element() {
    let src = AudioSource::from_upload("", "blob:untyped").expect("blank type passes");
    assert_eq!(src.url(), "blob:untyped");
    assert!(AudioSource::from_upload("  ", "blob:blank").is_ok());
}

#[test]
fn rejected_source_keeps_the_current_one() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    ctl.toggle(gesture()).expect("start");
    ctl.backend().fail_source.set(true);
    let upload = AudioSource::from_upload("audio/mpeg", "blob:new").expect("audio");
    assert!(matches!(ctl.load_source(upload), Err(PlaybackError::Backend(_))));
    assert_eq!(ctl.source().url(), DEFAULT_TRACK_URL);
    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert_eq!(ctl.backend().calls.last().map(String::as_str), Some("source blob:new"));
}

#[test]
fn failed_restart_on_new_source_pauses() {
    let mut ctl = PlaybackController::new(FakeBackend::suspended());
    ctl.toggle(gesture()).expect("start");
    ctl.backend().fail_play.set(true);
    let upload = AudioSource::from_upload("audio/mpeg", "blob:new").expect("audio");
    assert!(ctl.load_source(upload.clone()).is_err());
    assert_eq!(ctl.state(), PlaybackState::Paused);
    assert!(!ctl.is_playing());
    // the element already points at the new source
    assert_eq!(ctl.source(), &upload);

    ctl.backend().fail_play.set(false);
    assert_eq!(ctl.toggle(gesture()), Ok(PlaybackState::Playing));
}
