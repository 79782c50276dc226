//! Playback lifecycle as an explicit state machine.
//!
//! The controller is the single owner of the audio backend. The visual core
//! only ever sees [`PlaybackController::spectrum`] and
//! [`PlaybackController::is_playing`].

use crate::analysis::SpectrumSource;
use crate::error::PlaybackError;

pub const DEFAULT_TRACK_URL: &str =
    "https://assets.mixkit.co/music/preview/mixkit-dreaming-big-31.mp3";

/// Proof that the current call originates from a user interaction.
///
/// Browsers refuse to start audio graphs outside of a gesture; requiring this
/// token makes the first transition out of `Uninitialized` explicit.
#[derive(Clone, Copy, Debug)]
pub struct UserGesture(());

impl UserGesture {
    pub fn acknowledge() -> Self {
        Self(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioSource {
    Remote(String),
    Upload { url: String, mime: String },
}

impl Default for AudioSource {
    fn default() -> Self {
        AudioSource::Remote(DEFAULT_TRACK_URL.to_string())
    }
}

impl AudioSource {
    /// Accept an uploaded file by MIME type. `audio/*` is playable; an empty
    /// type is passed through and left to the media element to decode.
    pub fn from_upload(mime: &str, url: impl Into<String>) -> Result<Self, PlaybackError> {
        let mime_norm = mime.trim().to_ascii_lowercase();
        if !mime_norm.is_empty() && !mime_norm.starts_with("audio/") {
            return Err(PlaybackError::UnsupportedMedia(mime.to_string()));
        }
        Ok(AudioSource::Upload {
            url: url.into(),
            mime: mime.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        match self {
            AudioSource::Remote(url) => url,
            AudioSource::Upload { url, .. } => url,
        }
    }
}

/// Platform audio plumbing driven by the controller.
pub trait AudioBackend {
    type Analyser: SpectrumSource;

    /// Build `source -> analyser -> output` for `source`. Called at most once
    /// successfully.
    fn build_graph(&mut self, source: &AudioSource) -> Result<Self::Analyser, PlaybackError>;
    /// Resume a suspended output context.
    fn resume(&mut self) -> Result<(), PlaybackError>;
    fn is_suspended(&self) -> bool;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Point the existing element at a new source without rebuilding the graph.
    fn set_source(&mut self, source: &AudioSource) -> Result<(), PlaybackError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Uninitialized,
    Suspended,
    Playing,
    Paused,
}

pub struct PlaybackController<B: AudioBackend> {
    backend: B,
    state: PlaybackState,
    source: AudioSource,
    analyser: Option<B::Analyser>,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_source(backend, AudioSource::default())
    }

    pub fn with_source(backend: B, source: AudioSource) -> Self {
        Self {
            backend,
            state: PlaybackState::Uninitialized,
            source,
            analyser: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn source(&self) -> &AudioSource {
        &self.source
    }

    /// Current analyser view, `None` until the graph exists.
    pub fn spectrum(&self) -> Option<&dyn SpectrumSource> {
        self.analyser.as_ref().map(|a| a as &dyn SpectrumSource)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Play/pause toggle. The first call builds the audio graph.
    ///
    /// On failure the state is left where it was, so a later gesture can retry.
    pub fn toggle(&mut self, _gesture: UserGesture) -> Result<PlaybackState, PlaybackError> {
        if self.state == PlaybackState::Uninitialized {
            let analyser = self.backend.build_graph(&self.source).map_err(|e| {
                log::warn!("[playback] audio graph init failed: {}", e);
                e
            })?;
            self.analyser = Some(analyser);
            self.state = PlaybackState::Suspended;
            log::info!("[playback] audio graph ready for {}", self.source.url());
        }

        match self.state {
            PlaybackState::Suspended | PlaybackState::Paused => self.start()?,
            PlaybackState::Playing => {
                self.backend.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Uninitialized => {}
        }
        log::info!("[playback] state -> {:?}", self.state);
        Ok(self.state)
    }

    fn start(&mut self) -> Result<(), PlaybackError> {
        if self.backend.is_suspended() {
            self.backend.resume()?;
        }
        self.backend.play()?;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Replace the current source. Playing continues on the new source
    /// immediately; otherwise it is staged for the next play request.
    ///
    /// The source only changes once the backend accepted it. If the restart
    /// is rejected the new source stays loaded and the state drops to Paused.
    pub fn load_source(&mut self, source: AudioSource) -> Result<PlaybackState, PlaybackError> {
        log::info!("[playback] loading source {}", source.url());
        if self.state == PlaybackState::Uninitialized {
            self.source = source;
            return Ok(self.state);
        }
        self.backend.set_source(&source)?;
        self.source = source;
        if self.state == PlaybackState::Playing {
            if let Err(e) = self.backend.play() {
                log::warn!("[playback] restart on new source failed: {}", e);
                self.state = PlaybackState::Paused;
                return Err(e);
            }
        }
        Ok(self.state)
    }
}
