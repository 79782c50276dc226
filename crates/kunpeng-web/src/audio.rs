//! WebAudio implementation of the playback backend.
//!
//! Graph: `<audio>` element -> MediaElementAudioSourceNode -> AnalyserNode ->
//! destination. Built once on the first user gesture; later uploads only swap
//! the element's `src`.

use crate::constants::{CROSS_ORIGIN, FFT_SIZE};
use kunpeng_core::{AudioBackend, AudioSource, PlaybackController, PlaybackError, SpectrumSource};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(what: &str, e: JsValue) -> PlaybackError {
    PlaybackError::Backend(format!("{}: {:?}", what, e))
}

/// Read-only view of the live analyser node.
pub struct WebAnalyser {
    node: web::AnalyserNode,
}

impl SpectrumSource for WebAnalyser {
    fn bin_count(&self) -> usize {
        self.node.frequency_bin_count() as usize
    }

    fn fill(&self, out: &mut [u8]) {
        self.node.get_byte_frequency_data(out);
    }
}

struct Graph {
    ctx: web::AudioContext,
    element: web::HtmlAudioElement,
    // Held so the node is not collected while the element plays
    _source: web::MediaElementAudioSourceNode,
}

#[derive(Default)]
pub struct WebAudioBackend {
    graph: Option<Graph>,
}

impl WebAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn graph(&self) -> Result<&Graph, PlaybackError> {
        self.graph
            .as_ref()
            .ok_or_else(|| PlaybackError::Backend("audio graph not built".into()))
    }
}

/// Await a promise in the background; rejections are logged, not surfaced.
fn settle(label: &'static str, promise: js_sys::Promise) {
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::error!("[audio] {} rejected: {:?}", label, e);
        }
    });
}

impl AudioBackend for WebAudioBackend {
    type Analyser = WebAnalyser;

    fn build_graph(&mut self, source: &AudioSource) -> Result<WebAnalyser, PlaybackError> {
        let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| js_err("AnalyserNode", e))?;
        analyser.set_fft_size(FFT_SIZE);

        let element = web::HtmlAudioElement::new().map_err(|e| js_err("HTMLAudioElement", e))?;
        element.set_cross_origin(Some(CROSS_ORIGIN));
        element.set_loop(true);
        element.set_src(source.url());

        let media = ctx
            .create_media_element_source(&element)
            .map_err(|e| js_err("MediaElementAudioSourceNode", e))?;
        media
            .connect_with_audio_node(&analyser)
            .map_err(|e| js_err("connect source", e))?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| js_err("connect analyser", e))?;

        log::info!(
            "[audio] graph built: fft={} bins={}",
            FFT_SIZE,
            analyser.frequency_bin_count()
        );
        self.graph = Some(Graph {
            ctx,
            element,
            _source: media,
        });
        Ok(WebAnalyser { node: analyser })
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        let promise = self
            .graph()?
            .ctx
            .resume()
            .map_err(|e| js_err("resume", e))?;
        settle("resume", promise);
        Ok(())
    }

    fn is_suspended(&self) -> bool {
        self.graph
            .as_ref()
            .map(|g| g.ctx.state() == web::AudioContextState::Suspended)
            .unwrap_or(false)
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let promise = self
            .graph()?
            .element
            .play()
            .map_err(|e| js_err("play", e))?;
        settle("play", promise);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(g) = &self.graph {
            if let Err(e) = g.element.pause() {
                log::warn!("[audio] pause failed: {:?}", e);
            }
        }
    }

    fn set_source(&mut self, source: &AudioSource) -> Result<(), PlaybackError> {
        self.graph()?.element.set_src(source.url());
        Ok(())
    }
}

/// Session URL for an uploaded file.
pub fn object_url(file: &web::File) -> anyhow::Result<String> {
    web::Url::create_object_url_with_blob(file)
        .map_err(|e| anyhow::anyhow!("createObjectURL: {:?}", e))
}

pub fn revoke_object_url(url: &str) {
    if let Err(e) = web::Url::revoke_object_url(url) {
        log::warn!("[audio] revokeObjectURL failed: {:?}", e);
    }
}

/// Object URL of the upload currently handed to playback.
#[derive(Default)]
pub struct UploadSlot {
    current: Option<String>,
}

impl UploadSlot {
    /// Take ownership of `url`, revoking the upload it replaces.
    pub fn adopt(&mut self, url: String) {
        if let Some(old) = self.current.replace(url) {
            revoke_object_url(&old);
        }
    }
}

/// The controller as shared between UI handlers and the frame loop.
pub type SharedPlayback = Rc<RefCell<PlaybackController<WebAudioBackend>>>;
