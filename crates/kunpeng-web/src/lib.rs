#![cfg(target_arch = "wasm32")]
//! Browser shell for the Kunpeng visualizer: page markup, WebAudio playback,
//! orbit input and the WebGPU frame loop around `kunpeng-core`.

use kunpeng_core::{PlaybackController, SceneComposer, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod keys;
mod markup;
mod overlay;
mod render;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kunpeng-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    ui::install_shell(&document)?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, constants::CANVAS_ID)?;
    wire_canvas_resize(&window, &canvas);

    let config = SceneConfig {
        seed: rand::random(),
        ..SceneConfig::default()
    };
    let scene = SceneComposer::new(config)
        .map_err(|e| anyhow::anyhow!("scene setup failed: {}", e))?;
    let scene = Rc::new(RefCell::new(scene));
    let playback: audio::SharedPlayback = Rc::new(RefCell::new(PlaybackController::new(
        audio::WebAudioBackend::new(),
    )));

    events::wire_controls(&document, playback.clone())?;
    events::wire_global_keydown(&document, playback.clone());
    events::wire_orbit_controls(&canvas, scene.clone());
    ui::set_playing(&document, false);
    overlay::show(&document);

    // Without WebGPU the page stays interactive and audio still plays
    let assets = render::SceneAssets::from_scene(&scene.borrow());
    let gpu = frame::init_gpu(&canvas, assets).await;
    if gpu.is_none() {
        dom::set_text(
            &document,
            constants::OVERLAY_ENTER_ID,
            "WebGPU unavailable: audio only",
        );
    }
    let ctx = frame::FrameContext::new(scene, playback, canvas, gpu);
    frame::start_loop(Rc::new(RefCell::new(ctx)));
    Ok(())
}

/// Maintain canvas internal pixel size to match CSS size * devicePixelRatio.
fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}
