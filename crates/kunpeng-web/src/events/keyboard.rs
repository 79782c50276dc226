use crate::audio::SharedPlayback;
use crate::keys::{key_action, KeyAction};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    playback: &SharedPlayback,
) {
    if ev.repeat() {
        return;
    }
    match key_action(&ev.key()) {
        Some(KeyAction::TogglePlayback) => {
            super::toggle_playback(document, playback);
            ev.prevent_default();
        }
        // Overlay visibility only; playback is unaffected
        Some(KeyAction::ToggleOverlay) => {
            crate::overlay::toggle(document);
            ev.prevent_default();
        }
        None => {}
    }
}

pub fn wire_global_keydown(document: &web::Document, playback: SharedPlayback) {
    if let Some(window) = web::window() {
        let doc = document.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &doc, &playback);
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
