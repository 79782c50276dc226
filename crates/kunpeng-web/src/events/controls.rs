use crate::audio::{self, SharedPlayback, UploadSlot};
use crate::constants::{FILE_INPUT_ID, OVERLAY_ENTER_ID, PLAY_TOGGLE_ID, UPLOAD_BUTTON_ID};
use crate::{dom, overlay, ui};
use kunpeng_core::{AudioSource, PlaybackState, UserGesture};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Play/pause from a user gesture. The first successful play dismisses the
/// overlay; failures are logged and leave the UI as it was.
pub fn toggle_playback(document: &web::Document, playback: &SharedPlayback) {
    let result = playback.borrow_mut().toggle(UserGesture::acknowledge());
    match result {
        Ok(state) => {
            ui::set_playing(document, state == PlaybackState::Playing);
            if state == PlaybackState::Playing {
                overlay::hide(document);
            }
        }
        Err(e) => log::error!("[controls] playback toggle failed: {}", e),
    }
}

pub fn wire_controls(document: &web::Document, playback: SharedPlayback) -> anyhow::Result<()> {
    for id in [PLAY_TOGGLE_ID, OVERLAY_ENTER_ID] {
        let doc = document.clone();
        let playback = playback.clone();
        dom::add_click_listener(document, id, move || toggle_playback(&doc, &playback));
    }

    let input: web::HtmlInputElement = dom::element_by_id(document, FILE_INPUT_ID)?;
    {
        let input_click = input.clone();
        dom::add_click_listener(document, UPLOAD_BUTTON_ID, move || input_click.click());
    }

    let slot = Rc::new(RefCell::new(UploadSlot::default()));
    let input_change = input.clone();
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(file) = input_change.files().and_then(|list| list.get(0)) {
            load_upload(&doc, &playback, &slot, &file);
        }
        // Allow picking the same file again
        input_change.set_value("");
    }) as Box<dyn FnMut()>);
    input
        .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("file input listener: {:?}", e))?;
    closure.forget();
    Ok(())
}

fn load_upload(
    document: &web::Document,
    playback: &SharedPlayback,
    slot: &Rc<RefCell<UploadSlot>>,
    file: &web::File,
) {
    let url = match audio::object_url(file) {
        Ok(url) => url,
        Err(e) => {
            log::error!("[controls] could not read {}: {}", file.name(), e);
            return;
        }
    };
    let source = match AudioSource::from_upload(&file.type_(), url.clone()) {
        Ok(source) => source,
        Err(e) => {
            audio::revoke_object_url(&url);
            log::warn!("[controls] ignoring {}: {}", file.name(), e);
            return;
        }
    };
    let result = playback.borrow_mut().load_source(source);
    // Keep whichever URL the element ended up on; revoke the other one
    if playback.borrow().source().url() == url {
        slot.borrow_mut().adopt(url);
    } else {
        audio::revoke_object_url(&url);
    }
    match result {
        Ok(state) => {
            log::info!("[controls] loaded {} ({:?})", file.name(), state);
            ui::set_playing(document, state == PlaybackState::Playing);
        }
        Err(e) => {
            log::error!("[controls] could not switch to {}: {}", file.name(), e);
            ui::set_playing(document, playback.borrow().is_playing());
        }
    }
}
