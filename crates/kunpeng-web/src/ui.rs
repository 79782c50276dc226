//! Static page shell: full-window canvas, intro overlay and control bar.
//!
//! The markup is injected once at startup so the crate ships without a
//! separate HTML template. Existing elements with the same ids win.

use crate::constants::*;
use crate::markup::{CONTROLS_HTML, OVERLAY_HTML, STYLE};
use web_sys as web;

/// Insert whatever parts of the shell the host page does not already provide.
pub fn install_shell(document: &web::Document) -> anyhow::Result<()> {
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("document has no body"))?;
    let head = document.head();

    if let Some(head) = head {
        let _ = head.insert_adjacent_html("beforeend", &format!("<style>{}</style>", STYLE));
    }
    if document.get_element_by_id(CANVAS_ID).is_none() {
        let _ = body.insert_adjacent_html("afterbegin", &format!("<canvas id=\"{}\"></canvas>", CANVAS_ID));
    }
    if document.get_element_by_id(PLAY_TOGGLE_ID).is_none() {
        let _ = body.insert_adjacent_html("beforeend", CONTROLS_HTML);
    }
    if document.get_element_by_id(OVERLAY_ID).is_none() {
        let _ = body.insert_adjacent_html("beforeend", OVERLAY_HTML);
    }
    log::debug!("[ui] shell installed");
    Ok(())
}

/// Reflect the playing flag on the toggle button.
pub fn set_playing(document: &web::Document, playing: bool) {
    crate::dom::set_text(
        document,
        PLAY_TOGGLE_ID,
        if playing { PAUSE_LABEL } else { PLAY_LABEL },
    );
}
