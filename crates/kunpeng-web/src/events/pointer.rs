//! Orbit controls: drag rotates, wheel zooms.

use kunpeng_core::SceneComposer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
struct OrbitDrag {
    active: bool,
    pointer_id: i32,
    last_x: f32,
    last_y: f32,
}

pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, scene: Rc<RefCell<SceneComposer>>) {
    let drag = Rc::new(RefCell::new(OrbitDrag::default()));

    // pointerdown
    {
        let drag_m = drag.clone();
        let canvas_target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag_m.borrow_mut();
            d.active = true;
            d.pointer_id = ev.pointer_id();
            d.last_x = ev.client_x() as f32;
            d.last_y = ev.client_y() as f32;
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let drag_m = drag.clone();
        let scene_m = scene.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag_m.borrow_mut();
            if !d.active || d.pointer_id != ev.pointer_id() {
                return;
            }
            let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
            let (dx, dy) = (x - d.last_x, y - d.last_y);
            d.last_x = x;
            d.last_y = y;
            scene_m.borrow_mut().camera_mut().rotate(dx, dy);
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup / pointercancel
    for name in ["pointerup", "pointercancel"] {
        let drag_m = drag.clone();
        let canvas_target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut d = drag_m.borrow_mut();
            if d.active && d.pointer_id == ev.pointer_id() {
                d.active = false;
                let _ = canvas_target.release_pointer_capture(ev.pointer_id());
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // wheel
    {
        let scene_w = scene;
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            scene_w.borrow_mut().camera_mut().zoom(ev.delta_y() as f32);
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
