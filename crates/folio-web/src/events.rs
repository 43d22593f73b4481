use crate::dom;
use crate::frame::SharedStage;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window scroll drives the section tracker and the camera height.
pub fn wire_scroll(window: &web::Window, stage: SharedStage) {
    let w = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let offset = w.scroll_y().unwrap_or(0.0) as f32;
        if let Some(change) = stage.borrow_mut().on_scroll(offset) {
            log::debug!("[scroll] section {} -> {}", change.from, change.to);
        }
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

pub fn wire_pointer(window: &web::Window, stage: SharedStage) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        stage
            .borrow_mut()
            .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(_)>);
    window
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Keep camera aspect, scroll mapping and the canvas backing store in step
/// with the window.
pub fn wire_resize(window: &web::Window, canvas: web::HtmlCanvasElement, stage: SharedStage) {
    let w = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::viewport_size(&w);
        dom::sync_canvas_backing_size(&canvas);
        stage
            .borrow_mut()
            .on_resize(width, height, dom::pixel_ratio(&w));
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}
