use folio_core::constants::MAX_PIXEL_RATIO;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::debug!("[dom] no #{} on this page", element_id);
    }
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (w as f32, h as f32)
}

#[inline]
pub fn pixel_ratio(window: &web::Window) -> f64 {
    window.device_pixel_ratio().min(MAX_PIXEL_RATIO)
}

/// Match the canvas backing store to its CSS box times the (capped) pixel
/// ratio. Returns the backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let Some(w) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let dpr = pixel_ratio(&w);
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

/// Start a download of `href` through a transient anchor.
pub fn trigger_download(document: &web::Document, href: &str, filename: &str) -> Result<(), wasm_bindgen::JsValue> {
    let anchor: web::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(href);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}

pub fn open_in_new_tab(url: &str) {
    if let Some(w) = web::window() {
        if let Err(e) = w.open_with_url_and_target(url, "_blank") {
            log::warn!("[dom] could not open {}: {:?}", url, e);
        }
    }
}
