#![cfg(target_arch = "wasm32")]
mod constants;
mod dom;
mod events;
mod frame;
mod loader;
mod settings_panel;

use constants::*;
use folio_core::render::GpuState;
use folio_core::{SceneConfig, Stage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

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

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_affordances(&document);

    let (backing_w, backing_h) = dom::sync_canvas_backing_size(&canvas);
    let gpu = GpuState::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), backing_w, backing_h).await?;

    let config = match canvas.get_attribute(COMPANION_ATTR) {
        Some(path) if !path.is_empty() => SceneConfig::with_companion(path),
        _ => SceneConfig::default(),
    };
    let (css_w, css_h) = dom::viewport_size(&window);
    let mut stage = Stage::new(gpu, config, css_w, css_h)?;
    stage.on_resize(css_w, css_h, dom::pixel_ratio(&window));
    stage.on_scroll(window.scroll_y().unwrap_or(0.0) as f32);
    let pending = stage.pending_asset().map(str::to_string);
    let stage = Rc::new(RefCell::new(stage));

    events::wire_scroll(&window, stage.clone());
    events::wire_pointer(&window, stage.clone());
    events::wire_resize(&window, canvas.clone(), stage.clone());
    settings_panel::build(&document, SETTINGS_PANEL_ID, stage.clone())
        .map_err(|e| anyhow::anyhow!(format!("settings panel: {:?}", e)))?;
    if let Some(path) = pending {
        loader::load_companion(stage.clone(), path);
    }

    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(stage, canvas)));
    frame::start_loop(ctx);
    log::info!("folio-web ready");
    Ok(())
}

fn wire_affordances(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, DOWNLOAD_BUTTON_ID, move || {
        if let Err(e) = dom::trigger_download(&doc, DOWNLOAD_HREF, DOWNLOAD_FILENAME) {
            log::warn!("[download] {:?}", e);
        }
    });
    dom::add_click_listener(document, PROFILE_BUTTON_ID, || {
        dom::open_in_new_tab(PROFILE_URL);
    });
}
