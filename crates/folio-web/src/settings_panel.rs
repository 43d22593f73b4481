//! Settings editor rendered as plain DOM inputs inside `#settings`.
//!
//! Sliders commit on `change`. Color pickers marked live apply on every
//! `input` event; the rest commit on `change` like the sliders.

use crate::frame::SharedStage;
use folio_core::settings::{COLOR_CONTROLS, NUMERIC_CONTROLS};
use folio_core::SettingChange;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

fn make_row(
    document: &web::Document,
    panel: &web::Element,
    id: &str,
    label: &str,
) -> Result<web::HtmlInputElement, JsValue> {
    let row = document.create_element("label")?;
    row.set_attribute("for", id)?;
    row.set_text_content(Some(label));
    let input: web::HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_id(id);
    row.append_child(&input)?;
    panel.append_child(&row)?;
    Ok(input)
}

fn wire_commit(input: &web::HtmlInputElement, event: &str, stage: SharedStage) {
    let source = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        let id = source.id();
        let change = match SettingChange::parse(&id, &source.value()) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("[settings] {}", e);
                return;
            }
        };
        match stage.borrow_mut().apply_setting(change) {
            Ok(effect) => log::debug!("[settings] {} -> {:?}", id, effect),
            Err(e) => log::warn!("[settings] {} rejected: {}", id, e),
        }
    }) as Box<dyn FnMut()>);
    input
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .ok();
    closure.forget();
}

/// Populate the panel. Pages without `#settings` get no editor.
pub fn build(document: &web::Document, panel_id: &str, stage: SharedStage) -> Result<(), JsValue> {
    let Some(panel) = document.get_element_by_id(panel_id) else {
        log::debug!("[settings] no #{}; editor disabled", panel_id);
        return Ok(());
    };
    let settings = stage.borrow().settings.clone();

    for control in NUMERIC_CONTROLS {
        let input = make_row(document, &panel, control.id, control.label)?;
        input.set_type("range");
        input.set_min(&control.min.to_string());
        input.set_max(&control.max.to_string());
        input.set_step(&control.step.to_string());
        input.set_value(&settings.numeric(control.key).to_string());
        wire_commit(&input, "change", stage.clone());
    }
    for control in COLOR_CONTROLS {
        let input = make_row(document, &panel, control.id, control.label)?;
        input.set_type("color");
        input.set_value(&settings.color(control.key).to_hex());
        let event = if control.live { "input" } else { "change" };
        wire_commit(&input, event, stage.clone());
    }
    Ok(())
}
