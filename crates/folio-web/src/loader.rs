//! Companion asset fetch. Each attempt's outcome is reported to the stage,
//! which decides whether another attempt follows.

use crate::frame::SharedStage;
use folio_core::obj::parse_obj;
use folio_core::{AssetAction, AssetEvent, LoadError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn fetch_error(path: &str, err: wasm_bindgen::JsValue) -> LoadError {
    LoadError::Fetch {
        path: path.to_string(),
        reason: format!("{:?}", err),
    }
}

pub async fn fetch_text(path: &str) -> Result<String, LoadError> {
    let window = web::window().ok_or_else(|| LoadError::Fetch {
        path: path.to_string(),
        reason: "no window".to_string(),
    })?;
    let resp_value = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| fetch_error(path, e))?;
    let resp: web::Response = resp_value.dyn_into().map_err(|e| fetch_error(path, e))?;
    if !resp.ok() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: resp.status(),
        });
    }
    let text = JsFuture::from(resp.text().map_err(|e| fetch_error(path, e))?)
        .await
        .map_err(|e| fetch_error(path, e))?;
    text.as_string().ok_or_else(|| LoadError::Fetch {
        path: path.to_string(),
        reason: "response body is not text".to_string(),
    })
}

pub fn load_companion(stage: SharedStage, path: String) {
    spawn_local(async move {
        let mut path = path;
        loop {
            let event = match fetch_text(&path).await.and_then(|t| parse_obj(&t)) {
                Ok(mesh) => AssetEvent::Loaded(mesh),
                Err(e) => AssetEvent::Failed(e),
            };
            let action = stage.borrow_mut().on_asset_event(event);
            match action {
                AssetAction::Retry { path: next, attempt } => {
                    log::info!("[loader] retrying {} (attempt {})", next, attempt);
                    path = next;
                }
                AssetAction::None => break,
            }
        }
    });
}
