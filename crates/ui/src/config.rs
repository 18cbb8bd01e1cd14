//! Grid configuration handed over by the host page
//!
//! The host serves `/config.js`, which sets `window.GRIDFEED_CONFIG` before
//! the wasm module starts. A missing or malformed object falls back to the
//! defaults.

use gridfeed_core::{ConfigError, GridConfig};
use wasm_bindgen::JsValue;
use web_sys::window;

const CONFIG_GLOBAL: &str = "GRIDFEED_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rejected config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Parse and validate the JSON form of a [`GridConfig`]
pub fn decode(json: &str) -> Result<GridConfig, DecodeError> {
    let config: GridConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Read `window.GRIDFEED_CONFIG`, or the defaults
pub fn load() -> GridConfig {
    let Some(json) = read_global() else {
        tracing::warn!("{CONFIG_GLOBAL} not found, using default grid config");
        return GridConfig::default();
    };

    decode(&json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring {CONFIG_GLOBAL}");
        GridConfig::default()
    })
}

fn read_global() -> Option<String> {
    let window = window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}
