//! Browser bridge for the settings core.
//!
//! The web shell exchanges bincode-serialized events, effects and view models
//! with the core through these functions. Bridge failures are logged and
//! handed to JavaScript as exceptions.

use lazy_static::lazy_static;
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

use crux_core::{
    bridge::{Bridge, EffectId},
    Core,
};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

fn bridge_error(context: &str, error: impl std::fmt::Display) -> JsValue {
    log::error!("{context}: {error}");
    JsValue::from_str(&format!("{context}: {error}"))
}

/// Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to initialize logger");
}

/// Feed a serialized `Event` to the core; returns the serialized effect requests.
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    let mut requests = Vec::new();
    CORE.update(event_bytes, &mut requests)
        .map_err(|e| bridge_error("process_event", e))?;
    Ok(requests)
}

/// Resolve effect `id` with the shell's serialized output, e.g. the outcome
/// of an upload or a fired schedule callback.
#[wasm_bindgen]
pub fn handle_response(id: u32, output_bytes: &[u8]) -> Result<Vec<u8>, JsValue> {
    let mut requests = Vec::new();
    CORE.resolve(EffectId(id), output_bytes, &mut requests)
        .map_err(|e| bridge_error("handle_response", e))?;
    Ok(requests)
}

/// Serialized `ViewModel` for the current state.
#[wasm_bindgen]
pub fn view() -> Result<Vec<u8>, JsValue> {
    let mut view_model = Vec::new();
    CORE.view(&mut view_model)
        .map_err(|e| bridge_error("view", e))?;
    Ok(view_model)
}
