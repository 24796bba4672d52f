//! WebAssembly exports for the playground.
//!
//! These are exposed to JavaScript via wasm-bindgen. The host wires DOM
//! events to [`WasmComposer`] methods and applies the JSON style returned by
//! [`WasmComposer::style_json`] after each call.
//!
//! Build without default features so the filters run single-threaded.

use wasm_bindgen::prelude::*;

use crate::composer::{EffectComposer, Rect};
use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::export::ExportOutcome;
use crate::source::DecodedImage;

fn to_js(err: PlaygroundError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Effect Composer
// ============================================================================

#[wasm_bindgen]
pub struct WasmComposer {
    inner: EffectComposer,
}

#[wasm_bindgen]
impl WasmComposer {
    /// Create a composer; `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmComposer, JsValue> {
        let config = if config_json.trim().is_empty() {
            PlaygroundConfig::default()
        } else {
            PlaygroundConfig::from_json_str(config_json).map_err(to_js)?
        };
        let inner = EffectComposer::new(config).map_err(to_js)?;
        Ok(WasmComposer { inner })
    }

    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.inner.set_mode_by_id(mode).map_err(to_js)
    }

    /// Raw value of the intensity `<input>`.
    pub fn set_intensity(&mut self, value: &str) {
        self.inner.set_intensity_input(value);
    }

    pub fn toggle_layer(&mut self, layer: &str) -> Result<(), JsValue> {
        self.inner.toggle_layer_by_id(layer).map(|_| ()).map_err(to_js)
    }

    /// Pointer position plus the image's bounding client rect.
    pub fn pointer_move(&mut self, x: f32, y: f32, left: f32, top: f32, width: f32, height: f32) {
        self.inner.pointer_move(Rect::new(left, top, width, height), x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    /// `KeyboardEvent.key`; returns true when the host should `preventDefault`.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.inner.key_down_named(key)
    }

    pub fn select_file(&mut self, name: &str) {
        self.inner.select_file(name);
    }

    pub fn set_url(&mut self, url: &str) -> bool {
        self.inner.set_url(url)
    }

    /// Deliver `ImageData` pixels once the image element has loaded.
    pub fn load_rgba(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        origin_clean: bool,
    ) -> Result<(), JsValue> {
        let image = DecodedImage::from_rgba(width, height, data.to_vec(), origin_clean).map_err(to_js)?;
        self.inner.complete_load(image);
        Ok(())
    }

    /// Deliver encoded file bytes from a `FileReader`.
    pub fn load_encoded(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_encoded(bytes, true).map_err(to_js)
    }

    pub fn filter_css(&self) -> String {
        self.inner.filter().to_css()
    }

    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    pub fn style_json(&self) -> Result<String, JsValue> {
        self.inner
            .render()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// PNG bytes when the export succeeded; `undefined` otherwise (check
    /// `status()` for blocked or failed exports).
    pub fn export_png(&mut self) -> Option<Vec<u8>> {
        match self.inner.export() {
            ExportOutcome::Saved(export) => Some(export.bytes),
            _ => None,
        }
    }

    pub fn export_file_name(&self) -> String {
        self.inner.config().export_file_name.clone()
    }
}

// ============================================================================
// Slider Summary
// ============================================================================

/// Summary sentence for the three interface sliders (raw input values).
#[wasm_bindgen]
pub fn slider_summary(clarity: &str, play: &str, speed: &str) -> String {
    crate::sliders::SliderValues::from_inputs([
        ("clarity", clarity),
        ("play", play),
        ("speed", speed),
    ])
    .summary()
    .to_string()
}
