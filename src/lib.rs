//! Interaction Playground
//!
//! Effect composer for an interactive image playground: a primary mode, an
//! intensity and up to three stacked layers compose into a CSS-compatible
//! filter chain, which is rendered natively for PNG export. Bindings are
//! provided for Python via PyO3 and for JavaScript via wasm-bindgen.
//!
//! ## Image Format
//! Images are `ndarray` arrays of shape (height, width, channels):
//! - **RGBA**: (height, width, 4) - decoded previews and exports
//! - **RGB**: (height, width, 3) - accepted by every filter primitive
//!
//! Alpha is always preserved by color primitives; blur works on
//! premultiplied values so transparent edges do not darken.
//!
//! ## Modules
//! - [`composer`]: modes, layers, tilt and the [`composer::EffectComposer`]
//! - [`filters`]: filter primitives and the composed chain
//! - [`source`] / [`export`]: preview image lifecycle and PNG snapshots
//! - [`parallax`]: decorative background constellation
//! - [`sliders`]: "tune the interface" summary

pub mod composer;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod parallax;
pub mod sliders;
pub mod source;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use composer::{EffectComposer, Layer, Mode};
pub use config::PlaygroundConfig;
pub use error::{PlaygroundError, Result};
pub use filters::{ComposedFilter, FilterPrimitive};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyBytes;

    use crate::composer::{ArrowKey, EffectComposer, Rect};
    use crate::config::PlaygroundConfig;
    use crate::error::PlaygroundError;
    use crate::export::ExportOutcome;
    use crate::filters::{ComposedFilter, FilterPrimitive};
    use crate::sliders::SliderValues;
    use crate::source::DecodedImage;

    impl From<PlaygroundError> for PyErr {
        fn from(err: PlaygroundError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Effect Composer
    // ========================================================================

    /// Playground composer: mode, intensity, layers and tilt.
    #[pyclass(name = "EffectComposer")]
    pub struct PyEffectComposer {
        inner: EffectComposer,
    }

    #[pymethods]
    impl PyEffectComposer {
        /// Create a composer from an optional JSON configuration string.
        #[new]
        #[pyo3(signature = (config_json=None))]
        fn new(config_json: Option<&str>) -> PyResult<Self> {
            let config = match config_json {
                Some(text) => PlaygroundConfig::from_json_str(text)?,
                None => PlaygroundConfig::default(),
            };
            Ok(Self {
                inner: EffectComposer::new(config)?,
            })
        }

        fn set_mode(&mut self, mode: &str) -> PyResult<()> {
            Ok(self.inner.set_mode_by_id(mode)?)
        }

        fn set_intensity(&mut self, value: i64) {
            self.inner.set_intensity(value);
        }

        /// Toggle a layer; returns "added", "removed" or "evicted:<layer>".
        fn toggle_layer(&mut self, layer: &str) -> PyResult<String> {
            use crate::composer::LayerToggle;
            Ok(match self.inner.toggle_layer_by_id(layer)? {
                LayerToggle::Added => "added".to_string(),
                LayerToggle::Removed => "removed".to_string(),
                LayerToggle::Evicted(old) => format!("evicted:{old}"),
            })
        }

        #[pyo3(signature = (x, y, left, top, width, height))]
        fn pointer_move(&mut self, x: f32, y: f32, left: f32, top: f32, width: f32, height: f32) -> bool {
            self.inner.pointer_move(Rect::new(left, top, width, height), x, y)
        }

        fn pointer_leave(&mut self) {
            self.inner.pointer_leave();
        }

        /// Arrow key by DOM name; returns whether it was consumed.
        fn key_down(&mut self, key: &str) -> bool {
            match key.parse::<ArrowKey>() {
                Ok(arrow) => self.inner.key_down(arrow),
                Err(_) => false,
            }
        }

        fn tilt(&self) -> (f32, f32) {
            let t = self.inner.tilt();
            (t.x, t.y)
        }

        fn filter_css(&self) -> String {
            self.inner.filter().to_css()
        }

        fn status(&self) -> String {
            self.inner.status().to_string()
        }

        fn render_json(&self) -> PyResult<String> {
            self.inner
                .render()
                .to_json()
                .map_err(|e| PyValueError::new_err(e.to_string()))
        }

        fn select_file(&mut self, name: &str) {
            self.inner.select_file(name);
        }

        fn set_url(&mut self, url: &str) -> bool {
            self.inner.set_url(url)
        }

        /// Deliver RGBA pixels (height, width, 4) for the current source.
        #[pyo3(signature = (image, origin_clean=true))]
        fn load_image(&mut self, image: PyReadonlyArray3<'_, u8>, origin_clean: bool) -> PyResult<()> {
            let pixels = image.as_array().to_owned();
            self.inner
                .complete_load(DecodedImage::from_rgba_array(pixels, origin_clean)?);
            Ok(())
        }

        /// Apply the current filter to an RGB or RGBA image.
        fn apply_filter<'py>(
            &self,
            py: Python<'py>,
            image: PyReadonlyArray3<'py, u8>,
        ) -> Bound<'py, PyArray3<u8>> {
            let input = image.as_array();
            let result = self.inner.filter().apply(input);
            result.into_pyarray(py)
        }

        /// PNG bytes of the filtered preview, or None when skipped or refused.
        fn export_png<'py>(&mut self, py: Python<'py>) -> Option<Bound<'py, PyBytes>> {
            match self.inner.export() {
                ExportOutcome::Saved(export) => Some(PyBytes::new(py, &export.bytes)),
                _ => None,
            }
        }
    }

    // ========================================================================
    // Standalone Functions
    // ========================================================================

    /// Apply a filter chain given as JSON, e.g.
    /// `[{"kind": "saturate", "amount": 1.5}]`.
    #[pyfunction]
    pub fn apply_filter_chain<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        chain_json: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let primitives: Vec<FilterPrimitive> = serde_json::from_str(chain_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let input = image.as_array();
        let result = ComposedFilter::new(primitives).apply(input);
        Ok(result.into_pyarray(py))
    }

    /// Summary sentence for the clarity, play and speed sliders (0-100).
    #[pyfunction]
    #[pyo3(signature = (clarity=80, play=65, speed=90))]
    pub fn slider_summary(clarity: u8, play: u8, speed: u8) -> &'static str {
        SliderValues {
            clarity: clarity.min(100),
            play: play.min(100),
            speed: speed.min(100),
        }
        .summary()
    }

    #[pymodule]
    pub fn interaction_playground(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyEffectComposer>()?;
        m.add_function(wrap_pyfunction!(apply_filter_chain, m)?)?;
        m.add_function(wrap_pyfunction!(slider_summary, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::interaction_playground;
