//! The effect composer behind the image playground.
//!
//! [`EffectComposer`] owns an explicit [`ComposerState`] (mode, intensity,
//! layers, tilt), the preview image and the user-facing texts. Every
//! transition recomputes the composed filter, which is used verbatim both for
//! the live preview ([`EffectComposer::render`]) and for PNG export
//! ([`EffectComposer::export`]).
//!
//! ```
//! use interaction_playground::composer::{EffectComposer, Layer, Mode};
//! use interaction_playground::config::PlaygroundConfig;
//!
//! let mut composer = EffectComposer::new(PlaygroundConfig::default()).unwrap();
//! composer.set_mode(Mode::Orbit);
//! composer.set_intensity(65);
//! composer.toggle_layer(Layer::Grain);
//! assert!(composer.filter().to_css().starts_with("saturate(1.52)"));
//! ```

pub mod layers;
pub mod mode;
pub mod state;
pub mod style;
pub mod tilt;

pub use layers::{Layer, LayerStack, LayerToggle, MAX_LAYERS};
pub use mode::Mode;
pub use state::{compose_filter, ComposerState, Intensity};
pub use style::{recipe_status, render, ControlState, RenderedStyle};
pub use tilt::{ArrowKey, Rect, TiltVector, TILT_MAX_DEGREES};

use log::{debug, info, warn};

use crate::config::PlaygroundConfig;
use crate::error::{PlaygroundError, Result};
use crate::export::{exportable, render_snapshot, ExportOutcome};
use crate::filters::ComposedFilter;
use crate::source::{DecodedImage, PreviewImage};

/// Status shown when the image origin refuses pixel export.
pub const BLOCKED_MESSAGE: &str =
    "Export blocked for security reasons: this image's source does not allow saving its pixels.";

/// One playground instance.
#[derive(Debug, Clone)]
pub struct EffectComposer {
    config: PlaygroundConfig,
    state: ComposerState,
    filter: ComposedFilter,
    preview: PreviewImage,
    hint: &'static str,
    description: &'static str,
    status: String,
}

impl EffectComposer {
    /// Create a composer in the configured initial state.
    pub fn new(config: PlaygroundConfig) -> Result<Self> {
        config.validate()?;
        let layers = LayerStack::try_from(config.initial_layers.clone())?;
        let state = ComposerState::new(
            config.initial_mode,
            Intensity::new(config.initial_intensity as i64),
            layers,
        );
        let mode = state.mode;
        let mut composer = Self {
            config,
            filter: ComposedFilter::default(),
            state,
            preview: PreviewImage::new(),
            hint: mode.hint(),
            description: mode.description(),
            status: String::new(),
        };
        composer.recompute();
        Ok(composer)
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn state(&self) -> &ComposerState {
        &self.state
    }

    /// The current composed filter.
    pub fn filter(&self) -> &ComposedFilter {
        &self.filter
    }

    pub fn tilt(&self) -> TiltVector {
        self.state.tilt
    }

    pub fn hint(&self) -> &str {
        self.hint
    }

    pub fn description(&self) -> &str {
        self.description
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn preview(&self) -> &PreviewImage {
        &self.preview
    }

    fn recompute(&mut self) {
        self.filter = self.state.filter();
        self.status = recipe_status(&self.state);
        debug!("recipe {} -> {}", self.status, self.filter);
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.set_mode(mode);
        self.hint = mode.hint();
        self.description = mode.description();
        self.recompute();
    }

    /// Select a mode by control id (`"orbit"`, `"glitch"`, ...).
    pub fn set_mode_by_id(&mut self, id: &str) -> Result<()> {
        let mode = id.parse::<Mode>()?;
        self.set_mode(mode);
        Ok(())
    }

    /// Set intensity, clamped to 0-100.
    pub fn set_intensity(&mut self, value: i64) {
        self.state.set_intensity(Intensity::new(value));
        self.recompute();
    }

    /// Set intensity from raw slider text.
    pub fn set_intensity_input(&mut self, text: &str) {
        self.state.set_intensity(Intensity::from_input(text));
        self.recompute();
    }

    pub fn toggle_layer(&mut self, layer: Layer) -> LayerToggle {
        let outcome = self.state.toggle_layer(layer);
        if let LayerToggle::Evicted(old) = outcome {
            debug!("layer {layer} evicted {old}");
        }
        self.recompute();
        outcome
    }

    pub fn toggle_layer_by_id(&mut self, id: &str) -> Result<LayerToggle> {
        let layer = id.parse::<Layer>()?;
        Ok(self.toggle_layer(layer))
    }

    /// Pointer moved over the preview; only affects tilt mode.
    pub fn pointer_move(&mut self, bounds: Rect, x: f32, y: f32) -> bool {
        self.state.pointer_move(bounds, x, y)
    }

    pub fn pointer_leave(&mut self) {
        self.state.pointer_leave();
    }

    /// Arrow key pressed; returns whether the key was consumed.
    pub fn key_down(&mut self, key: ArrowKey) -> bool {
        self.state.nudge(key, self.config.tilt_step_degrees)
    }

    /// Key pressed by DOM key name; non-arrow keys are never consumed.
    pub fn key_down_named(&mut self, key: &str) -> bool {
        match key.parse::<ArrowKey>() {
            Ok(arrow) => self.key_down(arrow),
            Err(_) => false,
        }
    }

    pub fn select_file(&mut self, name: &str) {
        self.preview.select_file(name);
    }

    pub fn set_url(&mut self, url: &str) -> bool {
        self.preview.set_url(url)
    }

    /// Deliver decoded pixels for the current source.
    pub fn complete_load(&mut self, image: DecodedImage) {
        debug!(
            "image loaded {}x{} (origin clean: {})",
            image.natural_width(),
            image.natural_height(),
            image.origin_clean()
        );
        self.preview.complete_load(image);
    }

    /// Decode encoded image bytes and deliver them as the current pixels.
    pub fn load_encoded(&mut self, bytes: &[u8], origin_clean: bool) -> Result<()> {
        let image = DecodedImage::decode(bytes, origin_clean)?;
        self.complete_load(image);
        Ok(())
    }

    /// Export a PNG snapshot of the filtered image.
    ///
    /// Never fails: unmet preconditions skip silently, refusals and encoder
    /// errors are reported through the outcome and the status text.
    pub fn export(&mut self) -> ExportOutcome {
        let image = match exportable(&self.preview) {
            Ok(image) => image,
            Err(reason) => {
                debug!("export skipped: {reason:?}");
                return ExportOutcome::Skipped(reason);
            }
        };

        match render_snapshot(image, &self.filter, &self.config.export_file_name) {
            Ok(export) => {
                info!(
                    "exported {} ({}x{}, {} bytes)",
                    export.file_name,
                    export.width,
                    export.height,
                    export.bytes.len()
                );
                self.status = format!("Saved {} ({}×{})", export.file_name, export.width, export.height);
                ExportOutcome::Saved(export)
            }
            Err(PlaygroundError::ExportBlocked) => {
                warn!("export blocked by image origin");
                self.status = BLOCKED_MESSAGE.to_string();
                ExportOutcome::Blocked
            }
            Err(err) => {
                warn!("export failed: {err}");
                self.status = format!("Export failed: {err}");
                ExportOutcome::Failed(err.to_string())
            }
        }
    }

    /// Declarative style for the host to apply.
    pub fn render(&self) -> RenderedStyle {
        render(
            &self.state,
            self.hint,
            self.description,
            &self.status,
            self.config.perspective_px,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SkipReason;

    fn composer() -> EffectComposer {
        EffectComposer::new(PlaygroundConfig::default()).unwrap()
    }

    fn gradient(width: u32, height: u32, origin_clean: bool) -> DecodedImage {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 30) as u8, (y * 30) as u8, 120, 255]);
            }
        }
        DecodedImage::from_rgba(width, height, data, origin_clean).unwrap()
    }

    #[test]
    fn test_initial_state_from_config() {
        let config = PlaygroundConfig {
            initial_mode: Mode::Scan,
            initial_intensity: 10,
            initial_layers: vec![Layer::Grain],
            ..PlaygroundConfig::default()
        };
        let composer = EffectComposer::new(config).unwrap();

        assert_eq!(composer.state().mode, Mode::Scan);
        assert_eq!(composer.state().intensity.value(), 10);
        assert!(composer.state().layers.contains(Layer::Grain));
        assert_eq!(composer.status(), "Scan · 10% · layers: grain");
        assert_eq!(composer.hint(), Mode::Scan.hint());
    }

    #[test]
    fn test_set_mode_resets_texts() {
        let mut composer = composer();
        composer.set_mode(Mode::Liquid);
        assert_eq!(composer.hint(), Mode::Liquid.hint());
        assert_eq!(composer.description(), Mode::Liquid.description());
        assert!(composer.filter().find("blur").is_some());
    }

    #[test]
    fn test_set_intensity_clamps() {
        let mut composer = composer();
        composer.set_intensity(-5);
        assert_eq!(composer.state().intensity.value(), 0);
        composer.set_intensity(500);
        assert_eq!(composer.state().intensity.value(), 100);
        composer.set_intensity_input("not a number");
        assert_eq!(composer.state().intensity.value(), 0);
    }

    #[test]
    fn test_fourth_layer_scenario() {
        let mut composer = composer();
        for id in ["scan", "chromatic", "mono"] {
            assert_eq!(composer.toggle_layer_by_id(id).unwrap(), LayerToggle::Added);
        }
        assert_eq!(
            composer.toggle_layer_by_id("grain").unwrap(),
            LayerToggle::Evicted(Layer::Scan)
        );

        let active: Vec<Layer> = composer.state().layers.insertion_order().collect();
        assert_eq!(active, vec![Layer::Chromatic, Layer::Mono, Layer::Grain]);
        assert!(composer.status().ends_with("layers: chromatic, mono, grain"));
    }

    #[test]
    fn test_unknown_ids() {
        let mut composer = composer();
        assert!(matches!(
            composer.set_mode_by_id("warp"),
            Err(PlaygroundError::UnknownMode(_))
        ));
        assert!(matches!(
            composer.toggle_layer_by_id("bloom"),
            Err(PlaygroundError::UnknownLayer(_))
        ));
        assert_eq!(composer.state().mode, Mode::Orbit);
    }

    #[test]
    fn test_tilt_without_pointer_is_flat() {
        let mut composer = composer();
        composer.set_mode(Mode::Tilt);
        assert_eq!(composer.tilt(), TiltVector::ZERO);
    }

    #[test]
    fn test_arrow_keys_only_in_tilt_mode() {
        let mut composer = composer();
        assert!(!composer.key_down_named("ArrowUp"));

        composer.set_mode(Mode::Tilt);
        assert!(composer.key_down_named("ArrowUp"));
        assert!(composer.key_down_named("ArrowUp"));
        assert!(!composer.key_down_named("Enter"));
        assert_eq!(composer.tilt(), TiltVector::new(6.0, 0.0));

        composer.pointer_leave();
        assert_eq!(composer.tilt(), TiltVector::ZERO);
    }

    #[test]
    fn test_export_without_source_is_noop() {
        let mut composer = composer();
        let status_before = composer.status().to_string();

        let outcome = composer.export();

        assert_eq!(outcome, ExportOutcome::Skipped(SkipReason::NoSource));
        assert!(outcome.png().is_none());
        assert_eq!(composer.status(), status_before);
    }

    #[test]
    fn test_export_before_load_is_noop() {
        let mut composer = composer();
        composer.set_url("https://example.com/cat.png");
        assert_eq!(composer.export(), ExportOutcome::Skipped(SkipReason::NotLoaded));
    }

    #[test]
    fn test_export_saves_filtered_png() {
        let mut composer = composer();
        composer.set_mode(Mode::Mono);
        composer.set_intensity(100);
        composer.select_file("photo.png");
        let image = gradient(5, 4, true);
        composer.complete_load(image.clone());

        let outcome = composer.export();
        let export = outcome.png().unwrap();

        assert_eq!(export.file_name, "interaction-playground.png");
        assert_eq!((export.width, export.height), (5, 4));
        assert_eq!(composer.status(), "Saved interaction-playground.png (5×4)");

        let decoded = image::load_from_memory(&export.bytes).unwrap().into_rgba8();
        let expected = composer.filter().apply(image.view());
        let px = decoded.get_pixel(3, 2);
        assert_eq!(px.0[..3], [expected[[2, 3, 0]], expected[[2, 3, 1]], expected[[2, 3, 2]]]);
        // Fully desaturated by mono at 100%
        assert_eq!(px.0[0], px.0[1]);
    }

    #[test]
    fn test_export_blocked_for_cross_origin() {
        let mut composer = composer();
        composer.set_url("https://elsewhere.example/pic.jpg");
        composer.complete_load(gradient(2, 2, false));

        assert_eq!(composer.export(), ExportOutcome::Blocked);
        assert_eq!(composer.status(), BLOCKED_MESSAGE);
        assert!(composer.status().contains("security"));

        // Next transition restores the recipe summary
        composer.set_intensity(20);
        assert!(composer.status().starts_with("Orbit · 20%"));
    }

    #[test]
    fn test_load_encoded_rejects_garbage() {
        let mut composer = composer();
        composer.select_file("broken.png");
        assert!(composer.load_encoded(&[0, 1, 2, 3], true).is_err());
        assert!(composer.preview().loaded().is_none());
    }

    #[test]
    fn test_render_reflects_state() {
        let mut composer = composer();
        composer.toggle_layer(Layer::Vignette);
        let style = composer.render();

        assert_eq!(style.filter, composer.filter().to_css());
        assert_eq!(style.status, composer.status());
        assert_eq!(style.hint, Mode::Orbit.hint());
        assert!(style.layers.iter().any(|c| c.id == "vignette" && c.pressed));
    }
}
