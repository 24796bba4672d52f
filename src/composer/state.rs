//! Explicit composer state and its transitions.
//!
//! [`ComposerState`] holds the three inputs of the composed filter plus the
//! ephemeral tilt. [`compose_filter`] is a pure function of the three inputs;
//! nothing else feeds into it.

use serde::{Deserialize, Serialize};

use super::layers::{Layer, LayerStack, LayerToggle};
use super::mode::Mode;
use super::tilt::{ArrowKey, Rect, TiltVector};
use crate::filters::ComposedFilter;

/// Effect strength in percent, always within 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: Intensity = Intensity(0);
    pub const MAX: Intensity = Intensity(100);

    /// Clamp any integer into range.
    pub fn new(value: i64) -> Self {
        Intensity(value.clamp(0, 100) as u8)
    }

    /// Parse slider input. Text that is not a finite number counts as 0.
    pub fn from_input(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Intensity::new(v.round() as i64),
            _ => Intensity::MIN,
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Scale factor in 0.0-1.0.
    pub fn factor(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity(65)
    }
}

impl From<i64> for Intensity {
    fn from(value: i64) -> Self {
        Intensity::new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

/// Build the composed filter: the mode's base recipe followed by each active
/// layer's primitives in fixed layer order, all scaled by intensity.
pub fn compose_filter(mode: Mode, intensity: Intensity, layers: &LayerStack) -> ComposedFilter {
    let k = intensity.factor();
    let mut primitives = mode.recipe(k);
    for layer in layers.application_order() {
        primitives.extend(layer.recipe(k));
    }
    ComposedFilter::new(primitives)
}

/// Mode, intensity, layers and tilt of one playground instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposerState {
    pub mode: Mode,
    pub intensity: Intensity,
    pub layers: LayerStack,
    #[serde(skip)]
    pub tilt: TiltVector,
}

impl ComposerState {
    pub fn new(mode: Mode, intensity: Intensity, layers: LayerStack) -> Self {
        Self {
            mode,
            intensity,
            layers,
            tilt: TiltVector::ZERO,
        }
    }

    /// Replace the mode. Leaving tilt mode flattens the tilt.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode != Mode::Tilt {
            self.tilt = TiltVector::ZERO;
        }
    }

    pub fn set_intensity(&mut self, intensity: Intensity) {
        self.intensity = intensity;
    }

    pub fn toggle_layer(&mut self, layer: Layer) -> LayerToggle {
        self.layers.toggle(layer)
    }

    /// Track the pointer; ignored outside tilt mode. Returns whether the tilt
    /// was updated.
    pub fn pointer_move(&mut self, bounds: Rect, x: f32, y: f32) -> bool {
        if self.mode != Mode::Tilt {
            return false;
        }
        self.tilt = TiltVector::from_pointer(bounds, x, y);
        true
    }

    pub fn pointer_leave(&mut self) {
        self.tilt = TiltVector::ZERO;
    }

    /// Nudge the tilt with an arrow key; only consumed in tilt mode.
    pub fn nudge(&mut self, key: ArrowKey, step: f32) -> bool {
        if self.mode != Mode::Tilt {
            return false;
        }
        self.tilt = self.tilt.nudged(key, step);
        true
    }

    pub fn filter(&self) -> ComposedFilter {
        compose_filter(self.mode, self.intensity, &self.layers)
    }
}
