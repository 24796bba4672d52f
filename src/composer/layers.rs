//! Stackable effect layers.
//!
//! Layers are kept in insertion order so overflow can evict the oldest, but
//! they always contribute to the filter in their fixed declaration order
//! (scan, chromatic, mono, grain, vignette).

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;
use crate::filters::FilterPrimitive;

/// Maximum number of simultaneously active layers.
pub const MAX_LAYERS: usize = 3;

/// An independently toggled effect stacked atop the mode.
///
/// Declaration order is the order layers are applied in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Scan,
    Chromatic,
    Mono,
    Grain,
    Vignette,
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Scan,
        Layer::Chromatic,
        Layer::Mono,
        Layer::Grain,
        Layer::Vignette,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Layer::Scan => "scan",
            Layer::Chromatic => "chromatic",
            Layer::Mono => "mono",
            Layer::Grain => "grain",
            Layer::Vignette => "vignette",
        }
    }

    /// Primitives contributed by this layer, scaled by `k` (intensity / 100).
    pub fn recipe(&self, k: f32) -> Vec<FilterPrimitive> {
        use FilterPrimitive::*;
        match self {
            Layer::Scan => vec![Contrast(1.0 + 0.25 * k), Brightness(1.0 - 0.12 * k)],
            Layer::Chromatic => vec![HueRotate(24.0 * k), Saturate(1.0 + 0.5 * k)],
            Layer::Mono => vec![Grayscale(k)],
            Layer::Grain => vec![Contrast(1.0 + 0.12 * k), Sepia(0.2 * k)],
            Layer::Vignette => vec![Brightness(1.0 - 0.18 * k), Contrast(1.0 + 0.1 * k)],
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Layer {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Layer::ALL
            .into_iter()
            .find(|l| l.id() == wanted)
            .ok_or_else(|| PlaygroundError::UnknownLayer(s.to_string()))
    }
}

/// What a toggle did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerToggle {
    Added,
    Removed,
    /// Added after evicting the oldest layer.
    Evicted(Layer),
}

/// Insertion-ordered set of at most [`MAX_LAYERS`] layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Layer>", into = "Vec<Layer>")]
pub struct LayerStack {
    layers: VecDeque<Layer>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `layer` if present; otherwise add it as the newest, evicting
    /// the oldest when the stack is full.
    pub fn toggle(&mut self, layer: Layer) -> LayerToggle {
        if let Some(index) = self.layers.iter().position(|&l| l == layer) {
            self.layers.remove(index);
            return LayerToggle::Removed;
        }

        let evicted = if self.layers.len() >= MAX_LAYERS {
            self.layers.pop_front()
        } else {
            None
        };
        self.layers.push_back(layer);

        match evicted {
            Some(old) => LayerToggle::Evicted(old),
            None => LayerToggle::Added,
        }
    }

    pub fn contains(&self, layer: Layer) -> bool {
        self.layers.contains(&layer)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Oldest first.
    pub fn insertion_order(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().copied()
    }

    /// Active layers in application order.
    pub fn application_order(&self) -> Vec<Layer> {
        let mut ordered: Vec<Layer> = self.layers.iter().copied().collect();
        ordered.sort();
        ordered
    }
}

impl TryFrom<Vec<Layer>> for LayerStack {
    type Error = PlaygroundError;

    fn try_from(layers: Vec<Layer>) -> Result<Self, Self::Error> {
        let mut stack = LayerStack::new();
        for layer in layers {
            if stack.contains(layer) {
                return Err(PlaygroundError::InvalidConfig {
                    reason: format!("layer '{layer}' listed twice"),
                });
            }
            if stack.len() == MAX_LAYERS {
                return Err(PlaygroundError::InvalidConfig {
                    reason: format!("at most {MAX_LAYERS} layers can be active"),
                });
            }
            stack.toggle(layer);
        }
        Ok(stack)
    }
}

impl From<LayerStack> for Vec<Layer> {
    fn from(stack: LayerStack) -> Self {
        stack.layers.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(layers: &[Layer]) -> LayerStack {
        let mut stack = LayerStack::new();
        for &layer in layers {
            stack.toggle(layer);
        }
        stack
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut stack = LayerStack::new();
        assert_eq!(stack.toggle(Layer::Grain), LayerToggle::Added);
        assert!(stack.contains(Layer::Grain));
        assert_eq!(stack.toggle(Layer::Grain), LayerToggle::Removed);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_prior_stack() {
        let original = stack_of(&[Layer::Vignette, Layer::Scan]);
        let mut stack = original.clone();

        stack.toggle(Layer::Mono);
        stack.toggle(Layer::Mono);

        assert_eq!(stack, original);
        assert_eq!(
            stack.insertion_order().collect::<Vec<_>>(),
            vec![Layer::Vignette, Layer::Scan]
        );
    }

    #[test]
    fn test_fourth_layer_evicts_oldest() {
        let mut stack = stack_of(&[Layer::Scan, Layer::Chromatic, Layer::Mono]);

        assert_eq!(stack.toggle(Layer::Grain), LayerToggle::Evicted(Layer::Scan));
        assert_eq!(stack.len(), MAX_LAYERS);
        assert_eq!(
            stack.insertion_order().collect::<Vec<_>>(),
            vec![Layer::Chromatic, Layer::Mono, Layer::Grain]
        );
    }

    #[test]
    fn test_never_exceeds_max() {
        let mut stack = LayerStack::new();
        for round in 0..4 {
            for layer in Layer::ALL {
                stack.toggle(layer);
                assert!(stack.len() <= MAX_LAYERS, "round {round}");
            }
        }
    }

    #[test]
    fn test_application_order_is_fixed() {
        let stack = stack_of(&[Layer::Vignette, Layer::Scan, Layer::Grain]);
        assert_eq!(
            stack.application_order(),
            vec![Layer::Scan, Layer::Grain, Layer::Vignette]
        );
    }

    #[test]
    fn test_parse_layer() {
        assert_eq!("VIGNETTE".parse::<Layer>().unwrap(), Layer::Vignette);
        assert!(matches!(
            "bloom".parse::<Layer>(),
            Err(PlaygroundError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_deserialize_rejects_overfull() {
        let err = serde_json::from_str::<LayerStack>(r#"["scan","mono","grain","vignette"]"#);
        assert!(err.is_err());

        let ok: LayerStack = serde_json::from_str(r#"["mono","scan"]"#).unwrap();
        assert_eq!(ok.insertion_order().collect::<Vec<_>>(), vec![Layer::Mono, Layer::Scan]);
    }
}
