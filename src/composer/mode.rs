//! Interaction modes and their base filter recipes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;
use crate::filters::FilterPrimitive;

/// The primary interaction recipe. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Orbit,
    Glitch,
    Tilt,
    Liquid,
    Scan,
    Chromatic,
    Mono,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Orbit,
        Mode::Glitch,
        Mode::Tilt,
        Mode::Liquid,
        Mode::Scan,
        Mode::Chromatic,
        Mode::Mono,
    ];

    /// Identifier used by mode controls and serialized state.
    pub fn id(&self) -> &'static str {
        match self {
            Mode::Orbit => "orbit",
            Mode::Glitch => "glitch",
            Mode::Tilt => "tilt",
            Mode::Liquid => "liquid",
            Mode::Scan => "scan",
            Mode::Chromatic => "chromatic",
            Mode::Mono => "mono",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Orbit => "Orbit",
            Mode::Glitch => "Glitch",
            Mode::Tilt => "Tilt",
            Mode::Liquid => "Liquid",
            Mode::Scan => "Scan",
            Mode::Chromatic => "Chromatic",
            Mode::Mono => "Mono",
        }
    }

    /// Short instruction shown next to the preview.
    pub fn hint(&self) -> &'static str {
        match self {
            Mode::Orbit => "Drag the intensity slider to push color and depth.",
            Mode::Glitch => "Crank intensity to shear the hue wheel.",
            Mode::Tilt => "Move the pointer over the image or use the arrow keys to tilt it.",
            Mode::Liquid => "Higher intensity melts edges into soft color.",
            Mode::Scan => "Stack layers to build a retro monitor look.",
            Mode::Chromatic => "Pair with the mono layer for split-tone contrast.",
            Mode::Mono => "Lower intensity keeps a hint of the original color.",
        }
    }

    /// One-line description of what the recipe does.
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Orbit => "Rich saturation with a gentle contrast lift.",
            Mode::Glitch => "Hue-rotated, oversaturated and punchy.",
            Mode::Tilt => "A subtle grade with pointer-driven 3D tilt.",
            Mode::Liquid => "Soft blur with a cool hue drift.",
            Mode::Scan => "High contrast, slightly dimmed like a CRT.",
            Mode::Chromatic => "Shifted hues with boosted color.",
            Mode::Mono => "Fades color out while adding bite.",
        }
    }

    /// Base primitives scaled by `k` (intensity / 100).
    pub fn recipe(&self, k: f32) -> Vec<FilterPrimitive> {
        use FilterPrimitive::*;
        match self {
            Mode::Orbit => vec![Saturate(1.0 + 0.8 * k), Contrast(1.0 + 0.3 * k)],
            Mode::Glitch => vec![
                HueRotate(120.0 * k),
                Saturate(1.0 + 1.4 * k),
                Contrast(1.0 + 0.45 * k),
            ],
            Mode::Tilt => vec![
                Contrast(1.0 + 0.15 * k),
                Brightness(1.0 + 0.1 * k),
                Saturate(1.0 + 0.2 * k),
            ],
            Mode::Liquid => vec![
                Blur(2.4 * k),
                Saturate(1.0 + 0.6 * k),
                HueRotate(-40.0 * k),
            ],
            Mode::Scan => vec![Contrast(1.0 + 0.5 * k), Brightness(1.0 - 0.2 * k)],
            Mode::Chromatic => vec![
                HueRotate(60.0 * k),
                Saturate(1.0 + 1.1 * k),
                Contrast(1.0 + 0.2 * k),
            ],
            Mode::Mono => vec![
                Saturate(1.0 - k),
                Contrast(1.0 + 0.35 * k),
                Brightness(1.0 + 0.05 * k),
            ],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mode {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| PlaygroundError::UnknownMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_round_trips_ids() {
        for mode in Mode::ALL {
            assert_eq!(mode.id().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!(" Glitch ".parse::<Mode>().unwrap(), Mode::Glitch);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "vortex".parse::<Mode>().unwrap_err();
        assert!(matches!(err, PlaygroundError::UnknownMode(ref s) if s == "vortex"));
    }

    #[test]
    fn test_zero_intensity_recipes_are_neutral() {
        for mode in Mode::ALL {
            for primitive in mode.recipe(0.0) {
                assert!(primitive.is_identity(), "{mode}: {primitive}");
            }
        }
    }

    #[test]
    fn test_orbit_recipe_scales() {
        let recipe = Mode::Orbit.recipe(0.5);
        assert_eq!(recipe.len(), 2);
        assert!(matches!(recipe[0], FilterPrimitive::Saturate(_)));
        assert_relative_eq!(recipe[0].amount(), 1.4, epsilon = 1e-6);
        assert!(matches!(recipe[1], FilterPrimitive::Contrast(_)));
        assert_relative_eq!(recipe[1].amount(), 1.15, epsilon = 1e-6);
    }

    #[test]
    fn test_every_mode_has_text() {
        for mode in Mode::ALL {
            assert!(!mode.hint().is_empty());
            assert!(!mode.description().is_empty());
        }
    }
}
