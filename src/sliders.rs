//! "Tune the interface" sliders and the summary sentence they produce.

use serde::{Deserialize, Serialize};

/// Clarity, play and speed, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderValues {
    pub clarity: u8,
    pub play: u8,
    pub speed: u8,
}

impl Default for SliderValues {
    fn default() -> Self {
        Self {
            clarity: 80,
            play: 65,
            speed: 90,
        }
    }
}

/// Which summary applies to a slider combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    QuickInsight,
    ClarityFirst,
    Delight,
    Balanced,
}

impl Profile {
    pub fn summary(&self) -> &'static str {
        match self {
            Profile::QuickInsight => {
                "This interface is tuned for quick insight with a playful edge — ideal for busy teams who still care about craft."
            }
            Profile::ClarityFirst => {
                "Here, clarity is prioritized above all else — a good fit for critical workflows and decision-heavy contexts."
            }
            Profile::Delight => {
                "This configuration leans into delight and discovery — best used for exploratory or learning-focused experiences."
            }
            Profile::Balanced => {
                "These settings suggest a balanced experience, ready to adjust based on your team and users."
            }
        }
    }
}

/// Parse one slider value: clamped to 0-100, non-numeric input is 0.
fn parse_value(text: &str) -> u8 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

impl SliderValues {
    /// Build from `(slider key, raw value)` pairs. Unknown keys are ignored and
    /// sliders that are absent keep their defaults.
    pub fn from_inputs<'a>(inputs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut values = SliderValues::default();
        for (key, raw) in inputs {
            let v = parse_value(raw);
            match key {
                "clarity" => values.clarity = v,
                "play" => values.play = v,
                "speed" => values.speed = v,
                _ => {}
            }
        }
        values
    }

    pub fn profile(&self) -> Profile {
        if self.clarity >= 75 && self.play >= 60 && self.speed >= 80 {
            Profile::QuickInsight
        } else if self.clarity >= 75 && self.play < 50 {
            Profile::ClarityFirst
        } else if self.play >= 75 {
            Profile::Delight
        } else {
            Profile::Balanced
        }
    }

    pub fn summary(&self) -> &'static str {
        self.profile().summary()
    }
}
