//! Playground configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all) is
//! enough. Values are validated after loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::composer::{Layer, Mode, TILT_MAX_DEGREES};
use crate::error::{PlaygroundError, Result};

/// Default download name for exported snapshots.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "interaction-playground.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Mode selected when the composer is created.
    pub initial_mode: Mode,
    /// Intensity (0-100) when the composer is created.
    pub initial_intensity: u8,
    /// Layers active when the composer is created, oldest first.
    pub initial_layers: Vec<Layer>,
    /// Degrees added per arrow key press in tilt mode.
    pub tilt_step_degrees: f32,
    /// CSS perspective distance used for the tilt transform.
    pub perspective_px: f32,
    /// File name offered for exported PNGs.
    pub export_file_name: String,
    pub parallax: ParallaxConfig,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            initial_mode: Mode::Orbit,
            initial_intensity: 65,
            initial_layers: Vec::new(),
            tilt_step_degrees: 3.0,
            perspective_px: 800.0,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            parallax: ParallaxConfig::default(),
        }
    }
}

/// Decorative constellation field settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub node_count: usize,
    /// Nodes closer than this (in pixels) are linked.
    pub link_distance: f32,
    /// Fraction of the remaining distance covered per animation step.
    pub easing: f32,
    pub seed: u64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            node_count: 26,
            link_distance: 140.0,
            easing: 0.06,
            seed: 0x5eed,
        }
    }
}

impl PlaygroundConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PlaygroundConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(PlaygroundError::InvalidConfig { reason });

        if self.initial_intensity > 100 {
            return invalid(format!(
                "initial_intensity must be at most 100, got {}",
                self.initial_intensity
            ));
        }
        if !(self.tilt_step_degrees > 0.0 && self.tilt_step_degrees <= TILT_MAX_DEGREES) {
            return invalid(format!(
                "tilt_step_degrees must be in (0, {TILT_MAX_DEGREES}], got {}",
                self.tilt_step_degrees
            ));
        }
        if !(self.perspective_px > 0.0) {
            return invalid("perspective_px must be positive".to_string());
        }
        if !self.export_file_name.to_ascii_lowercase().ends_with(".png")
            || self.export_file_name.len() <= ".png".len()
        {
            return invalid(format!(
                "export_file_name must name a .png file, got '{}'",
                self.export_file_name
            ));
        }
        if self.parallax.node_count == 0 {
            return invalid("parallax.node_count must be at least 1".to_string());
        }
        if !(self.parallax.link_distance > 0.0) {
            return invalid("parallax.link_distance must be positive".to_string());
        }
        if !(self.parallax.easing > 0.0 && self.parallax.easing <= 1.0) {
            return invalid(format!(
                "parallax.easing must be in (0, 1], got {}",
                self.parallax.easing
            ));
        }
        // Duplicates and overflow are reported by the stack conversion.
        crate::composer::LayerStack::try_from(self.initial_layers.clone())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlaygroundConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.export_file_name, "interaction-playground.png");
        assert_eq!(config.parallax.node_count, 26);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PlaygroundConfig::from_json_str(
            r#"{"initial_mode": "tilt", "initial_layers": ["grain", "scan"], "parallax": {"seed": 7}}"#,
        )
        .unwrap();

        assert_eq!(config.initial_mode, Mode::Tilt);
        assert_eq!(config.initial_layers, vec![Layer::Grain, Layer::Scan]);
        assert_eq!(config.initial_intensity, 65);
        assert_eq!(config.parallax.seed, 7);
        assert_eq!(config.parallax.link_distance, 140.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{"initial_intensity": 140}"#,
            r#"{"tilt_step_degrees": 0}"#,
            r#"{"tilt_step_degrees": 40}"#,
            r#"{"export_file_name": "snapshot.jpg"}"#,
            r#"{"export_file_name": ".png"}"#,
            r#"{"parallax": {"easing": 0}}"#,
            r#"{"parallax": {"node_count": 0}}"#,
            r#"{"initial_layers": ["scan", "scan"]}"#,
            r#"{"initial_layers": ["scan", "mono", "grain", "vignette"]}"#,
        ] {
            let err = PlaygroundConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, PlaygroundError::InvalidConfig { .. }), "{json}: {err}");
        }
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let err = PlaygroundConfig::from_json_str(r#"{"initial_mode": "vortex"}"#).unwrap_err();
        assert!(matches!(err, PlaygroundError::Json(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"initial_intensity": 20, "export_file_name": "shot.PNG"}}"#).unwrap();

        let config = PlaygroundConfig::from_path(file.path()).unwrap();
        assert_eq!(config.initial_intensity, 20);
        assert_eq!(config.export_file_name, "shot.PNG");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlaygroundConfig::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PlaygroundError::Io(_)));
    }
}
