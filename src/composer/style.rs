//! Declarative style output for the hosting UI.
//!
//! The host never mutates classes or attributes based on its own bookkeeping;
//! it applies a [`RenderedStyle`] produced from the composer after each event.

use serde::Serialize;

use super::layers::Layer;
use super::mode::Mode;
use super::state::ComposerState;

/// Pressed state of one toggle button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub id: &'static str,
    pub pressed: bool,
}

/// Everything the host needs to paint the playground.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedStyle {
    /// CSS `filter` for the preview image.
    pub filter: String,
    /// CSS `transform` for the preview image.
    pub transform: String,
    pub mode: Mode,
    pub hint: String,
    pub description: String,
    pub status: String,
    pub intensity: u8,
    pub intensity_label: String,
    pub modes: Vec<ControlState>,
    pub layers: Vec<ControlState>,
}

impl RenderedStyle {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Map composer state and texts to a style description.
pub fn render(
    state: &ComposerState,
    hint: &str,
    description: &str,
    status: &str,
    perspective_px: f32,
) -> RenderedStyle {
    let transform = if state.mode == Mode::Tilt {
        state.tilt.to_css_transform(perspective_px)
    } else {
        "none".to_string()
    };

    RenderedStyle {
        filter: state.filter().to_css(),
        transform,
        mode: state.mode,
        hint: hint.to_string(),
        description: description.to_string(),
        status: status.to_string(),
        intensity: state.intensity.value(),
        intensity_label: format!("{}%", state.intensity.value()),
        modes: Mode::ALL
            .iter()
            .map(|m| ControlState {
                id: m.id(),
                pressed: *m == state.mode,
            })
            .collect(),
        layers: Layer::ALL
            .iter()
            .map(|l| ControlState {
                id: l.id(),
                pressed: state.layers.contains(*l),
            })
            .collect(),
    }
}

/// Summary line for the current recipe, e.g. `Orbit · 65% · layers: scan, grain`.
pub fn recipe_status(state: &ComposerState) -> String {
    let layers = state.layers.application_order();
    let layer_text = if layers.is_empty() {
        "none".to_string()
    } else {
        layers.iter().map(Layer::id).collect::<Vec<_>>().join(", ")
    };
    format!(
        "{} · {}% · layers: {}",
        state.mode.label(),
        state.intensity.value(),
        layer_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::state::Intensity;
    use crate::composer::tilt::{ArrowKey, Rect};

    #[test]
    fn test_recipe_status() {
        let mut state = ComposerState::default();
        assert_eq!(recipe_status(&state), "Orbit · 65% · layers: none");

        state.toggle_layer(Layer::Vignette);
        state.toggle_layer(Layer::Scan);
        state.set_intensity(Intensity::new(30));
        assert_eq!(recipe_status(&state), "Orbit · 30% · layers: scan, vignette");
    }

    #[test]
    fn test_render_pressed_controls() {
        let mut state = ComposerState::default();
        state.set_mode(Mode::Glitch);
        state.toggle_layer(Layer::Mono);

        let style = render(&state, "h", "d", "s", 800.0);

        let pressed_modes: Vec<_> = style.modes.iter().filter(|c| c.pressed).map(|c| c.id).collect();
        assert_eq!(pressed_modes, vec!["glitch"]);
        let pressed_layers: Vec<_> = style.layers.iter().filter(|c| c.pressed).map(|c| c.id).collect();
        assert_eq!(pressed_layers, vec!["mono"]);
        assert_eq!(style.transform, "none");
        assert_eq!(style.intensity_label, "65%");
        assert_eq!(style.filter, state.filter().to_css());
    }

    #[test]
    fn test_render_tilt_transform() {
        let mut state = ComposerState::default();
        state.set_mode(Mode::Tilt);
        assert_eq!(
            render(&state, "", "", "", 800.0).transform,
            "perspective(800px) rotateX(0deg) rotateY(0deg)"
        );

        state.pointer_move(Rect::new(0.0, 0.0, 100.0, 100.0), 100.0, 50.0);
        state.nudge(ArrowKey::Up, 3.0);
        assert_eq!(
            render(&state, "", "", "", 600.0).transform,
            "perspective(600px) rotateX(3deg) rotateY(18deg)"
        );
    }

    #[test]
    fn test_render_json() {
        let style = render(&ComposerState::default(), "h", "d", "s", 800.0);
        let json = style.to_json().unwrap();
        assert!(json.contains(r#""mode":"orbit""#));
        assert!(json.contains(r#""filter":"saturate(1.52) contrast(1.195)""#));
    }
}
