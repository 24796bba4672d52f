//! Pointer and keyboard driven tilt for the tilt mode.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;
use crate::filters::composed::format_number;

/// Largest tilt on either axis, in degrees.
pub const TILT_MAX_DEGREES: f32 = 18.0;

/// Bounding box of the preview image in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Arrow keys recognised by the tilt handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

impl FromStr for ArrowKey {
    type Err = PlaygroundError;

    /// Parses DOM `KeyboardEvent.key` names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowUp" => Ok(ArrowKey::Up),
            "ArrowDown" => Ok(ArrowKey::Down),
            "ArrowLeft" => Ok(ArrowKey::Left),
            "ArrowRight" => Ok(ArrowKey::Right),
            other => Err(PlaygroundError::UnknownKey(other.to_string())),
        }
    }
}

/// Rotation about the X and Y axes in degrees, each in
/// [-TILT_MAX_DEGREES, TILT_MAX_DEGREES].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltVector {
    pub x: f32,
    pub y: f32,
}

impl TiltVector {
    pub const ZERO: TiltVector = TiltVector { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-TILT_MAX_DEGREES, TILT_MAX_DEGREES),
            y: y.clamp(-TILT_MAX_DEGREES, TILT_MAX_DEGREES),
        }
    }

    /// Map a pointer position inside `bounds` to a tilt.
    ///
    /// The horizontal position rotates about Y, the vertical position about X
    /// (pointer at the top tilts the top edge away). Positions outside the
    /// box clamp to its edges.
    pub fn from_pointer(bounds: Rect, x: f32, y: f32) -> Self {
        if bounds.is_degenerate() {
            return Self::ZERO;
        }
        let rx = ((x - bounds.left) / bounds.width).clamp(0.0, 1.0);
        let ry = ((y - bounds.top) / bounds.height).clamp(0.0, 1.0);
        let span = TILT_MAX_DEGREES * 2.0;
        Self::new(-(ry - 0.5) * span, (rx - 0.5) * span)
    }

    /// Step the tilt by `step` degrees in the direction of `key`.
    pub fn nudged(&self, key: ArrowKey, step: f32) -> Self {
        match key {
            ArrowKey::Up => Self::new(self.x + step, self.y),
            ArrowKey::Down => Self::new(self.x - step, self.y),
            ArrowKey::Left => Self::new(self.x, self.y - step),
            ArrowKey::Right => Self::new(self.x, self.y + step),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// CSS transform for the preview.
    pub fn to_css_transform(&self, perspective_px: f32) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg)",
            format_number(perspective_px),
            format_number(self.x),
            format_number(self.y)
        )
    }
}
