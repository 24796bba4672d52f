//! Filter primitives and their ordered composition.
//!
//! A [`ComposedFilter`] has two renderings that must agree: the CSS filter
//! expression handed to the live preview, and [`ComposedFilter::apply`], which
//! runs the same primitives in the same order over an RGBA raster for export.

use std::fmt;

use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use super::blur::gaussian_blur_u8;
use super::color_adjust::{brightness_u8, contrast_u8, saturate_u8};
use super::color_science::{grayscale_u8, hue_rotate_u8, sepia_u8};

/// A single filter function with its amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "kebab-case")]
pub enum FilterPrimitive {
    /// Saturation multiplier, 1.0 = identity.
    Saturate(f32),
    /// Contrast multiplier, 1.0 = identity.
    Contrast(f32),
    /// Hue rotation in degrees.
    HueRotate(f32),
    /// Gaussian blur radius in pixels.
    Blur(f32),
    /// Brightness multiplier, 1.0 = identity.
    Brightness(f32),
    /// Grayscale amount, 0.0 = identity.
    Grayscale(f32),
    /// Sepia amount, 0.0 = identity.
    Sepia(f32),
}

impl FilterPrimitive {
    /// CSS function name.
    pub fn name(&self) -> &'static str {
        match self {
            FilterPrimitive::Saturate(_) => "saturate",
            FilterPrimitive::Contrast(_) => "contrast",
            FilterPrimitive::HueRotate(_) => "hue-rotate",
            FilterPrimitive::Blur(_) => "blur",
            FilterPrimitive::Brightness(_) => "brightness",
            FilterPrimitive::Grayscale(_) => "grayscale",
            FilterPrimitive::Sepia(_) => "sepia",
        }
    }

    pub fn amount(&self) -> f32 {
        match *self {
            FilterPrimitive::Saturate(v)
            | FilterPrimitive::Contrast(v)
            | FilterPrimitive::HueRotate(v)
            | FilterPrimitive::Blur(v)
            | FilterPrimitive::Brightness(v)
            | FilterPrimitive::Grayscale(v)
            | FilterPrimitive::Sepia(v) => v,
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            FilterPrimitive::HueRotate(_) => "deg",
            FilterPrimitive::Blur(_) => "px",
            _ => "",
        }
    }

    /// True when applying the primitive leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        match *self {
            FilterPrimitive::Saturate(v)
            | FilterPrimitive::Contrast(v)
            | FilterPrimitive::Brightness(v) => v == 1.0,
            FilterPrimitive::HueRotate(v) => v.rem_euclid(360.0) == 0.0,
            FilterPrimitive::Blur(v) | FilterPrimitive::Grayscale(v) | FilterPrimitive::Sepia(v) => {
                v <= 0.0
            }
        }
    }

    /// Apply this primitive to an image with 1, 3 or 4 channels.
    pub fn apply(&self, input: ArrayView3<u8>) -> Array3<u8> {
        match *self {
            FilterPrimitive::Saturate(v) => saturate_u8(input, v),
            FilterPrimitive::Contrast(v) => contrast_u8(input, v),
            FilterPrimitive::HueRotate(v) => hue_rotate_u8(input, v),
            FilterPrimitive::Blur(v) => gaussian_blur_u8(input, v),
            FilterPrimitive::Brightness(v) => brightness_u8(input, v),
            FilterPrimitive::Grayscale(v) => grayscale_u8(input, v),
            FilterPrimitive::Sepia(v) => sepia_u8(input, v),
        }
    }
}

impl fmt::Display for FilterPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}{})", self.name(), format_number(self.amount()), self.unit())
    }
}

/// Format a filter amount with at most three decimals and no trailing zeros.
pub fn format_number(value: f32) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Ordered list of primitives applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposedFilter {
    primitives: Vec<FilterPrimitive>,
}

impl ComposedFilter {
    pub fn new(primitives: Vec<FilterPrimitive>) -> Self {
        Self { primitives }
    }

    pub fn primitives(&self) -> &[FilterPrimitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// First primitive with the given CSS function name.
    pub fn find(&self, name: &str) -> Option<&FilterPrimitive> {
        self.primitives.iter().find(|p| p.name() == name)
    }

    /// CSS `filter` property value; `none` when there are no primitives.
    pub fn to_css(&self) -> String {
        if self.primitives.is_empty() {
            return "none".to_string();
        }
        self.primitives
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Apply every non-identity primitive in order.
    pub fn apply(&self, input: ArrayView3<u8>) -> Array3<u8> {
        let mut current = input.to_owned();
        for primitive in self.primitives.iter().filter(|p| !p.is_identity()) {
            current = primitive.apply(current.view());
        }
        current
    }
}

impl fmt::Display for ComposedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
