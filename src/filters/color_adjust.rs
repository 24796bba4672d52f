//! Color adjustment filters: Brightness, Contrast, Saturate.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Parameters follow the CSS filter functions of the same name, so an image
//! filtered here matches what a browser shows for the same filter expression.
//!
//! ## Supported Formats
//!
//! All filters accept images with 1, 3, or 4 channels:
//! - **Grayscale**: (height, width, 1) - single luminance channel
//! - **RGB**: (height, width, 3) - red, green, blue
//! - **RGBA**: (height, width, 4) - red, green, blue, alpha
//!
//! Alpha channel (if present) is always preserved unchanged.

use ndarray::{Array3, ArrayView3};

use super::core::{apply_color_matrix, map_color_values, ColorMatrix};

// ============================================================================
// Brightness
// ============================================================================

/// Scale image brightness.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `amount` - Multiplier: 0.0 = black, 1.0 = no change, > 1.0 brighter
///
/// # Returns
/// Brightness-adjusted image with same channel count
pub fn brightness_u8(input: ArrayView3<u8>, amount: f32) -> Array3<u8> {
    let amount = amount.max(0.0);
    map_color_values(input, move |v| v * amount)
}

// ============================================================================
// Contrast
// ============================================================================

/// Adjust image contrast around mid-gray.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `amount` - 0.0 = flat gray, 1.0 = no change, > 1.0 more contrast
///
/// # Returns
/// Contrast-adjusted image with same channel count
pub fn contrast_u8(input: ArrayView3<u8>, amount: f32) -> Array3<u8> {
    let amount = amount.max(0.0);
    map_color_values(input, move |v| (v - 0.5) * amount + 0.5)
}

// ============================================================================
// Saturate
// ============================================================================

/// Saturation matrix for the given amount (1.0 = identity).
pub fn saturate_matrix(amount: f32) -> ColorMatrix {
    let s = amount.max(0.0);
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

/// Adjust image saturation.
///
/// For grayscale images, this is a no-op (saturation requires color channels).
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `amount` - 0.0 = fully desaturated, 1.0 = no change, > 1.0 oversaturated
///
/// # Returns
/// Saturation-adjusted image with same channel count
pub fn saturate_u8(input: ArrayView3<u8>, amount: f32) -> Array3<u8> {
    apply_color_matrix(input, &saturate_matrix(amount))
}
