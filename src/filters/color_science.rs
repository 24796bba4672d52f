//! Color science filters: Hue Rotate, Grayscale, Sepia.
//!
//! All three are linear RGB transforms expressed as the 3x3 matrices of the
//! CSS Filter Effects specification. Grayscale input is returned unchanged.

use ndarray::{Array3, ArrayView3};

use super::core::{apply_color_matrix, ColorMatrix};

// ============================================================================
// Hue Rotate
// ============================================================================

/// Hue rotation matrix for an angle in degrees.
pub fn hue_rotate_matrix(degrees: f32) -> ColorMatrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

/// Rotate image hue.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `degrees` - Rotation in degrees (any sign, wraps around)
///
/// # Returns
/// Hue-rotated image with same channel count
pub fn hue_rotate_u8(input: ArrayView3<u8>, degrees: f32) -> Array3<u8> {
    apply_color_matrix(input, &hue_rotate_matrix(degrees))
}

// ============================================================================
// Grayscale
// ============================================================================

/// Grayscale matrix; `amount` is clamped to 0.0-1.0 (1.0 = fully gray).
pub fn grayscale_matrix(amount: f32) -> ColorMatrix {
    let s = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * s, 0.7152 - 0.7152 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 + 0.2848 * s, 0.0722 - 0.0722 * s],
        [0.2126 - 0.2126 * s, 0.7152 - 0.7152 * s, 0.0722 + 0.9278 * s],
    ]
}

/// Blend an image toward its BT.709 luminosity.
pub fn grayscale_u8(input: ArrayView3<u8>, amount: f32) -> Array3<u8> {
    apply_color_matrix(input, &grayscale_matrix(amount))
}

// ============================================================================
// Sepia
// ============================================================================

/// Sepia matrix; `amount` is clamped to 0.0-1.0.
pub fn sepia_matrix(amount: f32) -> ColorMatrix {
    let s = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * s, 0.769 - 0.769 * s, 0.189 - 0.189 * s],
        [0.349 - 0.349 * s, 0.686 + 0.314 * s, 0.168 - 0.168 * s],
        [0.272 - 0.272 * s, 0.534 - 0.534 * s, 0.131 + 0.869 * s],
    ]
}

/// Tint an image toward sepia.
pub fn sepia_u8(input: ArrayView3<u8>, amount: f32) -> Array3<u8> {
    apply_color_matrix(input, &sepia_matrix(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn rgb(r: u8, g: u8, b: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img
    }

    #[test]
    fn test_hue_rotate_zero_is_identity() {
        let img = rgb(200, 40, 90);
        let result = hue_rotate_u8(img.view(), 0.0);

        for c in 0..3 {
            assert!((result[[0, 0, c]] as i32 - img[[0, 0, c]] as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_hue_rotate_full_turn_is_identity() {
        let img = rgb(30, 180, 220);
        let result = hue_rotate_u8(img.view(), 360.0);

        for c in 0..3 {
            assert!((result[[0, 0, c]] as i32 - img[[0, 0, c]] as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_hue_rotate_moves_red_toward_green() {
        let img = rgb(255, 0, 0);
        let result = hue_rotate_u8(img.view(), 120.0);

        assert!(result[[0, 0, 1]] > result[[0, 0, 0]]);
    }

    #[test]
    fn test_grayscale_full() {
        let img = rgb(0, 255, 0);
        let result = grayscale_u8(img.view(), 1.0);

        // 0.7152 * 255 ≈ 182
        assert!((result[[0, 0, 0]] as i32 - 182).abs() <= 1);
        assert_eq!(result[[0, 0, 0]], result[[0, 0, 2]]);
    }

    #[test]
    fn test_grayscale_amount_clamped() {
        let img = rgb(0, 255, 0);
        assert_eq!(grayscale_u8(img.view(), 4.0), grayscale_u8(img.view(), 1.0));
        assert_eq!(grayscale_u8(img.view(), -1.0), img);
    }

    #[test]
    fn test_sepia_warms_white() {
        let img = rgb(255, 255, 255);
        let result = sepia_u8(img.view(), 1.0);

        assert_eq!(result[[0, 0, 0]], 255);
        assert!(result[[0, 0, 2]] < result[[0, 0, 1]]);
    }
}
