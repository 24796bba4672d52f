//! Gaussian blur.
//!
//! Separable two-pass convolution with edge clamping. RGBA input is blurred
//! with premultiplied alpha so transparent pixels do not bleed dark fringes;
//! alpha itself is blurred as well, matching CSS `blur()`.
//!
//! Rows of each pass run on the rayon pool when the `parallel` feature is
//! enabled.

use ndarray::{Array3, ArrayView3};

use super::core::{for_each_row, gaussian_kernel_1d, to_u8};

/// Separable Gaussian blur.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels
/// * `sigma` - Blur radius (standard deviation, in pixels)
///
/// # Returns
/// Blurred image with same dimensions and channel count
pub fn gaussian_blur_u8(input: ArrayView3<u8>, sigma: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if sigma <= 0.0 || height == 0 || width == 0 || channels == 0 {
        return input.to_owned();
    }

    let kernel = gaussian_kernel_1d(sigma);
    let half = kernel.len() as isize / 2;
    let has_alpha = channels == 4;
    let row_len = width * channels;

    // Premultiplied source in 0.0-1.0
    let mut source = vec![0.0f32; height * row_len];
    for y in 0..height {
        for x in 0..width {
            let a = if has_alpha {
                input[[y, x, 3]] as f32 / 255.0
            } else {
                1.0
            };
            for c in 0..channels {
                let v = input[[y, x, c]] as f32 / 255.0;
                source[y * row_len + x * channels + c] = if has_alpha && c < 3 { v * a } else { v };
            }
        }
    }

    // Pass 1: Horizontal
    let mut temp = vec![0.0f32; height * row_len];
    for_each_row(&mut temp, row_len, |y, row| {
        let src_row = &source[y * row_len..(y + 1) * row_len];
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sx = (x as isize + ki as isize - half).clamp(0, width as isize - 1) as usize;
                    sum += src_row[sx * channels + c] * kv;
                }
                row[x * channels + c] = sum;
            }
        }
    });

    // Pass 2: Vertical
    let mut blurred = vec![0.0f32; height * row_len];
    for_each_row(&mut blurred, row_len, |y, row| {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sy = (y as isize + ki as isize - half).clamp(0, height as isize - 1) as usize;
                    sum += temp[sy * row_len + x * channels + c] * kv;
                }
                row[x * channels + c] = sum;
            }
        }
    });

    // Unpremultiply and convert back to u8
    let mut output = Array3::<u8>::zeros((height, width, channels));
    for y in 0..height {
        for x in 0..width {
            let base = y * row_len + x * channels;
            if has_alpha {
                let a = blurred[base + 3];
                for c in 0..3 {
                    output[[y, x, c]] = if a > 1e-6 { to_u8(blurred[base + c] / a) } else { 0 };
                }
                output[[y, x, 3]] = to_u8(a);
            } else {
                for c in 0..channels {
                    output[[y, x, c]] = to_u8(blurred[base + c]);
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_zero_sigma_is_copy() {
        let mut img = Array3::<u8>::zeros((3, 3, 4));
        img[[1, 1, 0]] = 255;
        img[[1, 1, 3]] = 255;

        assert_eq!(gaussian_blur_u8(img.view(), 0.0), img);
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let img = Array3::<u8>::from_elem((5, 5, 3), 140);
        let result = gaussian_blur_u8(img.view(), 1.5);

        for v in result.iter() {
            assert!((*v as i32 - 140).abs() <= 1);
        }
    }

    #[test]
    fn test_blur_spreads_single_pixel() {
        let mut img = Array3::<u8>::zeros((7, 7, 1));
        img[[3, 3, 0]] = 255;

        let result = gaussian_blur_u8(img.view(), 1.0);

        assert!(result[[3, 3, 0]] < 255);
        assert!(result[[3, 4, 0]] > 0);
        assert!(result[[4, 3, 0]] > 0);
        assert_eq!(result.dim(), (7, 7, 1));
    }

    #[test]
    fn test_blur_transparent_neighbours_keep_color() {
        // Opaque red pixel surrounded by transparent black: premultiplied
        // blending keeps the visible color pure red.
        let mut img = Array3::<u8>::zeros((5, 5, 4));
        img[[2, 2, 0]] = 255;
        img[[2, 2, 3]] = 255;

        let result = gaussian_blur_u8(img.view(), 1.0);

        assert!(result[[2, 3, 3]] > 0);
        assert!(result[[2, 3, 0]] >= 250);
        assert_eq!(result[[2, 3, 1]], 0);
    }
}
