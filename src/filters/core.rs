//! Core utilities shared by the pixel filters.
//!
//! This module provides:
//! - Gaussian kernel generation
//! - 3x3 color matrices and the per-pixel drivers that apply them
//! - Row-parallel iteration over flat float buffers
//! - Porter-Duff "over" blending for rasterized overlays

use ndarray::{Array3, ArrayView3, ArrayViewMut1, Axis, Zip};

/// Row-major 3x3 matrix applied to linear RGB values in 0.0-1.0.
pub type ColorMatrix = [[f32; 3]; 3];

/// Convert a 0.0-1.0 float to a u8 channel value with rounding.
#[inline]
pub fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Number of color (non-alpha) channels for a given channel count.
#[inline]
pub fn color_channels(channels: usize) -> usize {
    if channels == 4 {
        3
    } else {
        channels
    }
}

/// Generate a 1D Gaussian kernel.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian
///
/// # Returns
/// Normalized 1D kernel as Vec<f32>
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    // Kernel size = 6 sigma (covers 99.7% of distribution), ensure odd
    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let half = kernel_size / 2;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    // Normalize
    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Apply `f` to every pixel lane (the channel vector of one pixel).
///
/// Runs on the rayon pool when the `parallel` feature is enabled.
fn for_each_pixel<F>(output: &mut Array3<u8>, f: F)
where
    F: Fn(ArrayViewMut1<u8>) + Sync + Send,
{
    let lanes = Zip::from(output.lanes_mut(Axis(2)));

    #[cfg(feature = "parallel")]
    lanes.par_for_each(f);

    #[cfg(not(feature = "parallel"))]
    lanes.for_each(f);
}

/// Map every color channel value independently, preserving alpha.
///
/// Works for 1, 3 and 4 channel images.
pub fn map_color_values<F>(input: ArrayView3<u8>, f: F) -> Array3<u8>
where
    F: Fn(f32) -> f32 + Sync + Send,
{
    let (_, _, channels) = input.dim();
    let color = color_channels(channels);
    let mut output = input.to_owned();

    for_each_pixel(&mut output, |mut px| {
        for c in 0..color {
            px[c] = to_u8(f(px[c] as f32 / 255.0));
        }
    });

    output
}

/// Apply a 3x3 color matrix to the RGB channels, preserving alpha.
///
/// Single-channel images are returned unchanged since the matrix mixes
/// color channels.
pub fn apply_color_matrix(input: ArrayView3<u8>, matrix: &ColorMatrix) -> Array3<u8> {
    let (_, _, channels) = input.dim();
    let mut output = input.to_owned();
    if channels < 3 {
        return output;
    }

    for_each_pixel(&mut output, |mut px| {
        let r = px[0] as f32 / 255.0;
        let g = px[1] as f32 / 255.0;
        let b = px[2] as f32 / 255.0;
        for (c, row) in matrix.iter().enumerate() {
            px[c] = to_u8(row[0] * r + row[1] * g + row[2] * b);
        }
    });

    output
}

/// Run `f(y, row)` over each `row_len`-sized row of a flat buffer.
pub(crate) fn for_each_row<F>(buffer: &mut [f32], row_len: usize, f: F)
where
    F: Fn(usize, &mut [f32]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        buffer
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }

    #[cfg(not(feature = "parallel"))]
    buffer
        .chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Blend a color onto an RGBA float pixel using alpha.
///
/// Uses Porter-Duff "over" compositing on straight (non-premultiplied)
/// values in 0.0-1.0.
#[inline]
pub fn blend_over_f32(dst: &mut [f32; 4], src_r: f32, src_g: f32, src_b: f32, src_a: f32) {
    if src_a <= 0.0 {
        return;
    }
    if src_a >= 1.0 {
        dst[0] = src_r;
        dst[1] = src_g;
        dst[2] = src_b;
        dst[3] = 1.0;
        return;
    }

    let out_a = src_a + dst[3] * (1.0 - src_a);

    if out_a > 0.0 {
        dst[0] = (src_r * src_a + dst[0] * dst[3] * (1.0 - src_a)) / out_a;
        dst[1] = (src_g * src_a + dst[1] * dst[3] * (1.0 - src_a)) / out_a;
        dst[2] = (src_b * src_a + dst[2] * dst[3] * (1.0 - src_a)) / out_a;
        dst[3] = out_a;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_kernel_normalized() {
        let kernel = gaussian_kernel_1d(2.0);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(kernel.len() % 2, 1);
    }

    #[test]
    fn test_gaussian_kernel_zero_sigma() {
        assert_eq!(gaussian_kernel_1d(0.0), vec![1.0]);
    }

    #[test]
    fn test_map_color_values_preserves_alpha() {
        let mut img = Array3::<u8>::zeros((1, 2, 4));
        img[[0, 0, 0]] = 100;
        img[[0, 0, 3]] = 42;
        img[[0, 1, 3]] = 200;

        let result = map_color_values(img.view(), |v| v * 2.0);

        assert_eq!(result[[0, 0, 0]], 200);
        assert_eq!(result[[0, 0, 3]], 42);
        assert_eq!(result[[0, 1, 3]], 200);
    }

    #[test]
    fn test_identity_matrix_is_noop() {
        let identity = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let mut img = Array3::<u8>::zeros((2, 2, 3));
        img[[1, 0, 1]] = 77;
        img[[0, 1, 2]] = 201;

        let result = apply_color_matrix(img.view(), &identity);
        assert_eq!(result, img);
    }

    #[test]
    fn test_for_each_row_visits_every_row() {
        let mut buffer = vec![0.0f32; 12];
        for_each_row(&mut buffer, 4, |y, row| {
            for v in row.iter_mut() {
                *v = y as f32;
            }
        });
        assert_eq!(&buffer[8..], &[2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_blend_over_half_alpha() {
        let mut dst = [0.0, 0.0, 0.0, 0.0];
        blend_over_f32(&mut dst, 1.0, 0.5, 0.25, 0.5);
        assert!((dst[3] - 0.5).abs() < 1e-6);
        assert!((dst[0] - 1.0).abs() < 1e-6);
        assert!((dst[1] - 0.5).abs() < 1e-6);
    }
}
