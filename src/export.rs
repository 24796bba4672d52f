//! PNG snapshot export.
//!
//! The snapshot is drawn at the image's natural size with exactly the filter
//! the preview shows, then encoded with the `image` crate's PNG encoder.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use ndarray::ArrayView3;

use crate::error::{PlaygroundError, Result};
use crate::filters::ComposedFilter;
use crate::source::{DecodedImage, PreviewImage};

/// An encoded snapshot ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Why an export request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSource,
    NotLoaded,
    ZeroDimensions,
}

/// Result of a user-triggered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Preconditions not met; nothing was produced.
    Skipped(SkipReason),
    Saved(PngExport),
    /// The image origin does not allow its pixels to be read.
    Blocked,
    Failed(String),
}

impl ExportOutcome {
    pub fn png(&self) -> Option<&PngExport> {
        match self {
            ExportOutcome::Saved(export) => Some(export),
            _ => None,
        }
    }
}

/// Check export preconditions and return the loaded image.
pub fn exportable(preview: &PreviewImage) -> std::result::Result<&DecodedImage, SkipReason> {
    if preview.source().is_none() {
        return Err(SkipReason::NoSource);
    }
    let image = preview.loaded().ok_or(SkipReason::NotLoaded)?;
    if !image.has_pixels() {
        return Err(SkipReason::ZeroDimensions);
    }
    Ok(image)
}

/// Filter `image` at its natural size and encode it as PNG.
///
/// Fails with [`PlaygroundError::ExportBlocked`] when the image's origin
/// forbids reading its pixels.
pub fn render_snapshot(
    image: &DecodedImage,
    filter: &ComposedFilter,
    file_name: &str,
) -> Result<PngExport> {
    if !image.origin_clean() {
        return Err(PlaygroundError::ExportBlocked);
    }

    let filtered = filter.apply(image.view());
    let bytes = encode_png(filtered.view())?;

    Ok(PngExport {
        file_name: file_name.to_string(),
        width: image.natural_width(),
        height: image.natural_height(),
        bytes,
    })
}

/// Encode an RGBA raster of shape (height, width, 4) as PNG.
pub fn encode_png(pixels: ArrayView3<u8>) -> Result<Vec<u8>> {
    let (height, width, channels) = pixels.dim();
    if channels != 4 {
        return Err(PlaygroundError::RasterSize {
            width: width as u32,
            height: height as u32,
            expected: width * height * 4,
            actual: pixels.len(),
        });
    }

    // Logical-order copy so non-standard layouts encode correctly.
    let data: Vec<u8> = pixels.iter().copied().collect();
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&data, width as u32, height as u32, ExtendedColorType::Rgba8)
        .map_err(PlaygroundError::Encode)?;
    Ok(out)
}
