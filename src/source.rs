//! The image shown in the playground preview.
//!
//! A source (file or URL) is selected first; decoded pixels arrive later via
//! [`PreviewImage::complete_load`]. Loads cannot be cancelled: whichever
//! completion arrives last wins.

use image::GenericImageView;
use ndarray::{Array3, ArrayView3};

use crate::error::{PlaygroundError, Result};

/// Where the current preview image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file picked through the file input.
    File { name: String },
    /// A URL typed into the URL input.
    Url(String),
}

/// Decoded RGBA pixels plus whether their origin allows reading them back.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pixels: Array3<u8>,
    origin_clean: bool,
}

impl DecodedImage {
    /// Wrap an RGBA raster of shape (height, width, 4).
    pub fn from_rgba_array(pixels: Array3<u8>, origin_clean: bool) -> Result<Self> {
        let (height, width, channels) = pixels.dim();
        if channels != 4 {
            return Err(PlaygroundError::RasterSize {
                width: width as u32,
                height: height as u32,
                expected: width * height * 4,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            origin_clean,
        })
    }

    /// Wrap a flat RGBA byte buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>, origin_clean: bool) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PlaygroundError::RasterSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let actual = data.len();
        let pixels = Array3::from_shape_vec((height as usize, width as usize, 4), data).map_err(
            |_| PlaygroundError::RasterSize {
                width,
                height,
                expected,
                actual,
            },
        )?;
        Ok(Self {
            pixels,
            origin_clean,
        })
    }

    /// Decode PNG/JPEG/GIF/WebP bytes.
    pub fn decode(bytes: &[u8], origin_clean: bool) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(PlaygroundError::Decode)?;
        let (width, height) = decoded.dimensions();
        Self::from_rgba(width, height, decoded.into_rgba8().into_raw(), origin_clean)
    }

    pub fn natural_width(&self) -> u32 {
        self.pixels.dim().1 as u32
    }

    pub fn natural_height(&self) -> u32 {
        self.pixels.dim().0 as u32
    }

    pub fn has_pixels(&self) -> bool {
        self.natural_width() > 0 && self.natural_height() > 0
    }

    /// False for cross-origin images whose server did not allow pixel reads.
    pub fn origin_clean(&self) -> bool {
        self.origin_clean
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }
}

/// Selected source and its (possibly pending) pixels.
#[derive(Debug, Clone, Default)]
pub struct PreviewImage {
    source: Option<ImageSource>,
    decoded: Option<DecodedImage>,
}

impl PreviewImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a file; its pixels are pending until the read completes.
    pub fn select_file(&mut self, name: impl Into<String>) {
        self.source = Some(ImageSource::File { name: name.into() });
        self.decoded = None;
    }

    /// Point the preview at a URL. Blank input is ignored; returns whether the
    /// source changed.
    pub fn set_url(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.source = Some(ImageSource::Url(url.to_string()));
        self.decoded = None;
        true
    }

    /// Deliver decoded pixels for the current source.
    pub fn complete_load(&mut self, image: DecodedImage) {
        self.decoded = Some(image);
    }

    pub fn source(&self) -> Option<&ImageSource> {
        self.source.as_ref()
    }

    /// Decoded pixels, if loading finished.
    pub fn loaded(&self) -> Option<&DecodedImage> {
        self.decoded.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.source.is_some() && self.decoded.as_ref().is_some_and(DecodedImage::has_pixels)
    }
}
