//! Error type for the playground.
//!
//! Export refusals by the image origin are modelled as
//! [`PlaygroundError::ExportBlocked`] so the composer can tell them apart from
//! encoder failures and report them with their own status message.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlaygroundError>;

#[derive(Error, Debug)]
pub enum PlaygroundError {
    #[error("Unknown interaction mode: {0}")]
    UnknownMode(String),

    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Could not encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Raster size mismatch: {width}x{height} needs {expected} bytes, got {actual}")]
    RasterSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Export blocked: the image source does not allow pixel access")]
    ExportBlocked,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}
