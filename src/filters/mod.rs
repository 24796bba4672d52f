//! Filter modules for the playground's composed visual filter.
//!
//! ## Supported Formats
//!
//! All filters accept u8 images with 1, 3, or 4 channels:
//!
//! | Format | Shape | Description |
//! |--------|-------|-------------|
//! | Grayscale8 | (H, W, 1) | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | RGB + straight alpha, 0-255 |
//!
//! ## Architecture
//!
//! - **CSS parity** - every primitive implements the CSS filter function of
//!   the same name, so the exported raster matches the live preview
//! - **Alpha preservation** - color filters never touch alpha; blur blurs it
//! - **Grayscale handling** - matrix filters (saturate, hue-rotate,
//!   grayscale, sepia) are no-ops for single-channel input
//! - **Parallel** - per-pixel and per-row work uses rayon when the
//!   `parallel` feature is enabled (off for wasm builds)

pub mod core;
pub mod color_adjust;
pub mod color_science;
pub mod blur;
pub mod composed;

pub use composed::{ComposedFilter, FilterPrimitive};
