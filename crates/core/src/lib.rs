//! # Verdant Core
//!
//! Core types and I/O for the Verdant vegetation pipeline.
//!
//! This crate provides:
//! - `Raster<T>`: single-band grid used for index scores and masks
//! - `RgbRaster`: 8-bit three-channel image decoded from disk
//! - Image I/O for PNG, JPEG and TIFF, plus directory listing with
//!   extension allow-lists

pub mod error;
pub mod io;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{Raster, RasterElement, RgbRaster};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Raster, RasterElement, RgbRaster};
}
