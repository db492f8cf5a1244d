//! Raster data structures

mod element;
mod grid;
mod rgb;

pub use element::RasterElement;
pub use grid::{Raster, RasterStatistics};
pub use rgb::{RgbRaster, BLUE, GREEN, RED};
