//! # Verdant Algorithms
//!
//! Pixel and tiling algorithms for the Verdant vegetation pipeline.
//!
//! ## Available Algorithm Categories
//!
//! - **imagery**: Excess Green vegetation index, thresholding into binary masks
//! - **tiling**: fixed-size, column-major tile grids over large orthomosaics

pub mod imagery;
pub mod tiling;
mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::imagery::{
        binarize, excess_green, mask_coverage, vegetation_mask, BinarizeParams,
    };
    pub use crate::tiling::{
        tile_count, tile_filename, tiles, Tile, TileGrid, TileWindow, TilerParams,
    };
    pub use verdant_core::prelude::*;
}
