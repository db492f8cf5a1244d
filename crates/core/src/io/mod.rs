//! I/O operations for reading and writing raster images

mod image_io;
mod listing;

pub use image_io::{read_gray, read_rgb, write_gray, write_mask, write_rgb};
pub use listing::{has_extension, list_rasters};
