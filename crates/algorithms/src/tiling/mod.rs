//! Tiling of large rasters into fixed-size blocks
//!
//! Tiles are laid on a regular grid starting at (0, 0). The grid is walked
//! column by column: every tile with `x = 0` (top to bottom), then every
//! tile with `x = tile_width`, and so on. Blocks that would run past the
//! right or bottom edge are dropped rather than padded, so every emitted
//! tile has exactly the configured size.
//!
//! Tile indices follow the walk order and are used in output file names
//! (`frame_0000.png`, `frame_0001.png`, ...). Anything that pairs tiles by
//! index relies on this order.

mod grid;
mod tile;

pub use grid::{tile_count, tile_filename, TileGrid, TileWindow, TilerParams};
pub use tile::{tiles, Tile, Tiles};
