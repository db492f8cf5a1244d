//! Tile grid geometry

use verdant_core::{Error, Result};

/// Parameters for tiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilerParams {
    /// Tile width in pixels. Default: 256
    pub tile_width: usize,
    /// Tile height in pixels. Default: 256
    pub tile_height: usize,
}

impl Default for TilerParams {
    fn default() -> Self {
        Self {
            tile_width: 256,
            tile_height: 256,
        }
    }
}

impl TilerParams {
    /// Square tiles of `size x size`
    pub fn square(size: usize) -> Self {
        Self {
            tile_width: size,
            tile_height: size,
        }
    }

    /// Reject zero-sized tiles
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("tile_width", self.tile_width), ("tile_height", self.tile_height)] {
            if value == 0 {
                return Err(Error::InvalidParameter {
                    name,
                    value: value.to_string(),
                    reason: "tile dimensions must be positive".into(),
                });
            }
        }
        Ok(())
    }
}

/// Output file name for the tile with sequence number `index`
pub fn tile_filename(index: usize) -> String {
    format!("frame_{index:04}.png")
}

/// Number of full tiles that fit in a `width x height` image.
///
/// Equals `floor(width / tile_width) * floor(height / tile_height)`.
pub fn tile_count(width: usize, height: usize, params: TilerParams) -> Result<usize> {
    params.validate()?;
    Ok((width / params.tile_width) * (height / params.tile_height))
}

/// One accepted tile position within the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
    /// Zero-based sequence number in walk order
    pub index: usize,
    /// Column of the top-left pixel in the source image
    pub x: usize,
    /// Row of the top-left pixel in the source image
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl TileWindow {
    /// Output file name for this tile
    pub fn filename(&self) -> String {
        tile_filename(self.index)
    }
}

/// Iterator over the full tiles of an image, in column-major order
#[derive(Debug, Clone)]
pub struct TileGrid {
    image_width: usize,
    image_height: usize,
    tile_width: usize,
    tile_height: usize,
    current_x: usize,
    current_y: usize,
    next_index: usize,
}

impl TileGrid {
    /// Create a grid over a `image_width x image_height` image
    pub fn new(image_width: usize, image_height: usize, params: TilerParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            image_width,
            image_height,
            tile_width: params.tile_width,
            tile_height: params.tile_height,
            current_x: 0,
            current_y: 0,
            next_index: 0,
        })
    }
}

impl Iterator for TileGrid {
    type Item = TileWindow;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_x < self.image_width {
            let x1 = self.current_x;
            let y1 = self.current_y;

            // Down the column first, then on to the next column
            self.current_y += self.tile_height;
            if self.current_y >= self.image_height {
                self.current_y = 0;
                self.current_x += self.tile_width;
            }

            let x2 = (x1 + self.tile_width).min(self.image_width);
            let y2 = (y1 + self.tile_height).min(self.image_height);

            if x2 - x1 == self.tile_width && y2 - y1 == self.tile_height {
                let window = TileWindow {
                    index: self.next_index,
                    x: x1,
                    y: y1,
                    width: self.tile_width,
                    height: self.tile_height,
                };
                self.next_index += 1;
                return Some(window);
            }
        }
        None
    }
}
