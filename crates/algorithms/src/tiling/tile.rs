//! Extraction of tile pixels from a source image

use super::grid::{TileGrid, TileWindow, TilerParams};
use verdant_core::{Result, RgbRaster};

/// A full-size block cut from a larger image
#[derive(Debug, Clone)]
pub struct Tile {
    /// Position and sequence number within the source image
    pub window: TileWindow,
    /// Pixels of the block
    pub image: RgbRaster,
}

impl Tile {
    /// Zero-based sequence number
    pub fn index(&self) -> usize {
        self.window.index
    }

    /// Output file name (`frame_NNNN.png`)
    pub fn filename(&self) -> String {
        self.window.filename()
    }
}

/// Lazily extracts tiles from an image in grid order
pub struct Tiles<'a> {
    source: &'a RgbRaster,
    grid: TileGrid,
}

impl Iterator for Tiles<'_> {
    type Item = Result<Tile>;

    fn next(&mut self) -> Option<Self::Item> {
        let window = self.grid.next()?;
        Some(
            self.source
                .window(window.x, window.y, window.width, window.height)
                .map(|image| Tile { window, image }),
        )
    }
}

/// Iterate over the full tiles of `image`.
///
/// Tiles are produced one at a time so a caller can write each one before
/// the next is extracted.
pub fn tiles(image: &RgbRaster, params: TilerParams) -> Result<Tiles<'_>> {
    let grid = TileGrid::new(image.width(), image.height(), params)?;
    Ok(Tiles {
        source: image,
        grid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Image whose pixel encodes its own coordinates
    fn coordinate_image(width: usize, height: usize) -> RgbRaster {
        let mut img = RgbRaster::new(width, height);
        for row in 0..height {
            for col in 0..width {
                img.set_pixel(row, col, [(col / 4) as u8, (row / 4) as u8, 7]).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_tile_pixels_come_from_window() {
        let img = coordinate_image(64, 32);
        let params = TilerParams::square(16);

        let all: Vec<Tile> = tiles(&img, params).unwrap().map(|t| t.unwrap()).collect();
        assert_eq!(all.len(), 8);

        for tile in &all {
            assert_eq!(tile.image.shape(), (16, 16));
            let [r, g, _] = tile.image.pixel(0, 0).unwrap();
            assert_eq!(r as usize, tile.window.x / 4);
            assert_eq!(g as usize, tile.window.y / 4);
        }
    }

    #[test]
    fn test_512_square_gives_four_named_tiles() {
        let img = RgbRaster::new(512, 512);
        let names: Vec<String> = tiles(&img, TilerParams::default())
            .unwrap()
            .map(|t| t.unwrap().filename())
            .collect();
        assert_eq!(
            names,
            vec!["frame_0000.png", "frame_0001.png", "frame_0002.png", "frame_0003.png"]
        );
    }
}
