//! Three-channel 8-bit images

use crate::error::{Error, Result};
use ndarray::{Array3, ArrayView2, Axis, s};

/// Channel index of red in an [`RgbRaster`]
pub const RED: usize = 0;
/// Channel index of green in an [`RgbRaster`]
pub const GREEN: usize = 1;
/// Channel index of blue in an [`RgbRaster`]
pub const BLUE: usize = 2;

/// An 8-bit RGB image stored as a `(rows, cols, 3)` array.
///
/// Channels are always in R, G, B order regardless of the on-disk
/// layout of the file the image was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbRaster {
    data: Array3<u8>,
}

impl RgbRaster {
    /// Create a black image of `width x height` pixels
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array3::zeros((height, width, 3)),
        }
    }

    /// Create an image where every pixel is `rgb`
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Array3::zeros((height, width, 3));
        for (channel, value) in rgb.into_iter().enumerate() {
            data.index_axis_mut(Axis(2), channel).fill(value);
        }
        Self { data }
    }

    /// Wrap an existing `(rows, cols, 3)` array
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (rows, cols, channels) = data.dim();
        if channels != 3 {
            return Err(Error::InvalidParameter {
                name: "channels",
                value: channels.to_string(),
                reason: format!("expected 3 channels for a {cols}x{rows} RGB image"),
            });
        }
        Ok(Self { data })
    }

    /// Build from interleaved RGB bytes in row-major order
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height * 3 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let data = Array3::from_shape_vec((height, width, 3), pixels)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self { data })
    }

    /// Interleaved RGB bytes in row-major order
    pub fn to_raw(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        let (rows, cols, _) = self.data.dim();
        (rows, cols)
    }

    /// Whether the image has no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the `[r, g, b]` triple at (row, col)
    pub fn pixel(&self, row: usize, col: usize) -> Result<[u8; 3]> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(Error::IndexOutOfBounds { row, col, rows, cols });
        }
        Ok([
            self.data[(row, col, RED)],
            self.data[(row, col, GREEN)],
            self.data[(row, col, BLUE)],
        ])
    }

    /// Set the `[r, g, b]` triple at (row, col)
    pub fn set_pixel(&mut self, row: usize, col: usize, rgb: [u8; 3]) -> Result<()> {
        let (rows, cols) = self.shape();
        if row >= rows || col >= cols {
            return Err(Error::IndexOutOfBounds { row, col, rows, cols });
        }
        for (channel, value) in rgb.into_iter().enumerate() {
            self.data[(row, col, channel)] = value;
        }
        Ok(())
    }

    /// View of a single channel ([`RED`], [`GREEN`] or [`BLUE`])
    pub fn channel(&self, channel: usize) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(2), channel)
    }

    /// Copy out the `width x height` block whose top-left corner is (x, y).
    ///
    /// The block must lie entirely inside the image.
    pub fn window(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        let (rows, cols) = self.shape();
        if x + width > cols || y + height > rows {
            return Err(Error::IndexOutOfBounds {
                row: y + height,
                col: x + width,
                rows,
                cols,
            });
        }
        Ok(Self {
            data: self.data.slice(s![y..y + height, x..x + width, ..]).to_owned(),
        })
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_channels() {
        let img = RgbRaster::filled(4, 3, [10, 20, 30]);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.pixel(2, 3).unwrap(), [10, 20, 30]);
        assert!(img.channel(GREEN).iter().all(|&v| v == 20));
    }

    #[test]
    fn test_raw_layout_is_interleaved() {
        let pixels = vec![1, 2, 3, 4, 5, 6];
        let img = RgbRaster::from_raw(2, 1, pixels.clone()).unwrap();
        assert_eq!(img.pixel(0, 1).unwrap(), [4, 5, 6]);
        assert_eq!(img.to_raw(), pixels);
        assert!(RgbRaster::from_raw(2, 2, pixels).is_err());
    }

    #[test]
    fn test_window_copies_block() {
        let mut img = RgbRaster::new(6, 4);
        img.set_pixel(2, 3, [255, 0, 0]).unwrap();

        let block = img.window(3, 2, 2, 2).unwrap();
        assert_eq!(block.shape(), (2, 2));
        assert_eq!(block.pixel(0, 0).unwrap(), [255, 0, 0]);
        assert_eq!(block.pixel(1, 1).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn test_window_out_of_bounds() {
        let img = RgbRaster::new(6, 4);
        assert!(img.window(5, 0, 2, 2).is_err());
        assert!(img.window(0, 3, 1, 2).is_err());
    }

    #[test]
    fn test_from_array_requires_three_channels() {
        assert!(RgbRaster::from_array(Array3::zeros((2, 2, 4))).is_err());
        assert!(RgbRaster::from_array(Array3::zeros((2, 2, 3))).is_ok());
    }
}
