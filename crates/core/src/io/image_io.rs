//! Image file reading/writing through the `image` crate
//!
//! Any format the crate decodes (PNG, JPEG, TIFF) is accepted on input and
//! normalised to 8-bit RGB. The output format follows the file extension.

use crate::error::{Error, Result};
use crate::raster::{Raster, RgbRaster};
use image::{GrayImage, RgbImage};
use std::path::Path;

/// Read an image file into an [`RgbRaster`].
///
/// Alpha is dropped, grayscale is expanded and 16-bit channels are
/// reduced to 8 bits. Any failure to open or decode the file is reported
/// as [`Error::Decode`].
pub fn read_rgb<P: AsRef<Path>>(path: P) -> Result<RgbRaster> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    RgbRaster::from_raw(width as usize, height as usize, rgb.into_raw())
}

/// Read an image file as a single 8-bit grayscale band.
///
/// Color inputs are converted to luma; used for ground-truth masks.
pub fn read_gray<P: AsRef<Path>>(path: P) -> Result<Raster<u8>> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| Error::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let gray = decoded.to_luma8();
    let (width, height) = gray.dimensions();
    Raster::from_vec(gray.into_raw(), height as usize, width as usize)
}

/// Write an [`RgbRaster`] to `path`
pub fn write_rgb<P: AsRef<Path>>(raster: &RgbRaster, path: P) -> Result<()> {
    let path = path.as_ref();
    let buffer = RgbImage::from_raw(
        raster.width() as u32,
        raster.height() as u32,
        raster.to_raw(),
    )
    .ok_or(Error::InvalidDimensions {
        width: raster.width(),
        height: raster.height(),
    })?;

    buffer.save(path).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a single-band 8-bit raster as a grayscale image, values unchanged
pub fn write_gray<P: AsRef<Path>>(raster: &Raster<u8>, path: P) -> Result<()> {
    let path = path.as_ref();
    let (rows, cols) = raster.shape();
    let pixels: Vec<u8> = raster.data().iter().copied().collect();
    let buffer = GrayImage::from_raw(cols as u32, rows as u32, pixels).ok_or(
        Error::InvalidDimensions {
            width: cols,
            height: rows,
        },
    )?;

    buffer.save(path).map_err(|e| Error::Encode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a {0, 1} mask as a black/white grayscale image (1 becomes 255)
pub fn write_mask<P: AsRef<Path>>(mask: &Raster<u8>, path: P) -> Result<()> {
    write_gray(&mask.map(|v| v.saturating_mul(255)), path)
}
