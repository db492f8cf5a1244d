//! Excess Green vegetation index
//!
//! `ExG = 2*G - R - B`, computed on 8-bit channels widened to `i16`.
//! Scores range from -510 (pure magenta) to 510 (pure green) and are
//! never clamped.

use crate::maybe_rayon::*;
use verdant_core::raster::{BLUE, GREEN, RED};
use verdant_core::{Error, Raster, Result, RgbRaster};

/// Compute the Excess Green score for every pixel of `image`.
///
/// The output has the same `(rows, cols)` as the input. An image with no
/// pixels is rejected.
pub fn excess_green(image: &RgbRaster) -> Result<Raster<i16>> {
    if image.is_empty() {
        return Err(Error::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        });
    }

    let (rows, cols) = image.shape();
    let red = image.channel(RED);
    let green = image.channel(GREEN);
    let blue = image.channel(BLUE);

    let data: Vec<i16> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0i16; cols];
            for (col, score) in row_data.iter_mut().enumerate() {
                let r = i16::from(red[(row, col)]);
                let g = i16::from(green[(row, col)]);
                let b = i16::from(blue[(row, col)]);
                *score = 2 * g - r - b;
            }
            row_data
        })
        .collect();

    Raster::from_vec(data, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: usize, height: usize) -> RgbRaster {
        let mut img = RgbRaster::new(width, height);
        for row in 0..height {
            for col in 0..width {
                let rgb = [
                    ((row * 37 + col * 11) % 256) as u8,
                    ((row * 5 + col * 53) % 256) as u8,
                    ((row * 19 + col * 3) % 256) as u8,
                ];
                img.set_pixel(row, col, rgb).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_formula_per_pixel() {
        let img = gradient_image(13, 9);
        let score = excess_green(&img).unwrap();

        assert_eq!(score.shape(), img.shape());
        for row in 0..9 {
            for col in 0..13 {
                let [r, g, b] = img.pixel(row, col).unwrap();
                let expected = 2 * g as i16 - r as i16 - b as i16;
                assert_eq!(score.get(row, col).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_extremes_are_not_clamped() {
        let green = excess_green(&RgbRaster::filled(2, 2, [0, 255, 0])).unwrap();
        assert!(green.data().iter().all(|&v| v == 510));

        let magenta = excess_green(&RgbRaster::filled(2, 2, [255, 0, 255])).unwrap();
        assert!(magenta.data().iter().all(|&v| v == -510));
    }

    #[test]
    fn test_black_scores_zero() {
        let score = excess_green(&RgbRaster::new(4, 4)).unwrap();
        assert!(score.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let img = gradient_image(31, 17);
        let first = excess_green(&img).unwrap();
        let second = excess_green(&img).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(excess_green(&RgbRaster::new(0, 10)).is_err());
        assert!(excess_green(&RgbRaster::new(10, 0)).is_err());
    }
}
