//! Conversion between rasters and model tensors
//!
//! Model inputs are `[1, size, size, 3]` NHWC `f32` tensors with values in
//! `[0, 1]`. Outputs are per-pixel probabilities which are scaled back to
//! `[0, 255]` for storage.

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use ndarray::{Array4, ArrayD};
use verdant_core::{Error, Raster, Result, RgbRaster};

/// Resize an RGB image to `size x size` with nearest-neighbour sampling
pub fn resize_rgb(image: &RgbRaster, size: u32) -> Result<RgbImage> {
    check_size(size)?;
    let invalid = || Error::InvalidDimensions {
        width: image.width(),
        height: image.height(),
    };
    if image.is_empty() {
        return Err(invalid());
    }
    let (width, height) = (image.width() as u32, image.height() as u32);
    let buffer = RgbImage::from_raw(width, height, image.to_raw()).ok_or_else(invalid)?;
    if (width, height) == (size, size) {
        return Ok(buffer);
    }
    Ok(imageops::resize(&buffer, size, size, FilterType::Nearest))
}

/// Resize a grayscale band to `size x size` with nearest-neighbour sampling
pub fn resize_gray(band: &Raster<u8>, size: u32) -> Result<GrayImage> {
    check_size(size)?;
    let (rows, cols) = band.shape();
    if band.is_empty() {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }
    let buffer = GrayImage::from_raw(cols as u32, rows as u32, band.data().iter().copied().collect())
        .ok_or(Error::InvalidDimensions {
            width: cols,
            height: rows,
        })?;
    if (cols as u32, rows as u32) == (size, size) {
        return Ok(buffer);
    }
    Ok(imageops::resize(&buffer, size, size, FilterType::Nearest))
}

/// Build a `[1, size, size, 3]` input tensor with values in `[0, 1]`
pub fn to_input_tensor(image: &RgbRaster, size: u32) -> Result<Array4<f32>> {
    let resized = resize_rgb(image, size)?;
    let side = size as usize;
    let values: Vec<f32> = resized.into_raw().into_iter().map(normalize).collect();
    Array4::from_shape_vec((1, side, side, 3), values).map_err(|e| Error::Other(e.to_string()))
}

/// Scale an 8-bit sample to `[0, 1]`
pub fn normalize(value: u8) -> f32 {
    f32::from(value) / 255.0
}

/// Convert a model prediction into an 8-bit grayscale raster.
///
/// A leading batch axis and a trailing or leading channel axis of length
/// 1 are squeezed away; what remains must be `[height, width]`. Values
/// are multiplied by 255 and clamped to `[0, 255]`.
pub fn prediction_to_raster(prediction: &ArrayD<f32>) -> Result<Raster<u8>> {
    let mut dims: Vec<usize> = prediction.shape().to_vec();
    while dims.len() > 2 && dims[0] == 1 {
        dims.remove(0);
    }
    while dims.len() > 2 && dims[dims.len() - 1] == 1 {
        dims.pop();
    }
    if dims.len() != 2 {
        return Err(Error::Model(format!(
            "expected a single-channel prediction, got shape {:?}",
            prediction.shape()
        )));
    }

    let values: Vec<u8> = prediction
        .iter()
        .map(|&p| (p * 255.0).clamp(0.0, 255.0) as u8)
        .collect();
    Raster::from_vec(values, dims[0], dims[1])
}

fn check_size(size: u32) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidParameter {
            name: "size",
            value: size.to_string(),
            reason: "model input size must be positive".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn test_input_tensor_shape_and_range() {
        let img = RgbRaster::filled(300, 200, [255, 51, 0]);
        let tensor = to_input_tensor(&img, 256).unwrap();

        assert_eq!(tensor.shape(), &[1, 256, 256, 3]);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!((tensor[[0, 10, 10, 0]] - 1.0).abs() < 1e-6);
        assert!((tensor[[0, 10, 10, 1]] - 0.2).abs() < 1e-6);
        assert_eq!(tensor[[0, 10, 10, 2]], 0.0);
    }

    #[test]
    fn test_same_size_input_is_not_resampled() {
        let mut img = RgbRaster::new(4, 4);
        img.set_pixel(3, 1, [10, 20, 30]).unwrap();
        let tensor = to_input_tensor(&img, 4).unwrap();
        assert!((tensor[[0, 3, 1, 2]] - 30.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(to_input_tensor(&RgbRaster::new(4, 4), 0).is_err());
        assert!(to_input_tensor(&RgbRaster::new(0, 4), 8).is_err());
    }

    #[test]
    fn test_prediction_shapes_are_squeezed() {
        for shape in [vec![1, 3, 2, 1], vec![1, 3, 2], vec![3, 2], vec![1, 1, 3, 2]] {
            let pred = ArrayD::from_elem(IxDyn(&shape), 0.5f32);
            let raster = prediction_to_raster(&pred).unwrap();
            assert_eq!(raster.shape(), (3, 2), "shape {:?}", shape);
            assert!(raster.data().iter().all(|&v| v == 127));
        }
    }

    #[test]
    fn test_prediction_values_are_clamped() {
        let pred = ArrayD::from_shape_vec(IxDyn(&[1, 1, 4, 1]), vec![-0.3f32, 0.0, 1.0, 2.5]).unwrap();
        let raster = prediction_to_raster(&pred).unwrap();
        let values: Vec<u8> = raster.data().iter().copied().collect();
        assert_eq!(values, vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_multichannel_prediction_rejected() {
        let pred = ArrayD::from_elem(IxDyn(&[1, 4, 4, 2]), 0.1f32);
        assert!(prediction_to_raster(&pred).is_err());
    }
}
