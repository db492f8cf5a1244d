//! Batch transforms: vegetation-index labelling and model inference

use crate::batch::RasterTransform;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use tracing::debug;
use verdant_algorithms::imagery::{mask_coverage, vegetation_mask, BinarizeParams};
use verdant_core::{Raster, Result, RgbRaster};
use verdant_model::{segment, InferenceParams, SegmentationModel};

/// Excess Green thresholded into a black/white mask
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarizeTransform {
    pub params: BinarizeParams,
}

impl BinarizeTransform {
    pub fn new(params: BinarizeParams) -> Self {
        Self { params }
    }
}

impl RasterTransform for BinarizeTransform {
    fn name(&self) -> &str {
        "Binarized image"
    }

    fn apply(&self, image: &RgbRaster) -> Result<Raster<u8>> {
        let mask = vegetation_mask(image, self.params)?;
        debug!("vegetation coverage {:.1}%", mask_coverage(&mask) * 100.0);
        Ok(mask.map(|v| v.saturating_mul(255)))
    }
}

/// Probability mask predicted by a segmentation model
pub struct SegmentTransform<M> {
    model: M,
    params: InferenceParams,
}

impl<M: SegmentationModel> SegmentTransform<M> {
    pub fn new(model: M, params: InferenceParams) -> Self {
        Self { model, params }
    }
}

impl<M: SegmentationModel> RasterTransform for SegmentTransform<M> {
    fn name(&self) -> &str {
        "Segmented image"
    }

    fn apply(&self, image: &RgbRaster) -> Result<Raster<u8>> {
        segment(&self.model, image, self.params)
    }

    /// Input name, with `.png` appended when it has no extension
    fn output_name(&self, input_name: &OsStr) -> OsString {
        let mut name = input_name.to_os_string();
        if Path::new(input_name).extension().is_none() {
            name.push(".png");
        }
        name
    }
}
