//! Vegetation mask thresholding

use super::vegetation::excess_green;
use verdant_core::{Raster, Result, RgbRaster};

/// Parameters for binarization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinarizeParams {
    /// Scores strictly greater than this become 1. Default: 30
    pub threshold: i16,
}

impl Default for BinarizeParams {
    fn default() -> Self {
        Self { threshold: 30 }
    }
}

/// Threshold a score map into a {0, 1} mask.
///
/// A cell is 1 when `score > threshold`; a score equal to the threshold
/// maps to 0.
pub fn binarize(score: &Raster<i16>, params: BinarizeParams) -> Raster<u8> {
    let threshold = params.threshold;
    score.map(|v| u8::from(v > threshold))
}

/// Excess Green followed by [`binarize`]
pub fn vegetation_mask(image: &RgbRaster, params: BinarizeParams) -> Result<Raster<u8>> {
    let score = excess_green(image)?;
    Ok(binarize(&score, params))
}

/// Fraction of mask cells equal to 1, or 0.0 for an empty mask
pub fn mask_coverage(mask: &Raster<u8>) -> f64 {
    if mask.is_empty() {
        return 0.0;
    }
    mask.count_where(|v| v > 0) as f64 / mask.len() as f64
}
