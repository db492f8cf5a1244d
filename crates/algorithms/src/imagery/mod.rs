//! Imagery analysis algorithms
//!
//! Vegetation labelling for RGB aerial imagery:
//! - Excess Green index (`ExG = 2G - R - B`) as a signed score map
//! - Strict-threshold binarization of the score map into a {0, 1} mask

mod threshold;
mod vegetation;

pub use threshold::{binarize, mask_coverage, vegetation_mask, BinarizeParams};
pub use vegetation::excess_green;
