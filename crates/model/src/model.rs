//! Segmentation model capability

use crate::tensor::{prediction_to_raster, to_input_tensor};
use ndarray::{Array4, ArrayD};
use std::path::Path;
use tracing::debug;
use verdant_core::{Error, Raster, Result, RgbRaster};

/// A trained network that maps an image tensor to a probability tensor.
///
/// Inputs are `[batch, height, width, 3]` with values in `[0, 1]`.
/// Outputs are single-channel per-pixel probabilities, with whatever
/// batch/channel axes the network produces.
pub trait SegmentationModel: Send + Sync {
    /// Human-readable model name for logs
    fn name(&self) -> &str;

    /// Run a forward pass
    fn predict(&self, input: &Array4<f32>) -> Result<ArrayD<f32>>;
}

impl<M: SegmentationModel + ?Sized> SegmentationModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn predict(&self, input: &Array4<f32>) -> Result<ArrayD<f32>> {
        (**self).predict(input)
    }
}

/// Parameters for inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceParams {
    /// Square input resolution expected by the model. Default: 256
    pub input_size: u32,
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self { input_size: 256 }
    }
}

/// Segment one image: resize and normalise, predict, scale to 8 bits.
///
/// The returned raster has the model's output resolution, not the
/// resolution of `image`.
pub fn segment<M>(model: &M, image: &RgbRaster, params: InferenceParams) -> Result<Raster<u8>>
where
    M: SegmentationModel + ?Sized,
{
    let input = to_input_tensor(image, params.input_size)?;
    let prediction = model.predict(&input)?;
    debug!(
        "{}: input {:?} -> output {:?}",
        model.name(),
        input.shape(),
        prediction.shape()
    );
    prediction_to_raster(&prediction)
}

/// Load a trained model artifact from `path`.
///
/// ONNX graphs are supported when the crate is built with the `onnx`
/// feature; otherwise every load fails.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<Box<dyn SegmentationModel>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::Model(format!(
            "model file not found: {}",
            path.display()
        )));
    }

    #[cfg(feature = "onnx")]
    {
        Ok(Box::new(crate::onnx::OnnxSegmentationModel::load(path)?))
    }

    #[cfg(not(feature = "onnx"))]
    {
        Err(Error::Model(format!(
            "cannot load {}: built without the `onnx` feature",
            path.display()
        )))
    }
}
