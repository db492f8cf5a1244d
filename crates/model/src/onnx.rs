//! ONNX Runtime backend for [`SegmentationModel`]
//!
//! Expects a graph with one NHWC `f32` image input and one probability
//! output, as produced by exporting a Keras/TensorFlow U-Net.

use crate::model::SegmentationModel;
use ndarray::{Array4, ArrayD, IxDyn};
use ort::logging::LogLevel;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use verdant_core::{Error, Result};

/// A segmentation network loaded into an ONNX Runtime session
pub struct OnnxSegmentationModel {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    model_name: String,
    model_path: PathBuf,
}

impl OnnxSegmentationModel {
    /// Load and initialise a session from an `.onnx` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let session = Session::builder()
            .and_then(|builder| builder.with_log_level(LogLevel::Error))
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| Error::Model(format!("failed to load {}: {}", path.display(), e)))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| Error::Model(format!("{} declares no inputs", path.display())))?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| Error::Model(format!("{} declares no outputs", path.display())))?;

        let model_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());

        info!(
            "Loaded model '{}' (input '{}', output '{}')",
            model_name, input_name, output_name
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            model_name,
            model_path: path.to_path_buf(),
        })
    }

    /// Path the model was loaded from
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl SegmentationModel for OnnxSegmentationModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn predict(&self, input: &Array4<f32>) -> Result<ArrayD<f32>> {
        let tensor = TensorRef::from_array_view(input.view())
            .map_err(|e| Error::Model(format!("failed to build input tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Model(format!("model '{}': session lock poisoned", self.model_name)))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| {
                Error::Model(format!(
                    "model '{}': forward pass failed for input {:?}: {}",
                    self.model_name,
                    input.shape(),
                    e
                ))
            })?;

        let (shape, values) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Model(format!("output '{}' is not f32: {}", self.output_name, e)))?;
        let shape: Vec<usize> = shape.iter().map(|&d| d as usize).collect();

        ArrayD::from_shape_vec(IxDyn(&shape), values.to_vec())
            .map_err(|e| Error::Model(e.to_string()))
    }
}
