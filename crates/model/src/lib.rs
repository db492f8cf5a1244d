//! # Verdant Model
//!
//! Boundary between the tiling/labelling pipeline and an externally trained
//! segmentation network.
//!
//! The network itself is opaque: this crate only defines what goes in and
//! what comes out.
//!
//! - [`SegmentationModel`]: `predict(tensor) -> tensor` capability, with an
//!   ONNX Runtime implementation behind the `onnx` feature
//! - [`tensor`]: image to normalised NHWC tensor, prediction to 8-bit mask
//! - [`dataset`]: pairing RGB tiles with ground-truth masks and a seeded
//!   train/validation split
//! - [`trainer`]: the `train(dataset) -> artifact` capability consumed by
//!   [`fit`]

pub mod dataset;
mod model;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod tensor;
pub mod trainer;

pub use dataset::{load_dataset, split_dataset, Dataset, DatasetParams, DatasetSplit, LoadedDataset};
pub use model::{load_model, segment, InferenceParams, SegmentationModel};
pub use trainer::{fit, EpochMetrics, SegmentationTrainer, TrainingHistory, TrainingParams};
