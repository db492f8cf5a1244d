//! # Verdant Pipeline
//!
//! File-level drivers for the Verdant algorithms.
//!
//! This crate provides:
//! - Tiling of one orthomosaic file into `frame_NNNN.png` tiles
//! - Directory batch processing with per-file failure isolation
//! - Processing modes: sequential by default, file-parallel with Rayon

pub mod batch;
pub mod strategy;
pub mod tiler;
pub mod transforms;

pub use batch::{
    BatchOptions, BatchProcessor, BatchReport, FileFailure, RasterTransform,
    BINARIZE_EXTENSIONS, INFERENCE_EXTENSIONS,
};
pub use strategy::ProcessingMode;
pub use tiler::{tile_image, tile_raster, TilingSummary};
pub use transforms::{BinarizeTransform, SegmentTransform};
