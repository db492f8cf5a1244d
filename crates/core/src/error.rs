//! Error types for Verdant

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Verdant operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot decode raster {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Cannot encode raster {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Model error: {0}")]
    Model(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error means the input could not be read as a raster.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }
}

/// Result type alias for Verdant operations
pub type Result<T> = std::result::Result<T, Error>;
