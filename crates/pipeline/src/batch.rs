//! Directory batch processing
//!
//! Applies a [`RasterTransform`] to every eligible image in a directory and
//! writes one grayscale output per input, named after the input. Files are
//! independent: a file that cannot be decoded, transformed or written is
//! logged and recorded in the report, and the batch moves on.

use crate::strategy::ProcessingMode;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use verdant_core::io::{list_rasters, read_rgb, write_gray};
use verdant_core::{Error, Raster, Result, RgbRaster};

/// Extensions processed by vegetation-index binarization
pub const BINARIZE_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Extensions processed by model inference
pub const INFERENCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff"];

/// Per-image operation applied by a [`BatchProcessor`]
pub trait RasterTransform: Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Produce the 8-bit grayscale image to store for `image`
    fn apply(&self, image: &RgbRaster) -> Result<Raster<u8>>;

    /// File name of the output written for an input named `input_name`
    fn output_name(&self, input_name: &OsStr) -> OsString {
        input_name.to_os_string()
    }
}

/// Options for a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Eligible extensions, without the dot, matched case-insensitively
    pub extensions: Vec<String>,
    pub mode: ProcessingMode,
}

impl BatchOptions {
    /// Options accepting `extensions`, processed sequentially
    pub fn with_extensions(extensions: &[&str]) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            mode: ProcessingMode::Sequential,
        }
    }

    /// Same options with a different processing mode
    pub fn mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self::with_extensions(BINARIZE_EXTENSIONS)
    }
}

/// An input that produced no output
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: String,
}

/// Outcome of a batch run, ordered by input file name
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Output files written
    pub written: Vec<PathBuf>,
    /// Inputs that failed
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    /// Number of eligible inputs seen
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Drives a [`RasterTransform`] over a directory
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    options: BatchOptions,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    /// Process every eligible file in `input_dir` into `output_dir`.
    ///
    /// `output_dir` is created if needed. Only a missing input directory or
    /// an uncreatable output directory fails the whole call.
    pub fn run<T>(&self, input_dir: &Path, output_dir: &Path, transform: &T) -> Result<BatchReport>
    where
        T: RasterTransform + ?Sized,
    {
        if !input_dir.is_dir() {
            return Err(Error::InvalidParameter {
                name: "input",
                value: input_dir.display().to_string(),
                reason: "not a directory".into(),
            });
        }
        std::fs::create_dir_all(output_dir)?;

        let extensions: Vec<&str> = self.options.extensions.iter().map(String::as_str).collect();
        let inputs = list_rasters(input_dir, &extensions)?;
        info!(
            "{}: {} eligible file(s) in {}",
            transform.name(),
            inputs.len(),
            input_dir.display()
        );

        let outcomes = self.options.mode.map_ordered(&inputs, |input| {
            let outcome = process_file(input, output_dir, transform);
            match &outcome {
                Ok(output) => info!("{} saved as {}", transform.name(), output.display()),
                Err(e) => warn!("Could not process {}: {}", input.display(), e),
            }
            outcome
        });

        let mut report = BatchReport::default();
        for (input, outcome) in inputs.into_iter().zip(outcomes) {
            match outcome {
                Ok(output) => report.written.push(output),
                Err(e) => report.failed.push(FileFailure {
                    input,
                    error: e.to_string(),
                }),
            }
        }

        info!(
            "Processing complete: {} written, {} failed",
            report.written.len(),
            report.failed.len()
        );
        Ok(report)
    }
}

fn process_file<T>(input: &Path, output_dir: &Path, transform: &T) -> Result<PathBuf>
where
    T: RasterTransform + ?Sized,
{
    let file_name = input
        .file_name()
        .ok_or_else(|| Error::Other(format!("{} has no file name", input.display())))?;
    let image = read_rgb(input)?;
    let product = transform.apply(&image)?;
    let output = output_dir.join(transform.output_name(file_name));
    write_gray(&product, &output)?;
    Ok(output)
}
