//! Training dataset preparation
//!
//! Pairs every RGB tile with the ground-truth mask of the same file name,
//! resizes both to the model resolution, scales them to `[0, 1]` and splits
//! the result into training and validation sets.

use crate::tensor::{normalize, resize_gray, resize_rgb};
use ndarray::{Array4, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use verdant_core::io::{list_rasters, read_gray, read_rgb};
use verdant_core::{Error, Result};

/// File extensions accepted as dataset images
pub const DATASET_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Parameters for dataset preparation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetParams {
    /// Square resolution images and masks are resized to. Default: 256
    pub image_size: u32,
    /// Fraction of samples held out for validation. Default: 0.2
    pub validation_fraction: f64,
    /// Seed of the shuffle that assigns samples to splits. Default: 42
    pub seed: u64,
}

impl Default for DatasetParams {
    fn default() -> Self {
        Self {
            image_size: 256,
            validation_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Stacked image and mask tensors
#[derive(Debug, Clone)]
pub struct Dataset {
    /// `[n, size, size, 3]`, values in `[0, 1]`
    pub images: Array4<f32>,
    /// `[n, size, size, 1]`, values in `[0, 1]`
    pub masks: Array4<f32>,
    /// Source file name of each sample
    pub names: Vec<String>,
}

impl Dataset {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the dataset has no samples
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Copy out the samples at `indices`, in that order
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            images: self.images.select(Axis(0), indices),
            masks: self.masks.select(Axis(0), indices),
            names: indices.iter().map(|&i| self.names[i].clone()).collect(),
        }
    }
}

/// Result of [`load_dataset`]
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    /// RGB files with no same-named mask
    pub missing_masks: Vec<PathBuf>,
    /// Files that could not be decoded, with the reason
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Training and validation partitions
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub train: Dataset,
    pub validation: Dataset,
}

/// Load every (image, mask) pair from `rgb_dir` and `mask_dir`.
///
/// Images are matched to masks by file name. Images without a mask and
/// pairs that fail to decode are skipped and reported; they never abort
/// the load.
pub fn load_dataset<P, Q>(rgb_dir: P, mask_dir: Q, params: DatasetParams) -> Result<LoadedDataset>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mask_dir = mask_dir.as_ref();
    let size = params.image_size;
    let side = size as usize;

    let mut images: Vec<f32> = Vec::new();
    let mut masks: Vec<f32> = Vec::new();
    let mut names = Vec::new();
    let mut missing_masks = Vec::new();
    let mut unreadable = Vec::new();

    for rgb_path in list_rasters(rgb_dir, DATASET_EXTENSIONS)? {
        let Some(file_name) = rgb_path.file_name() else {
            continue;
        };
        let mask_path = mask_dir.join(file_name);
        if !mask_path.is_file() {
            warn!("No mask for {}", rgb_path.display());
            missing_masks.push(rgb_path);
            continue;
        }

        let pair = read_rgb(&rgb_path).and_then(|rgb| {
            let mask = read_gray(&mask_path)?;
            Ok((resize_rgb(&rgb, size)?, resize_gray(&mask, size)?))
        });

        match pair {
            Ok((rgb, mask)) => {
                images.extend(rgb.into_raw().into_iter().map(normalize));
                masks.extend(mask.into_raw().into_iter().map(normalize));
                names.push(file_name.to_string_lossy().into_owned());
                debug!("Loaded pair {}", rgb_path.display());
            }
            Err(e) => {
                warn!("Skipping {}: {}", rgb_path.display(), e);
                unreadable.push((rgb_path, e.to_string()));
            }
        }
    }

    let n = names.len();
    let images = Array4::from_shape_vec((n, side, side, 3), images)
        .map_err(|e| Error::Other(e.to_string()))?;
    let masks = Array4::from_shape_vec((n, side, side, 1), masks)
        .map_err(|e| Error::Other(e.to_string()))?;

    info!(
        "Loaded {} pairs ({} without mask, {} unreadable)",
        n,
        missing_masks.len(),
        unreadable.len()
    );

    Ok(LoadedDataset {
        dataset: Dataset {
            images,
            masks,
            names,
        },
        missing_masks,
        unreadable,
    })
}

/// Number of validation samples for `n` samples: `ceil(n * fraction)`
pub fn validation_count(n: usize, fraction: f64) -> usize {
    (n as f64 * fraction).ceil() as usize
}

/// Shuffle with `params.seed` and split off `ceil(n * validation_fraction)`
/// samples for validation.
///
/// The same seed always yields the same partition. Both partitions must
/// end up non-empty.
pub fn split_dataset(dataset: &Dataset, params: DatasetParams) -> Result<DatasetSplit> {
    let fraction = params.validation_fraction;
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(Error::InvalidParameter {
            name: "validation_fraction",
            value: fraction.to_string(),
            reason: "must be strictly between 0 and 1".into(),
        });
    }

    let n = dataset.len();
    let n_validation = validation_count(n, fraction);
    if n_validation == 0 || n_validation >= n {
        return Err(Error::InvalidParameter {
            name: "validation_fraction",
            value: fraction.to_string(),
            reason: format!("{} samples cannot be split into two non-empty sets", n),
        });
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut StdRng::seed_from_u64(params.seed));
    let (validation, train) = order.split_at(n_validation);

    Ok(DatasetSplit {
        train: dataset.select(train),
        validation: dataset.select(validation),
    })
}
