//! Training capability
//!
//! Optimisation happens outside this workspace. A trainer receives the
//! prepared split and writes a model artifact that [`crate::load_model`]
//! can read back.

use crate::dataset::DatasetSplit;
use std::path::Path;
use tracing::info;
use verdant_core::{Error, Result};

/// Parameters handed to the trainer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingParams {
    /// Default: 30
    pub epochs: usize,
    /// Default: 8
    pub batch_size: usize,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 30,
            batch_size: 8,
        }
    }
}

/// Loss and pixel accuracy after one epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    pub loss: f64,
    pub accuracy: f64,
    pub val_loss: f64,
    pub val_accuracy: f64,
}

/// Per-epoch metrics reported by a trainer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    /// Metrics of the last completed epoch
    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }
}

/// Something that turns a dataset into a saved model
pub trait SegmentationTrainer {
    /// Train on `split.train`, validate on `split.validation`, save the
    /// model to `artifact`
    fn train(
        &mut self,
        split: &DatasetSplit,
        params: &TrainingParams,
        artifact: &Path,
    ) -> Result<TrainingHistory>;
}

/// Validate inputs, run `trainer` and log the outcome
pub fn fit<T>(
    trainer: &mut T,
    split: &DatasetSplit,
    params: &TrainingParams,
    artifact: &Path,
) -> Result<TrainingHistory>
where
    T: SegmentationTrainer + ?Sized,
{
    for (name, value) in [("epochs", params.epochs), ("batch_size", params.batch_size)] {
        if value == 0 {
            return Err(Error::InvalidParameter {
                name,
                value: value.to_string(),
                reason: "must be positive".into(),
            });
        }
    }
    if split.train.is_empty() {
        return Err(Error::Other("training set is empty".into()));
    }

    info!(
        "Starting training: {} train / {} validation samples, {} epochs, batch {}",
        split.train.len(),
        split.validation.len(),
        params.epochs,
        params.batch_size
    );

    let history = trainer.train(split, params, artifact)?;

    if let Some(last) = history.last() {
        info!(
            "Final epoch: loss {:.4}, accuracy {:.4}, val_loss {:.4}, val_accuracy {:.4}",
            last.loss, last.accuracy, last.val_loss, last.val_accuracy
        );
    }
    info!("Model saved to {}", artifact.display());
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use ndarray::Array4;

    fn dataset(n: usize) -> Dataset {
        Dataset {
            images: Array4::zeros((n, 2, 2, 3)),
            masks: Array4::zeros((n, 2, 2, 1)),
            names: (0..n).map(|i| i.to_string()).collect(),
        }
    }

    /// Records what it was asked to do and reports a flat history
    #[derive(Default)]
    struct RecordingTrainer {
        calls: Vec<(usize, usize, usize)>,
    }

    impl SegmentationTrainer for RecordingTrainer {
        fn train(
            &mut self,
            split: &DatasetSplit,
            params: &TrainingParams,
            _artifact: &Path,
        ) -> Result<TrainingHistory> {
            self.calls
                .push((split.train.len(), split.validation.len(), params.epochs));
            let epoch = EpochMetrics {
                loss: 0.5,
                accuracy: 0.8,
                val_loss: 0.6,
                val_accuracy: 0.75,
            };
            Ok(TrainingHistory {
                epochs: vec![epoch; params.epochs],
            })
        }
    }

    #[test]
    fn test_fit_delegates_to_trainer() {
        let split = DatasetSplit {
            train: dataset(8),
            validation: dataset(2),
        };
        let mut trainer = RecordingTrainer::default();
        let history = fit(&mut trainer, &split, &TrainingParams::default(), Path::new("m.onnx")).unwrap();

        assert_eq!(trainer.calls, vec![(8, 2, 30)]);
        assert_eq!(history.epochs.len(), 30);
        assert_eq!(history.last().unwrap().val_accuracy, 0.75);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let empty = DatasetSplit {
            train: dataset(0),
            validation: dataset(1),
        };
        let mut trainer = RecordingTrainer::default();
        assert!(fit(&mut trainer, &empty, &TrainingParams::default(), Path::new("m")).is_err());

        let split = DatasetSplit {
            train: dataset(4),
            validation: dataset(1),
        };
        let zero_epochs = TrainingParams { epochs: 0, batch_size: 8 };
        assert!(fit(&mut trainer, &split, &zero_epochs, Path::new("m")).is_err());
        assert!(trainer.calls.is_empty());
    }
}
