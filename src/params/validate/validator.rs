//! Experiment record validation logic
//!
//! Checks ranges, cross-field consistency, and dataset/model coupling
//! before the record reaches any consumer. Enum membership is already
//! settled during schema resolution.

use super::error::ValidationError;
use crate::params::schema::{Dataset, ExperimentParams, ModelArch};

/// Validate an experiment record.
///
/// Checks:
/// - counts and the microbatch split
/// - optimizer hyperparameter ranges
/// - privacy mechanism consistency (clip norm, sigma, noise multiplier)
/// - checkpoint schedule discipline
/// - data sizing and label ranges
/// - model/depth coupling and the binary-task contract
pub fn validate_params(params: &ExperimentParams) -> Result<(), ValidationError> {
    validate_batching(params)?;
    validate_optimizer_ranges(params)?;
    validate_privacy(params)?;
    validate_checkpoint_schedule(params)?;
    validate_data_sizes(params)?;
    validate_model(params)?;
    validate_binary_task(params)?;
    Ok(())
}

fn validate_batching(params: &ExperimentParams) -> Result<(), ValidationError> {
    if params.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(params.batch_size));
    }
    if params.test_batch_size == 0 {
        return Err(ValidationError::InvalidTestBatchSize(params.test_batch_size));
    }
    if params.num_microbatches == 0 {
        return Err(ValidationError::InvalidMicrobatches(params.num_microbatches));
    }
    // Per-example gradient accounting needs the split to tile the batch.
    if params.batch_size % params.num_microbatches != 0 {
        return Err(ValidationError::MicrobatchMismatch {
            batch_size: params.batch_size,
            num_microbatches: params.num_microbatches,
        });
    }
    Ok(())
}

fn validate_optimizer_ranges(params: &ExperimentParams) -> Result<(), ValidationError> {
    if params.lr <= 0.0 {
        return Err(ValidationError::InvalidLearningRate(params.lr));
    }
    if !(0.0..1.0).contains(&params.momentum) {
        return Err(ValidationError::InvalidMomentum(params.momentum));
    }
    if params.decay < 0.0 {
        return Err(ValidationError::InvalidDecay(params.decay));
    }
    Ok(())
}

fn validate_privacy(params: &ExperimentParams) -> Result<(), ValidationError> {
    if params.clip_norm <= 0.0 {
        return Err(ValidationError::InvalidClipNorm(params.clip_norm));
    }
    if params.sigma < 0.0 {
        return Err(ValidationError::InvalidSigma(params.sigma));
    }
    if params.noise_multiplier < 0.0 {
        return Err(ValidationError::InvalidNoiseMultiplier(
            params.noise_multiplier,
        ));
    }

    if !params.dp {
        return Ok(());
    }
    // With clipping disabled the noise std cannot be derived from the
    // multiplier; only an explicit sigma works.
    if !params.clipping_enabled() {
        if params.sigma <= 0.0 {
            return Err(ValidationError::SigmaRequiredWithoutClipping);
        }
        return Ok(());
    }
    if params.sigma <= 0.0 && params.noise_multiplier <= 0.0 {
        return Err(ValidationError::NoNoiseSource);
    }
    Ok(())
}

fn validate_checkpoint_schedule(params: &ExperimentParams) -> Result<(), ValidationError> {
    if params.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(params.epochs));
    }
    let mut previous: Option<usize> = None;
    for &epoch in &params.save_on_epochs {
        if epoch == 0 || epoch > params.epochs {
            return Err(ValidationError::SaveEpochOutOfRange {
                epoch,
                epochs: params.epochs,
            });
        }
        if let Some(prev) = previous {
            if epoch <= prev {
                return Err(ValidationError::UnorderedSaveEpochs {
                    previous: prev,
                    current: epoch,
                });
            }
        }
        previous = Some(epoch);
    }
    Ok(())
}

fn validate_data_sizes(params: &ExperimentParams) -> Result<(), ValidationError> {
    if params.ds_size == 0 {
        return Err(ValidationError::InvalidDatasetSize(params.ds_size));
    }
    if let Some(n) = params.number_of_entries {
        if n == 0 {
            return Err(ValidationError::InvalidSampleCount {
                field: "number_of_entries",
                value: n,
            });
        }
        if n > params.ds_size {
            return Err(ValidationError::SampleCountExceedsDataset {
                value: n,
                ds_size: params.ds_size,
            });
        }
    }
    if let Some(n) = params.number_of_entries_test {
        if n == 0 {
            return Err(ValidationError::InvalidSampleCount {
                field: "number_of_entries_test",
                value: n,
            });
        }
    }

    let (lo, hi) = params.dataset.label_range();
    for &label in &params.key_to_drop {
        if label < lo || label > hi {
            return Err(ValidationError::LabelOutOfRange {
                label,
                dataset: params.dataset,
                lo,
                hi,
            });
        }
    }
    Ok(())
}

fn validate_model(params: &ExperimentParams) -> Result<(), ValidationError> {
    match (params.model, params.densenet_depth) {
        (ModelArch::DenseNet, None) => Err(ValidationError::MissingDensenetDepth),
        (ModelArch::DenseNet, Some(0)) => Err(ValidationError::InvalidDensenetDepth(0)),
        (ModelArch::DenseNet, Some(_)) => Ok(()),
        (model, Some(_)) => Err(ValidationError::UnexpectedDensenetDepth(model)),
        (_, None) => Ok(()),
    }
}

fn validate_binary_task(params: &ExperimentParams) -> Result<(), ValidationError> {
    if !params.binary_mnist_task {
        return Ok(());
    }
    if params.dataset != Dataset::Mnist {
        return Err(ValidationError::BinaryTaskDataset(params.dataset));
    }
    if params.key_to_drop.is_empty() {
        return Err(ValidationError::EmptyMinorityGroup);
    }
    Ok(())
}
