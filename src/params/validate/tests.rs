//! Unit tests for record validation

use std::collections::BTreeSet;

use super::error::ValidationError;
use super::validator::validate_params;
use crate::params::schema::{Criterion, Dataset, ExperimentParams, ModelArch, Optimizer};

fn make_params() -> ExperimentParams {
    ExperimentParams {
        batch_size: 64,
        test_batch_size: 1024,
        num_microbatches: 64,
        lr: 0.01,
        momentum: 0.9,
        decay: 0.0,
        clip_norm: f64::INFINITY,
        sigma: 1.5,
        noise_multiplier: 0.0,
        dp: true,
        epochs: 200,
        save_on_epochs: vec![10, 50, 100, 200],
        mu: 0.0,
        ds_size: 60_000,
        resumed_model: None,
        binary_mnist_task: true,
        key_to_drop: BTreeSet::from([8]),
        number_of_entries: Some(1000),
        number_of_entries_test: Some(100),
        optimizer: Optimizer::Sgd,
        criterion: Criterion::Mse,
        save_model: true,
        dataset: Dataset::Mnist,
        model: ModelArch::RegressionNet,
        densenet_depth: None,
        scheduler: false,
        multi_gpu: false,
        count_norm_cosine_per_batch: false,
        csigma: 0.0,
    }
}

#[test]
fn test_valid_record_passes() {
    assert!(validate_params(&make_params()).is_ok());
}

#[test]
fn test_zero_batch_size() {
    let mut params = make_params();
    params.batch_size = 0;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::InvalidBatchSize(0))
    ));
}

#[test]
fn test_microbatches_must_tile_batch() {
    let mut params = make_params();
    params.num_microbatches = 48;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::MicrobatchMismatch {
            batch_size: 64,
            num_microbatches: 48
        })
    ));
}

#[test]
fn test_momentum_out_of_range() {
    let mut params = make_params();
    params.momentum = 1.5;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::InvalidMomentum(_))
    ));

    params.momentum = 1.0; // boundary: [0, 1) excludes 1
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::InvalidMomentum(_))
    ));

    params.momentum = 0.0;
    assert!(validate_params(&params).is_ok());
}

#[test]
fn test_negative_lr() {
    let mut params = make_params();
    params.lr = -0.01;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::InvalidLearningRate(_))
    ));
}

#[test]
fn test_dp_with_unbounded_clip_requires_sigma() {
    let mut params = make_params();
    params.sigma = 0.0;
    params.noise_multiplier = 1.1; // multiplier alone cannot work with S = inf
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::SigmaRequiredWithoutClipping)
    ));
}

#[test]
fn test_dp_with_finite_clip_accepts_multiplier() {
    let mut params = make_params();
    params.clip_norm = 1.0;
    params.sigma = 0.0;
    params.noise_multiplier = 1.1;
    assert!(validate_params(&params).is_ok());
}

#[test]
fn test_dp_without_any_noise_source() {
    let mut params = make_params();
    params.clip_norm = 1.0;
    params.sigma = 0.0;
    params.noise_multiplier = 0.0;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::NoNoiseSource)
    ));
}

#[test]
fn test_dp_off_needs_no_noise() {
    let mut params = make_params();
    params.dp = false;
    params.sigma = 0.0;
    params.noise_multiplier = 0.0;
    assert!(validate_params(&params).is_ok());
}

#[test]
fn test_zero_clip_norm() {
    let mut params = make_params();
    params.clip_norm = 0.0;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::InvalidClipNorm(_))
    ));
}

#[test]
fn test_save_epochs_must_increase() {
    let mut params = make_params();
    params.save_on_epochs = vec![10, 50, 50, 200];
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::UnorderedSaveEpochs {
            previous: 50,
            current: 50
        })
    ));
}

#[test]
fn test_save_epoch_beyond_training() {
    let mut params = make_params();
    params.epochs = 100;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::SaveEpochOutOfRange {
            epoch: 200,
            epochs: 100
        })
    ));
}

#[test]
fn test_sample_count_exceeds_dataset() {
    let mut params = make_params();
    params.number_of_entries = Some(70_000);
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::SampleCountExceedsDataset { .. })
    ));
}

#[test]
fn test_densenet_requires_depth() {
    let mut params = make_params();
    params.model = ModelArch::DenseNet;
    params.densenet_depth = None;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::MissingDensenetDepth)
    ));

    params.densenet_depth = Some(100);
    assert!(validate_params(&params).is_ok());
}

#[test]
fn test_depth_rejected_for_regressionnet() {
    let mut params = make_params();
    params.densenet_depth = Some(100);
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::UnexpectedDensenetDepth(
            ModelArch::RegressionNet
        ))
    ));
}

#[test]
fn test_binary_task_needs_minority_group() {
    let mut params = make_params();
    params.key_to_drop.clear();
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::EmptyMinorityGroup)
    ));
}

#[test]
fn test_binary_task_needs_mnist() {
    let mut params = make_params();
    params.dataset = Dataset::Cifar10;
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::BinaryTaskDataset(Dataset::Cifar10))
    ));
}

#[test]
fn test_label_outside_dataset_range() {
    let mut params = make_params();
    params.key_to_drop = BTreeSet::from([12]);
    assert!(matches!(
        validate_params(&params),
        Err(ValidationError::LabelOutOfRange { label: 12, .. })
    ));
}
