//! Property-based tests for record validation

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::error::ValidationError;
use super::validator::validate_params;
use crate::params::schema::{Criterion, Dataset, ExperimentParams, ModelArch, Optimizer};

fn arb_valid_params() -> impl Strategy<Value = ExperimentParams> {
    (
        1usize..=32,  // num_microbatches
        1usize..=16,  // batch_size = num_microbatches * multiplier
        1e-6f64..1.0, // lr
        0.0f64..0.99, // momentum
        1usize..300,  // epochs
        prop::option::of(1usize..=60_000), // number_of_entries
    )
        .prop_map(
            |(num_microbatches, multiplier, lr, momentum, epochs, number_of_entries)| {
                ExperimentParams {
                    batch_size: num_microbatches * multiplier,
                    test_batch_size: 1024,
                    num_microbatches,
                    lr,
                    momentum,
                    decay: 0.0,
                    clip_norm: f64::INFINITY,
                    sigma: 1.5,
                    noise_multiplier: 0.0,
                    dp: true,
                    epochs,
                    save_on_epochs: Vec::new(),
                    mu: 0.0,
                    ds_size: 60_000,
                    resumed_model: None,
                    binary_mnist_task: false,
                    key_to_drop: BTreeSet::new(),
                    number_of_entries,
                    number_of_entries_test: None,
                    optimizer: Optimizer::Sgd,
                    criterion: Criterion::Mse,
                    save_model: false,
                    dataset: Dataset::Mnist,
                    model: ModelArch::RegressionNet,
                    densenet_depth: None,
                    scheduler: false,
                    multi_gpu: false,
                    count_norm_cosine_per_batch: false,
                    csigma: 0.0,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_record_passes(params in arb_valid_params()) {
        prop_assert!(validate_params(&params).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(params in arb_valid_params()) {
        let mut params = params;
        params.batch_size = 0;
        prop_assert!(matches!(
            validate_params(&params),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_momentum_at_or_above_one_fails(
        params in arb_valid_params(),
        momentum in 1.0f64..10.0
    ) {
        let mut params = params;
        params.momentum = momentum;
        prop_assert!(matches!(
            validate_params(&params),
            Err(ValidationError::InvalidMomentum(_))
        ));
    }

    #[test]
    fn prop_negative_decay_fails(
        params in arb_valid_params(),
        decay in -10.0f64..-1e-9
    ) {
        let mut params = params;
        params.decay = decay;
        prop_assert!(matches!(
            validate_params(&params),
            Err(ValidationError::InvalidDecay(_))
        ));
    }

    #[test]
    fn prop_zero_epochs_fails(params in arb_valid_params()) {
        let mut params = params;
        params.epochs = 0;
        prop_assert!(matches!(
            validate_params(&params),
            Err(ValidationError::InvalidEpochs(0))
        ));
    }

    #[test]
    fn prop_sorted_schedule_within_epochs_passes(
        params in arb_valid_params(),
        epochs in 4usize..300
    ) {
        let mut params = params;
        params.epochs = epochs;
        params.save_on_epochs = vec![epochs / 4 + 1, epochs / 2 + 1, epochs];
        params.save_on_epochs.dedup();
        // Strictly increasing by construction once deduplicated
        let schedule = params.save_on_epochs.clone();
        prop_assume!(schedule.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(validate_params(&params).is_ok());
    }
}
