//! Validation error types
//!
//! One variant per rule; every message names the field, the offending
//! value, and the constraint.

use crate::params::schema::{Dataset, ModelArch};

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid batch_size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid test_batch_size: {0} (must be > 0)")]
    InvalidTestBatchSize(usize),

    #[error("Invalid num_microbatches: {0} (must be > 0)")]
    InvalidMicrobatches(usize),

    #[error("batch_size {batch_size} is not divisible by num_microbatches {num_microbatches}")]
    MicrobatchMismatch {
        batch_size: usize,
        num_microbatches: usize,
    },

    #[error("Invalid lr: {0} (must be > 0.0)")]
    InvalidLearningRate(f64),

    #[error("Invalid momentum: {0} (must be in [0.0, 1.0))")]
    InvalidMomentum(f64),

    #[error("Invalid decay: {0} (must be >= 0.0)")]
    InvalidDecay(f64),

    #[error("Invalid S: {0} (clipping norm must be > 0.0; inf disables clipping)")]
    InvalidClipNorm(f64),

    #[error("Invalid sigma: {0} (must be >= 0.0)")]
    InvalidSigma(f64),

    #[error("Invalid z: {0} (noise multiplier must be >= 0.0)")]
    InvalidNoiseMultiplier(f64),

    #[error("dp is enabled with unbounded S; an explicit sigma > 0.0 is required")]
    SigmaRequiredWithoutClipping,

    #[error("dp is enabled but neither sigma nor z provides noise")]
    NoNoiseSource,

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("save_on_epochs is not strictly increasing: {previous} then {current}")]
    UnorderedSaveEpochs { previous: usize, current: usize },

    #[error("save_on_epochs entry {epoch} is outside 1..={epochs}")]
    SaveEpochOutOfRange { epoch: usize, epochs: usize },

    #[error("Invalid ds_size: {0} (must be > 0)")]
    InvalidDatasetSize(usize),

    #[error("Invalid {field}: {value} (must be > 0)")]
    InvalidSampleCount { field: &'static str, value: usize },

    #[error("number_of_entries {value} exceeds ds_size {ds_size}")]
    SampleCountExceedsDataset { value: usize, ds_size: usize },

    #[error("model is densenet but densenet_depth is missing")]
    MissingDensenetDepth,

    #[error("densenet_depth given but model is {0}")]
    UnexpectedDensenetDepth(ModelArch),

    #[error("Invalid densenet_depth: {0} (must be > 0)")]
    InvalidDensenetDepth(usize),

    #[error("binary_mnist_task is enabled but key_to_drop is empty (no minority group named)")]
    EmptyMinorityGroup,

    #[error("binary_mnist_task requires dataset mnist, got {0}")]
    BinaryTaskDataset(Dataset),

    #[error("key_to_drop label {label} is outside {lo}..={hi} for dataset {dataset}")]
    LabelOutOfRange {
        label: i64,
        dataset: Dataset,
        lo: i64,
        hi: i64,
    },
}
