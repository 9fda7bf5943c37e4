//! Typed experiment record.
//!
//! [`ExperimentParams`] is the flat, immutable record the training
//! harness reads once at startup. Resolution from a raw document assigns
//! every wire key its target type, fills defaults for optional keys, and
//! reports unknown keys to the caller.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::parser::ParamDocument;
use super::value::{format_float, ParamValue};

/// Errors raised while resolving a raw document into a typed record.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required key: {0}")]
    MissingKey(&'static str),

    #[error("invalid value for {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("unknown enum value for {key}: {reason}")]
    InvalidEnum { key: &'static str, reason: String },

    #[error("unknown key: {0}")]
    UnknownKey(String),
}

/// Optimizer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Optimizer {
    Sgd,
    Adam,
    AdamW,
}

/// Valid optimizer names on the wire.
pub const VALID_OPTIMIZERS: &[&str] = &["sgd", "adam", "adamw"];

impl FromStr for Optimizer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sgd" => Ok(Optimizer::Sgd),
            "adam" => Ok(Optimizer::Adam),
            "adamw" => Ok(Optimizer::AdamW),
            other => Err(format!(
                "unknown optimizer '{other}'. Valid options: {VALID_OPTIMIZERS:?}"
            )),
        }
    }
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Optimizer::Sgd => "sgd",
            Optimizer::Adam => "adam",
            Optimizer::AdamW => "adamw",
        };
        write!(f, "{name}")
    }
}

/// Loss function selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Mean squared error (the regression task)
    Mse,
    /// Cross-entropy
    CrossEntropy,
}

/// Valid criterion names on the wire.
pub const VALID_CRITERIA: &[&str] = &["mse", "cross_entropy"];

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mse" => Ok(Criterion::Mse),
            "cross_entropy" | "ce" => Ok(Criterion::CrossEntropy),
            other => Err(format!(
                "unknown criterion '{other}'. Valid options: {VALID_CRITERIA:?}"
            )),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Criterion::Mse => "mse",
            Criterion::CrossEntropy => "cross_entropy",
        };
        write!(f, "{name}")
    }
}

/// Dataset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Mnist,
    Cifar10,
    /// Labeled Faces in the Wild, binary attribute labels
    Lfw,
    /// IMDB-WIKI faces, binary gender labels
    ImdbWiki,
}

/// Valid dataset names on the wire.
pub const VALID_DATASETS: &[&str] = &["mnist", "cifar10", "lfw", "imdb_wiki"];

impl Dataset {
    /// Inclusive class-label range for the dataset.
    pub fn label_range(&self) -> (i64, i64) {
        match self {
            Dataset::Mnist | Dataset::Cifar10 => (0, 9),
            Dataset::Lfw | Dataset::ImdbWiki => (0, 1),
        }
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mnist" => Ok(Dataset::Mnist),
            "cifar10" => Ok(Dataset::Cifar10),
            "lfw" => Ok(Dataset::Lfw),
            "imdb_wiki" | "imdb-wiki" => Ok(Dataset::ImdbWiki),
            other => Err(format!(
                "unknown dataset '{other}'. Valid options: {VALID_DATASETS:?}"
            )),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dataset::Mnist => "mnist",
            Dataset::Cifar10 => "cifar10",
            Dataset::Lfw => "lfw",
            Dataset::ImdbWiki => "imdb_wiki",
        };
        write!(f, "{name}")
    }
}

/// Model architecture identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelArch {
    /// Small regression network
    RegressionNet,
    /// DenseNet variant; requires `densenet_depth`
    DenseNet,
}

/// Valid model names on the wire.
pub const VALID_MODELS: &[&str] = &["regressionnet", "densenet"];

impl FromStr for ModelArch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regressionnet" => Ok(ModelArch::RegressionNet),
            "densenet" => Ok(ModelArch::DenseNet),
            other => Err(format!(
                "unknown model '{other}'. Valid options: {VALID_MODELS:?}"
            )),
        }
    }
}

impl fmt::Display for ModelArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelArch::RegressionNet => "regressionnet",
            ModelArch::DenseNet => "densenet",
        };
        write!(f, "{name}")
    }
}

/// Serialize the clipping norm as the string `"inf"` when unbounded;
/// JSON has no infinity literal and would otherwise emit null.
mod clip_norm_serde {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str("inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumOrStr {
            Num(f64),
            Str(String),
        }

        match NumOrStr::deserialize(deserializer)? {
            NumOrStr::Num(f) => Ok(f),
            NumOrStr::Str(s) => match s.as_str() {
                "inf" | "+inf" => Ok(f64::INFINITY),
                other => Err(D::Error::custom(format!(
                    "expected a number or 'inf', got '{other}'"
                ))),
            },
        }
    }
}

/// One experiment's complete configuration.
///
/// Constructed once from a parameter document at process start and never
/// mutated; every consumer borrows it read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentParams {
    /// Training batch size
    pub batch_size: usize,

    /// Evaluation batch size; defaults to `batch_size`
    pub test_batch_size: usize,

    /// Sub-batches per step for per-example gradient accounting
    pub num_microbatches: usize,

    /// Learning rate
    pub lr: f64,

    /// Optimizer momentum, in [0, 1)
    pub momentum: f64,

    /// Weight decay
    pub decay: f64,

    /// Per-example gradient norm bound (wire key `S`); infinite disables
    /// clipping
    #[serde(rename = "S", with = "clip_norm_serde")]
    pub clip_norm: f64,

    /// Explicit noise standard deviation; takes precedence over the
    /// multiplier-derived value
    pub sigma: f64,

    /// Noise multiplier (wire key `z`); only meaningful with a finite
    /// clipping norm and no explicit sigma
    #[serde(rename = "z")]
    pub noise_multiplier: f64,

    /// Enable differential-privacy noise injection
    pub dp: bool,

    /// Total training epochs
    pub epochs: usize,

    /// Epochs at which to checkpoint, strictly increasing
    pub save_on_epochs: Vec<usize>,

    /// Auxiliary regularization/mixing coefficient
    pub mu: f64,

    /// Dataset size
    pub ds_size: usize,

    /// Checkpoint to resume from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resumed_model: Option<PathBuf>,

    /// Restrict the task to the two-class MNIST variant
    pub binary_mnist_task: bool,

    /// Class labels excluded from the majority data. In binary-task mode
    /// the same set names the minority group for the fairness/privacy
    /// analysis; use [`ExperimentParams::minority_groups`] for that
    /// reading.
    pub key_to_drop: BTreeSet<i64>,

    /// Training sample count per class/group; None uses every sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_entries: Option<usize>,

    /// Test sample count; None uses every sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_entries_test: Option<usize>,

    /// Optimizer selection
    pub optimizer: Optimizer,

    /// Loss function selection
    pub criterion: Criterion,

    /// Persist model weights
    pub save_model: bool,

    /// Dataset identifier
    pub dataset: Dataset,

    /// Model architecture identifier
    pub model: ModelArch,

    /// Depth parameter, required when `model` is a densenet variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub densenet_depth: Option<usize>,

    /// Enable the learning-rate scheduler
    pub scheduler: bool,

    /// Enable multi-device training
    pub multi_gpu: bool,

    /// Per-batch gradient-norm/cosine diagnostic
    pub count_norm_cosine_per_batch: bool,

    /// Auxiliary sigma-like coefficient, separate from `sigma`
    pub csigma: f64,
}

/// Every key the schema understands, in canonical file order.
pub const KNOWN_KEYS: &[&str] = &[
    "test_batch_size",
    "batch_size",
    "num_microbatches",
    "lr",
    "momentum",
    "decay",
    "S",
    "sigma",
    "z",
    "dp",
    "epochs",
    "save_on_epochs",
    "mu",
    "ds_size",
    "resumed_model",
    "binary_mnist_task",
    "key_to_drop",
    "number_of_entries",
    "number_of_entries_test",
    "optimizer",
    "criterion",
    "save_model",
    "dataset",
    "model",
    "densenet_depth",
    "scheduler",
    "multi_gpu",
    "count_norm_cosine_per_batch",
    "csigma",
];

/// Keys present in the document that the schema does not know.
pub fn unknown_keys(doc: &ParamDocument) -> Vec<String> {
    doc.keys()
        .filter(|key| !KNOWN_KEYS.contains(key))
        .map(str::to_string)
        .collect()
}

impl ExperimentParams {
    /// Resolve a raw document into a typed record.
    ///
    /// Required keys must be present; optional keys fall back to their
    /// documented defaults. Unknown keys are pushed onto `warnings`, one
    /// message per key — strict callers reject them before resolution.
    pub fn from_document(
        doc: &ParamDocument,
        warnings: &mut Vec<String>,
    ) -> Result<Self, SchemaError> {
        for key in unknown_keys(doc) {
            warnings.push(format!("unknown key '{key}' ignored"));
        }

        let batch_size = required_usize(doc, "batch_size")?;
        let params = ExperimentParams {
            batch_size,
            test_batch_size: optional_usize(doc, "test_batch_size")?.unwrap_or(batch_size),
            num_microbatches: optional_usize(doc, "num_microbatches")?.unwrap_or(1),
            lr: required_f64(doc, "lr")?,
            momentum: optional_f64(doc, "momentum")?.unwrap_or(0.0),
            decay: optional_f64(doc, "decay")?.unwrap_or(0.0),
            clip_norm: optional_f64(doc, "S")?.unwrap_or(f64::INFINITY),
            sigma: optional_f64(doc, "sigma")?.unwrap_or(0.0),
            noise_multiplier: optional_f64(doc, "z")?.unwrap_or(0.0),
            dp: optional_bool(doc, "dp")?.unwrap_or(false),
            epochs: required_usize(doc, "epochs")?,
            save_on_epochs: optional_usize_list(doc, "save_on_epochs")?.unwrap_or_default(),
            mu: optional_f64(doc, "mu")?.unwrap_or(0.0),
            ds_size: required_usize(doc, "ds_size")?,
            resumed_model: optional_path(doc, "resumed_model")?,
            binary_mnist_task: optional_bool(doc, "binary_mnist_task")?.unwrap_or(false),
            key_to_drop: optional_int_set(doc, "key_to_drop")?.unwrap_or_default(),
            number_of_entries: optional_usize(doc, "number_of_entries")?,
            number_of_entries_test: optional_usize(doc, "number_of_entries_test")?,
            optimizer: required_enum(doc, "optimizer")?,
            criterion: required_enum(doc, "criterion")?,
            save_model: optional_bool(doc, "save_model")?.unwrap_or(false),
            dataset: required_enum(doc, "dataset")?,
            model: required_enum(doc, "model")?,
            densenet_depth: optional_usize(doc, "densenet_depth")?,
            scheduler: optional_bool(doc, "scheduler")?.unwrap_or(false),
            multi_gpu: optional_bool(doc, "multi_gpu")?.unwrap_or(false),
            count_norm_cosine_per_batch: optional_bool(doc, "count_norm_cosine_per_batch")?
                .unwrap_or(false),
            csigma: optional_f64(doc, "csigma")?.unwrap_or(0.0),
        };
        Ok(params)
    }

    /// Whether per-example gradient clipping is active.
    pub fn clipping_enabled(&self) -> bool {
        self.clip_norm.is_finite()
    }

    /// Effective noise standard deviation for the privacy mechanism.
    ///
    /// An explicit `sigma` wins; otherwise it is derived from the noise
    /// multiplier and a finite clipping norm. With clipping disabled and
    /// no explicit sigma there is no noise source.
    pub fn noise_std(&self) -> f64 {
        if self.sigma > 0.0 {
            self.sigma
        } else if self.clip_norm.is_finite() {
            self.noise_multiplier * self.clip_norm
        } else {
            0.0
        }
    }

    /// The minority-group labels in binary-task mode.
    ///
    /// The same set as [`ExperimentParams::key_to_drop`]; this accessor
    /// exists so binary-task consumers name the role they read instead of
    /// relying on the overloading convention.
    pub fn minority_groups(&self) -> &BTreeSet<i64> {
        &self.key_to_drop
    }

    /// Render the record back into parameter-file syntax.
    ///
    /// The output re-parses to an equal record; `None` fields are
    /// omitted.
    pub fn to_document_string(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("test_batch_size: {}", self.test_batch_size));
        lines.push(format!("batch_size: {}", self.batch_size));
        lines.push(format!("num_microbatches: {}", self.num_microbatches));
        lines.push(format!("lr: {}", format_float(self.lr)));
        lines.push(format!("momentum: {}", format_float(self.momentum)));
        lines.push(format!("decay: {}", format_float(self.decay)));
        lines.push(String::new());
        lines.push(format!("S: {}", format_float(self.clip_norm)));
        lines.push(format!("sigma: {}", format_float(self.sigma)));
        lines.push(format!("z: {}", format_float(self.noise_multiplier)));
        lines.push(format!("csigma: {}", format_float(self.csigma)));
        lines.push(format!("mu: {}", format_float(self.mu)));
        lines.push(format!("dp: {}", fmt_bool(self.dp)));
        lines.push(String::new());
        lines.push(format!("epochs: {}", self.epochs));
        lines.push(format!(
            "save_on_epochs: {}",
            fmt_list(self.save_on_epochs.iter())
        ));
        lines.push(format!("save_model: {}", fmt_bool(self.save_model)));
        if let Some(path) = &self.resumed_model {
            lines.push(format!("resumed_model: {}", path.display()));
        }
        lines.push(String::new());
        lines.push(format!("dataset: {}", self.dataset));
        lines.push(format!("ds_size: {}", self.ds_size));
        lines.push(format!(
            "binary_mnist_task: {}",
            fmt_bool(self.binary_mnist_task)
        ));
        lines.push(format!("key_to_drop: {}", fmt_list(self.key_to_drop.iter())));
        if let Some(n) = self.number_of_entries {
            lines.push(format!("number_of_entries: {n}"));
        }
        if let Some(n) = self.number_of_entries_test {
            lines.push(format!("number_of_entries_test: {n}"));
        }
        lines.push(String::new());
        lines.push(format!("model: {}", self.model));
        if let Some(depth) = self.densenet_depth {
            lines.push(format!("densenet_depth: {depth}"));
        }
        lines.push(format!("optimizer: {}", self.optimizer));
        lines.push(format!("criterion: {}", self.criterion));
        lines.push(format!("scheduler: {}", fmt_bool(self.scheduler)));
        lines.push(format!("multi_gpu: {}", fmt_bool(self.multi_gpu)));
        lines.push(format!(
            "count_norm_cosine_per_batch: {}",
            fmt_bool(self.count_norm_cosine_per_batch)
        ));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn fmt_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

fn fmt_list<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let rendered: Vec<String> = items.map(|item| item.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

// ---------------------------------------------------------------------------
// Resolution helpers
// ---------------------------------------------------------------------------

fn require<'doc>(doc: &'doc ParamDocument, key: &'static str) -> Result<&'doc ParamValue, SchemaError> {
    doc.get(key).ok_or(SchemaError::MissingKey(key))
}

fn mismatch(key: &str, expected: &'static str, value: &ParamValue) -> SchemaError {
    SchemaError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: format!("{} `{}`", value.type_name(), value),
    }
}

fn required_usize(doc: &ParamDocument, key: &'static str) -> Result<usize, SchemaError> {
    let value = require(doc, key)?;
    value
        .as_usize()
        .ok_or_else(|| mismatch(key, "non-negative integer", value))
}

fn optional_usize(doc: &ParamDocument, key: &'static str) -> Result<Option<usize>, SchemaError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_usize()
            .map(Some)
            .ok_or_else(|| mismatch(key, "non-negative integer", value)),
    }
}

fn required_f64(doc: &ParamDocument, key: &'static str) -> Result<f64, SchemaError> {
    let value = require(doc, key)?;
    value.as_f64().ok_or_else(|| mismatch(key, "number", value))
}

fn optional_f64(doc: &ParamDocument, key: &'static str) -> Result<Option<f64>, SchemaError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| mismatch(key, "number", value)),
    }
}

fn optional_bool(doc: &ParamDocument, key: &'static str) -> Result<Option<bool>, SchemaError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| mismatch(key, "True or False", value)),
    }
}

fn optional_path(doc: &ParamDocument, key: &'static str) -> Result<Option<PathBuf>, SchemaError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(PathBuf::from(s)))
            .ok_or_else(|| mismatch(key, "path", value)),
    }
}

fn optional_usize_list(
    doc: &ParamDocument,
    key: &'static str,
) -> Result<Option<Vec<usize>>, SchemaError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_usize_list()
            .map(Some)
            .ok_or_else(|| mismatch(key, "list of non-negative integers", value)),
    }
}

fn optional_int_set(
    doc: &ParamDocument,
    key: &'static str,
) -> Result<Option<BTreeSet<i64>>, SchemaError> {
    match doc.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_int_list()
            .map(|items| Some(items.into_iter().collect()))
            .ok_or_else(|| mismatch(key, "list of integers", value)),
    }
}

fn required_enum<T>(doc: &ParamDocument, key: &'static str) -> Result<T, SchemaError>
where
    T: FromStr<Err = String>,
{
    let value = require(doc, key)?;
    let name = value.as_str().ok_or_else(|| mismatch(key, "name", value))?;
    name.parse()
        .map_err(|reason| SchemaError::InvalidEnum { key, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::parser::parse_document;

    fn resolve(text: &str) -> Result<(ExperimentParams, Vec<String>), SchemaError> {
        let doc = parse_document(text).unwrap();
        let mut warnings = Vec::new();
        ExperimentParams::from_document(&doc, &mut warnings).map(|p| (p, warnings))
    }

    const MINIMAL: &str = "\
batch_size: 64
lr: 0.01
epochs: 10
ds_size: 60000
optimizer: SGD
criterion: mse
dataset: mnist
model: regressionnet
";

    #[test]
    fn test_minimal_document_resolves_with_defaults() {
        let (params, warnings) = resolve(MINIMAL).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(params.batch_size, 64);
        assert_eq!(params.test_batch_size, 64); // falls back to batch_size
        assert_eq!(params.num_microbatches, 1);
        assert_eq!(params.clip_norm, f64::INFINITY);
        assert!(!params.dp);
        assert!(!params.clipping_enabled());
        assert!(params.save_on_epochs.is_empty());
        assert!(params.key_to_drop.is_empty());
        assert_eq!(params.number_of_entries, None);
        assert_eq!(params.optimizer, Optimizer::Sgd);
        assert_eq!(params.criterion, Criterion::Mse);
    }

    #[test]
    fn test_missing_required_key() {
        let text = MINIMAL.replace("epochs: 10\n", "");
        let err = resolve(&text).unwrap_err();
        assert!(matches!(err, SchemaError::MissingKey("epochs")));
    }

    #[test]
    fn test_type_mismatch_on_lr() {
        let text = MINIMAL.replace("lr: 0.01", "lr: fast");
        let err = resolve(&text).unwrap_err();
        match err {
            SchemaError::TypeMismatch { key, .. } => assert_eq!(key, "lr"),
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let text = MINIMAL.replace("batch_size: 64", "batch_size: -64");
        let err = resolve(&text).unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn test_unknown_key_becomes_warning() {
        let text = format!("{MINIMAL}warmup_steps: 5\n");
        let (_, warnings) = resolve(&text).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("warmup_steps"));
    }

    #[test]
    fn test_key_to_drop_is_a_set() {
        let text = format!("{MINIMAL}key_to_drop: [8,]\n");
        let (params, _) = resolve(&text).unwrap();
        assert_eq!(params.key_to_drop.len(), 1);
        assert!(params.key_to_drop.contains(&8));
        assert_eq!(params.minority_groups(), &params.key_to_drop);
    }

    #[test]
    fn test_save_on_epochs_preserves_order() {
        let text = format!("{MINIMAL}save_on_epochs: [2, 5, 7]\n");
        let (params, _) = resolve(&text).unwrap();
        assert_eq!(params.save_on_epochs, vec![2, 5, 7]);
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("SGD".parse::<Optimizer>().unwrap(), Optimizer::Sgd);
        assert_eq!("AdamW".parse::<Optimizer>().unwrap(), Optimizer::AdamW);
        assert_eq!("MSE".parse::<Criterion>().unwrap(), Criterion::Mse);
        assert!("rmsprop".parse::<Optimizer>().is_err());
    }

    #[test]
    fn test_invalid_enum_reports_options() {
        let text = MINIMAL.replace("optimizer: SGD", "optimizer: lbfgs");
        let err = resolve(&text).unwrap_err();
        match err {
            SchemaError::InvalidEnum { key, reason } => {
                assert_eq!(key, "optimizer");
                assert!(reason.contains("sgd"));
            }
            other => panic!("expected InvalidEnum, got {other:?}"),
        }
    }

    #[test]
    fn test_noise_std_prefers_explicit_sigma() {
        let text = format!("{MINIMAL}sigma: 1.5\nz: 1.1\nS: 1.0\n");
        let (params, _) = resolve(&text).unwrap();
        assert_eq!(params.noise_std(), 1.5);
    }

    #[test]
    fn test_noise_std_derived_from_multiplier() {
        let text = format!("{MINIMAL}z: 1.1\nS: 2.0\n");
        let (params, _) = resolve(&text).unwrap();
        assert_eq!(params.noise_std(), 2.2);
    }

    #[test]
    fn test_noise_std_zero_without_source() {
        // Unbounded clip norm and no explicit sigma: no derivable noise,
        // and in particular not NaN from 0 * inf.
        let (params, _) = resolve(MINIMAL).unwrap();
        assert_eq!(params.noise_std(), 0.0);
    }

    #[test]
    fn test_document_render_reparses_equal() {
        let text = format!(
            "{MINIMAL}S: inf\nsigma: 1.5\ndp: True\nsave_on_epochs: [2, 5]\nkey_to_drop: [8,]\nbinary_mnist_task: True\n"
        );
        let (params, _) = resolve(&text).unwrap();
        let rendered = params.to_document_string();
        let (reparsed, warnings) = resolve(&rendered).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(params, reparsed);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let (params, _) = resolve(MINIMAL).unwrap();
        let yaml = serde_yaml::to_string(&params).unwrap();
        let back: ExperimentParams = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(params, back);
    }

    #[test]
    fn test_json_renders_infinite_clip_norm_as_string() {
        let (params, _) = resolve(MINIMAL).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"S\":\"inf\""));
        let back: ExperimentParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back.clip_norm, f64::INFINITY);
    }
}
