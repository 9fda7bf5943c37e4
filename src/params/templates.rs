//! Starter parameter files.
//!
//! `dpdi-config init` writes one of these so a new experiment starts from
//! a record that already loads and validates.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::schema::{Criterion, Dataset, ExperimentParams, ModelArch, Optimizer};

/// Template type for initialization
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Template {
    /// The DP binary-MNIST regression experiment: explicit sigma,
    /// unbounded clipping, class 8 as the dropped/minority label
    #[default]
    BinaryMnist,
    /// DenseNet on CIFAR-10 with multiplier-derived noise, every toggle
    /// spelled out
    Full,
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary-mnist" | "binary_mnist" | "mnist" => Ok(Template::BinaryMnist),
            "full" | "densenet" => Ok(Template::Full),
            _ => Err(format!(
                "Unknown template: {s}. Valid templates: binary-mnist, full"
            )),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Template::BinaryMnist => "binary-mnist",
            Template::Full => "full",
        };
        write!(f, "{name}")
    }
}

/// Generate the record a template describes.
pub fn generate_params(template: Template) -> ExperimentParams {
    match template {
        Template::BinaryMnist => generate_binary_mnist(),
        Template::Full => generate_full(),
    }
}

/// Generate a template as parameter-file text.
pub fn generate_params_string(template: Template) -> String {
    let header = match template {
        Template::BinaryMnist => "# DP regression on binary MNIST (minority class 8)\n",
        Template::Full => "# DenseNet-100 on CIFAR-10 with DP-SGD\n",
    };
    let mut out = String::from(header);
    out.push_str(&generate_params(template).to_document_string());
    if template == Template::Full {
        // Uncomment to continue a previous run.
        out.push_str("# resumed_model: runs/densenet100_cifar10.pt\n");
    }
    out
}

fn generate_binary_mnist() -> ExperimentParams {
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

fn generate_full() -> ExperimentParams {
    ExperimentParams {
        batch_size: 256,
        test_batch_size: 512,
        num_microbatches: 32,
        lr: 0.1,
        momentum: 0.9,
        decay: 5e-4,
        clip_norm: 1.0,
        sigma: 0.0,
        noise_multiplier: 1.1,
        dp: true,
        epochs: 300,
        save_on_epochs: vec![100, 200, 300],
        mu: 0.1,
        ds_size: 50_000,
        resumed_model: None,
        binary_mnist_task: false,
        key_to_drop: BTreeSet::new(),
        number_of_entries: None,
        number_of_entries_test: None,
        optimizer: Optimizer::Sgd,
        criterion: Criterion::CrossEntropy,
        save_model: true,
        dataset: Dataset::Cifar10,
        model: ModelArch::DenseNet,
        densenet_depth: Some(100),
        scheduler: true,
        multi_gpu: true,
        count_norm_cosine_per_batch: true,
        csigma: 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::loader::parse_params_strict;
    use crate::params::validate::validate_params;

    #[test]
    fn test_templates_validate() {
        for template in [Template::BinaryMnist, Template::Full] {
            let params = generate_params(template);
            assert!(
                validate_params(&params).is_ok(),
                "template {template} should validate"
            );
        }
    }

    #[test]
    fn test_templates_reload_to_equal_records() {
        for template in [Template::BinaryMnist, Template::Full] {
            let text = generate_params_string(template);
            let loaded = parse_params_strict(&text)
                .unwrap_or_else(|e| panic!("template {template} should load: {e}"));
            assert_eq!(loaded, generate_params(template));
        }
    }

    #[test]
    fn test_template_from_str() {
        assert_eq!("binary-mnist".parse::<Template>(), Ok(Template::BinaryMnist));
        assert_eq!("FULL".parse::<Template>(), Ok(Template::Full));
        assert!("lora".parse::<Template>().is_err());
    }

    #[test]
    fn test_binary_mnist_matches_spec_fixture() {
        let params = generate_binary_mnist();
        assert!(!params.clipping_enabled());
        assert_eq!(params.noise_std(), 1.5);
        assert_eq!(params.minority_groups(), &BTreeSet::from([8]));
        assert_eq!(params.save_on_epochs, vec![10, 50, 100, 200]);
    }
}
