//! Info command implementation

use crate::cli::logging::log;
use crate::cli::{InfoArgs, LogLevel, OutputFormat};
use crate::params::load_params;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let report = load_params(&args.params).map_err(|e| format!("Params error: {e}"))?;
    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }
    let params = report.params;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Experiment Info:");
            println!();
            println!("Dataset: {} ({} samples)", params.dataset, params.ds_size);
            println!("Model: {}", params.model);
            println!(
                "Optimizer: {} (lr={}, momentum={})",
                params.optimizer, params.lr, params.momentum
            );
            println!("Epochs: {}", params.epochs);
            println!("Batch size: {}", params.batch_size);

            if params.dp {
                println!("DP: enabled (noise std {})", params.noise_std());
            }
            if params.binary_mnist_task {
                println!("Binary task: minority group {:?}", params.minority_groups());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&params)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&params)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
