//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::{LogLevel, ValidateArgs};
use crate::params::{load_params, load_params_strict, ExperimentParams};

/// Format batching configuration as a string
pub fn format_batching_info(params: &ExperimentParams) -> String {
    format!(
        "  Batch size: {} ({} microbatches)\n  Test batch size: {}",
        params.batch_size, params.num_microbatches, params.test_batch_size
    )
}

/// Format optimizer configuration as a string
pub fn format_optimizer_info(params: &ExperimentParams) -> String {
    let mut lines = vec![
        format!("  Optimizer: {}", params.optimizer),
        format!("  Criterion: {}", params.criterion),
        format!("  Learning rate: {}", params.lr),
        format!("  Momentum: {}", params.momentum),
    ];
    if params.decay > 0.0 {
        lines.push(format!("  Weight decay: {}", params.decay));
    }
    if params.scheduler {
        lines.push("  LR scheduler: enabled".to_string());
    }
    lines.join("\n")
}

/// Format the privacy mechanism as a string
pub fn format_privacy_info(params: &ExperimentParams) -> String {
    if !params.dp {
        return "  DP: disabled".to_string();
    }
    let clipping = if params.clipping_enabled() {
        format!("S = {}", params.clip_norm)
    } else {
        "disabled (S = inf)".to_string()
    };
    format!(
        "  DP: enabled\n  Clipping: {clipping}\n  Noise std: {}",
        params.noise_std()
    )
}

/// Format data configuration as a string
pub fn format_data_info(params: &ExperimentParams) -> String {
    let mut lines = vec![
        format!("  Dataset: {} ({} samples)", params.dataset, params.ds_size),
        format!("  Model: {}", params.model),
    ];
    if let Some(depth) = params.densenet_depth {
        lines.push(format!("  DenseNet depth: {depth}"));
    }
    if params.binary_mnist_task {
        let groups: Vec<String> = params
            .minority_groups()
            .iter()
            .map(|label| label.to_string())
            .collect();
        lines.push(format!(
            "  Binary task, minority group: [{}]",
            groups.join(", ")
        ));
    }
    if let Some(n) = params.number_of_entries {
        lines.push(format!("  Training entries per group: {n}"));
    }
    lines.join("\n")
}

/// Format the training schedule as a string
pub fn format_schedule_info(params: &ExperimentParams) -> String {
    let mut lines = vec![format!("  Epochs: {}", params.epochs)];
    if !params.save_on_epochs.is_empty() {
        lines.push(format!("  Checkpoints at: {:?}", params.save_on_epochs));
    }
    if let Some(path) = &params.resumed_model {
        lines.push(format!("  Resuming from: {}", path.display()));
    }
    lines.join("\n")
}

/// Print detailed record summary
pub fn print_detailed_summary(params: &ExperimentParams) {
    println!();
    println!("Experiment Summary:");
    println!("{}", format_data_info(params));
    println!();
    println!("{}", format_batching_info(params));
    println!();
    println!("{}", format_optimizer_info(params));
    println!();
    println!("{}", format_privacy_info(params));
    println!();
    println!("{}", format_schedule_info(params));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating params: {}", args.params.display()),
    );

    let params = if args.strict {
        load_params_strict(&args.params).map_err(|e| format!("Params error: {e}"))?
    } else {
        let report = load_params(&args.params).map_err(|e| format!("Params error: {e}"))?;
        for warning in &report.warnings {
            eprintln!("Warning: {warning}");
        }
        report.params
    };

    log(level, LogLevel::Normal, "Parameter file is valid");

    if args.detailed {
        print_detailed_summary(&params);
    }

    Ok(())
}
