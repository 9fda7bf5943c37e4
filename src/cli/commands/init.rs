//! Init command implementation

use std::fs;

use crate::cli::logging::log;
use crate::cli::{InitArgs, LogLevel};
use crate::params::generate_params_string;

pub fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    if args.path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        ));
    }

    let text = generate_params_string(args.template);
    fs::write(&args.path, text)
        .map_err(|e| format!("failed to write {}: {e}", args.path.display()))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Wrote {} template to {}",
            args.template,
            args.path.display()
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{load_params_strict, Template};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_args(path: PathBuf, force: bool) -> InitArgs {
        InitArgs {
            path,
            template: Template::BinaryMnist,
            force,
        }
    }

    #[test]
    fn test_init_writes_loadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("params.txt");

        run_init(make_args(path.clone(), false), LogLevel::Quiet).unwrap();

        let params = load_params_strict(&path).unwrap();
        assert!(params.binary_mnist_task);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("params.txt");
        std::fs::write(&path, "batch_size: 1\n").unwrap();

        let err = run_init(make_args(path.clone(), false), LogLevel::Quiet).unwrap_err();
        assert!(err.contains("already exists"));

        // --force replaces the file
        run_init(make_args(path.clone(), true), LogLevel::Quiet).unwrap();
        assert!(load_params_strict(&path).is_ok());
    }
}
