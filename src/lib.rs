//! Experiment configuration for the dpdi training harness.
//!
//! The harness describes each differentially-private training run with a
//! flat, line-oriented parameter file (`key: value` pairs, `#` comments,
//! Python-style `True`/`False` booleans, `inf` for unbounded floats,
//! bracketed integer lists). This crate parses those documents into a
//! single typed [`params::ExperimentParams`] record, validates it at load
//! time, and hands it to the training program read-only.
//!
//! # Usage
//!
//! ```no_run
//! use dpdi_config::params::load_params;
//!
//! let report = load_params(std::path::Path::new("params.txt"))?;
//! for warning in &report.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! let params = report.params;
//! assert!(params.epochs > 0);
//! # Ok::<(), dpdi_config::params::ParamsError>(())
//! ```

pub mod cli;
pub mod params;
