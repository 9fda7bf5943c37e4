//! Load pipeline: file → raw document → typed record → validated record.
//!
//! Loading is fail-fast; a malformed document never yields a
//! partially-typed record. Unknown keys are warnings by default and
//! errors in strict mode.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::parser::{parse_document, ParseError};
use super::schema::{unknown_keys, ExperimentParams, SchemaError};
use super::validate::{validate_params, ValidationError};

/// Any failure along the load pipeline.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A successfully loaded record plus non-fatal findings.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The validated experiment record
    pub params: ExperimentParams,
    /// Non-fatal findings, currently unknown keys
    pub warnings: Vec<String>,
}

/// Parse and validate a parameter document from text.
pub fn parse_params(input: &str) -> Result<LoadReport, ParamsError> {
    let doc = parse_document(input)?;
    let mut warnings = Vec::new();
    let params = ExperimentParams::from_document(&doc, &mut warnings)?;
    validate_params(&params)?;
    Ok(LoadReport { params, warnings })
}

/// Parse and validate a parameter document from text, rejecting unknown
/// keys.
pub fn parse_params_strict(input: &str) -> Result<ExperimentParams, ParamsError> {
    let doc = parse_document(input)?;
    if let Some(key) = unknown_keys(&doc).into_iter().next() {
        return Err(SchemaError::UnknownKey(key).into());
    }
    let mut warnings = Vec::new();
    let params = ExperimentParams::from_document(&doc, &mut warnings)?;
    validate_params(&params)?;
    Ok(params)
}

/// Load, resolve, and validate a parameter file.
pub fn load_params(path: &Path) -> Result<LoadReport, ParamsError> {
    let input = read_file(path)?;
    parse_params(&input)
}

/// Load a parameter file, rejecting unknown keys.
pub fn load_params_strict(path: &Path) -> Result<ExperimentParams, ParamsError> {
    let input = read_file(path)?;
    parse_params_strict(&input)
}

/// Write a record to a parameter file in the wire format.
pub fn save_params(params: &ExperimentParams, path: &Path) -> Result<(), ParamsError> {
    fs::write(path, params.to_document_string()).map_err(|source| ParamsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, ParamsError> {
    fs::read_to_string(path).map_err(|source| ParamsError::Io {
        path: path.to_path_buf(),
        source,
    })
}
