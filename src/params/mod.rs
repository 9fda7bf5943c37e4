//! Parameter document parsing, the typed experiment record, and the load
//! pipeline.
//!
//! The layers, bottom up:
//!
//! - [`value`] / [`parser`] — raw `key: value` documents,
//! - [`schema`] — the typed [`ExperimentParams`] record and resolution
//!   from a raw document,
//! - [`validate`] — range and cross-field checks,
//! - [`loader`] — the file-to-validated-record pipeline,
//! - [`templates`] — starter files for `init`.

pub mod loader;
pub mod parser;
pub mod schema;
pub mod templates;
pub mod validate;
pub mod value;

pub use loader::{
    load_params, load_params_strict, parse_params, parse_params_strict, save_params, LoadReport,
    ParamsError,
};
pub use parser::{parse_document, ParamDocument, ParseError};
pub use schema::{
    Criterion, Dataset, ExperimentParams, ModelArch, Optimizer, SchemaError, KNOWN_KEYS,
};
pub use templates::{generate_params, generate_params_string, Template};
pub use validate::{validate_params, ValidationError};
pub use value::ParamValue;
