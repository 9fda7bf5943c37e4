//! Raw parameter values.
//!
//! The harness's parameter files use Python-flavored literals: `True` and
//! `False` for booleans, a bare `inf` for unbounded floats, and bracketed
//! comma-separated lists. A [`ParamValue`] is one parsed value before the
//! schema layer assigns it a field.

use std::fmt;

/// A single untyped value from a parameter document.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float; may be infinite (`inf` on the wire)
    Float(f64),
    /// Python-style boolean (`True` / `False`)
    Bool(bool),
    /// Unquoted string (paths, enum names)
    Str(String),
    /// Bracketed list of scalars
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Parse a trimmed scalar token.
    ///
    /// Coercion order: boolean, infinity, integer, float, string. Never
    /// fails; anything unrecognized is a string.
    pub fn parse_scalar(token: &str) -> ParamValue {
        match token {
            "True" => return ParamValue::Bool(true),
            "False" => return ParamValue::Bool(false),
            "inf" | "+inf" => return ParamValue::Float(f64::INFINITY),
            "-inf" => return ParamValue::Float(f64::NEG_INFINITY),
            _ => {}
        }
        if let Ok(i) = token.parse::<i64>() {
            return ParamValue::Int(i);
        }
        if let Ok(f) = token.parse::<f64>() {
            // `parse::<f64>` also accepts "nan"/"infinity"; only finite
            // floats reach here via this branch, infinities were handled
            // above and NaN has no place in a config file.
            if f.is_finite() {
                return ParamValue::Float(f);
            }
        }
        ParamValue::Str(token.to_string())
    }

    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Bool(_) => "boolean",
            ParamValue::Str(_) => "string",
            ParamValue::List(_) => "list",
        }
    }

    /// The value as an i64, if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a non-negative count.
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            ParamValue::Int(i) => usize::try_from(*i).ok(),
            _ => None,
        }
    }

    /// The value as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a list of integers.
    pub fn as_int_list(&self) -> Option<Vec<i64>> {
        match self {
            ParamValue::List(items) => items.iter().map(ParamValue::as_i64).collect(),
            _ => None,
        }
    }

    /// The value as a list of non-negative counts.
    pub fn as_usize_list(&self) -> Option<Vec<usize>> {
        match self {
            ParamValue::List(items) => items.iter().map(ParamValue::as_usize).collect(),
            _ => None,
        }
    }
}

/// Render a float in file syntax: `inf` for infinities, and integral
/// values with a trailing `.0` so they re-parse as floats.
pub fn format_float(f: f64) -> String {
    if f == f64::INFINITY {
        "inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if f == f.trunc() && f.abs() < 1e15 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

impl fmt::Display for ParamValue {
    /// Renders the value in file syntax, so a displayed value re-parses
    /// to an equal one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{}", format_float(*x)),
            ParamValue::Bool(true) => write!(f, "True"),
            ParamValue::Bool(false) => write!(f, "False"),
            ParamValue::Str(s) => write!(f, "{s}"),
            ParamValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
