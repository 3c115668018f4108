//! FILENAME: records/src/value.rs
//! PURPOSE: Defines the typed value held by one column of a record.
//! CONTEXT: Result rows arrive from data-access code with a handful of runtime
//! types. `FieldValue` closes that set so every comparison and fold is an
//! exhaustive match instead of a runtime type probe.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format used for dates in string comparisons and column names.
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The value of a single column in a record.
///
/// Serialized untagged, so a record renders as plain JSON. A string that parses
/// as an ISO-8601 datetime deserializes as `Date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }

    /// Widens numeric values to f64. Non-numeric values yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type label, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Date(_) => "date",
            FieldValue::Text(_) => "text",
        }
    }

    /// Bit pattern used for numeric equality and hashing.
    /// Integers and floats share one domain; -0.0 folds into 0.0 and every NaN is one value.
    fn numeric_bits(n: f64) -> u64 {
        if n.is_nan() {
            u64::MAX
        } else if n == 0.0 {
            0
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (a, b) if a.is_numeric() && b.is_numeric() => {
                match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => Self::numeric_bits(x) == Self::numeric_bits(y),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            FieldValue::Null => 0u8.hash(state),
            FieldValue::Boolean(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            FieldValue::Integer(i) => {
                2u8.hash(state);
                Self::numeric_bits(*i as f64).hash(state);
            }
            FieldValue::Float(f) => {
                2u8.hash(state);
                Self::numeric_bits(*f).hash(state);
            }
            FieldValue::Date(d) => {
                3u8.hash(state);
                d.hash(state);
            }
            FieldValue::Text(s) => {
                4u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            FieldValue::Date(d) => write!(f, "{}", d.format(DATE_DISPLAY_FORMAT)),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Integer(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(d: NaiveDateTime) -> Self {
        FieldValue::Date(d)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
