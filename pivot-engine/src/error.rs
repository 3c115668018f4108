//! FILENAME: pivot-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("column '{column}' at row {row} holds a {found} value where a number is required")]
    TypeMismatch {
        column: String,
        row: usize,
        found: &'static str,
    },

    #[error("group-by requires at least one grouping key")]
    MissingKeys,

    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
