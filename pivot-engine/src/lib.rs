//! FILENAME: pivot-engine/src/lib.rs
//! Aggregation subsystem: sorting, group-by and pivot over labeled records.
//!
//! Every operation is a synchronous, single-call transformation. Inputs are
//! `records::Table`s; grouping operations sort their input in place and
//! return a new, smaller table. Nothing is retained between calls.
//!
//! Layers:
//! - `definition`: Serializable configuration (what to compute)
//! - `compare`: Type-aware multi-key ordering
//! - `accumulator`: Running aggregate state
//! - `group_by` / `pivot` / `distinct`: The engines (how we compute)
//! - `series`: Statistics over an output column, for charting

mod accumulator;
pub mod compare;
pub mod definition;
pub mod distinct;
pub mod error;
pub mod group_by;
pub mod pivot;
pub mod series;


pub use compare::{compare_records, compare_values, sort};
pub use definition::*;
pub use distinct::distinct_values;
pub use error::{EngineError, Result};
pub use group_by::group_by;
pub use pivot::pivot;
pub use series::{normalize_to_percentages, DataSeries, SeriesStats};
