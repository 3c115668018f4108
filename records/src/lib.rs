//! FILENAME: records/src/lib.rs
//! PURPOSE: Labeled records and tables.
//! CONTEXT: The tabular shape shared by data-access producers, the pivot
//! engine, and reporting consumers. Re-exports the public types.

pub mod record;
pub mod table;
pub mod value;

pub use record::Record;
pub use table::{create_map, intersection, CrossReference, Table};
pub use value::{FieldValue, DATE_DISPLAY_FORMAT};
