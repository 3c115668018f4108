//! FILENAME: pivot-engine/src/distinct.rs
//! Distinct values of one column across a whole table.

use records::{FieldValue, Record};

use crate::compare::compare_values;
use crate::pivot::{pivot_value_of, PivotColumns};

/// Returns the distinct values of `column`, sorted ascending.
///
/// Null and missing values are reported as the pivot sentinel. The table
/// itself is not reordered.
pub fn distinct_values(table: &[Record], column: &str) -> Vec<FieldValue> {
    let mut seen = PivotColumns::default();
    for row in table {
        seen.intern(pivot_value_of(row, column));
    }

    let mut values = seen.into_values();
    values.sort_by(compare_values);
    values
}
