//! FILENAME: pivot-engine/src/group_by.rs
//! Group-By Engine - folds sorted runs of equal keys into aggregate rows.
//!
//! Algorithm:
//! 1. Sort the table by the grouping keys (stable)
//! 2. Stream the rows, tracking the current key tuple and one accumulator
//! 3. When the key tuple changes, flush the finished group and reset
//! 4. Flush the trailing group after the loop

use log::{debug, trace};
use records::{FieldValue, Record, Table};
use smallvec::SmallVec;

use crate::accumulator::{numeric_value, Accumulator};
use crate::compare::sort;
use crate::definition::AggregateFunction;
use crate::error::{EngineError, Result};

/// Values of the grouping columns for one row.
type KeyTuple = SmallVec<[FieldValue; 4]>;

/// Groups `table` by `group_by_keys` and folds `numeric_key` with `function`.
///
/// Output rows hold the grouping columns (original values) followed by
/// `numeric_key` carrying the aggregate, one row per distinct key tuple in
/// sorted key order. The aggregate is null when a group had no numbers.
///
/// `table` is sorted in place by `group_by_keys`; copy it first if the input
/// order matters. AVG divides by every row of the group, nulls included.
pub fn group_by<S: AsRef<str>>(
    table: &mut [Record],
    numeric_key: &str,
    function: AggregateFunction,
    group_by_keys: &[S],
) -> Result<Table> {
    if group_by_keys.is_empty() {
        return Err(EngineError::MissingKeys);
    }
    if table.is_empty() {
        return Ok(Table::new());
    }

    debug!(
        "group_by rows={} numeric_key={} function={:?} keys={:?}",
        table.len(),
        numeric_key,
        function,
        group_by_keys.iter().map(|k| k.as_ref()).collect::<Vec<&str>>()
    );

    sort(table, group_by_keys);

    let mut result = Table::new();
    let mut last_key: Option<KeyTuple> = None;
    let mut acc = Accumulator::new();

    for (row_index, row) in table.iter().enumerate() {
        let current_key: KeyTuple = group_by_keys
            .iter()
            .map(|k| row.value(k.as_ref()).clone())
            .collect();

        if let Some(previous) = last_key.take() {
            if previous != current_key {
                trace!("group_by boundary at row {}", row_index);
                result.push(build_group_by_record(group_by_keys, previous, numeric_key, &acc, function));
                acc.reset();
            }
        }

        acc.add(numeric_value(row, numeric_key, row_index)?, function);
        last_key = Some(current_key);
    }

    if let Some(previous) = last_key {
        result.push(build_group_by_record(group_by_keys, previous, numeric_key, &acc, function));
    }

    debug!("group_by produced {} groups", result.len());
    Ok(result)
}

/// Builds one output row: the key columns followed by the aggregate column.
fn build_group_by_record<S: AsRef<str>>(
    group_by_keys: &[S],
    key_values: KeyTuple,
    numeric_key: &str,
    acc: &Accumulator,
    function: AggregateFunction,
) -> Record {
    let mut record = Record::with_capacity(group_by_keys.len() + 1);
    for (key, value) in group_by_keys.iter().zip(key_values) {
        let key: &str = key.as_ref();
        record.insert(key, value);
    }
    record.insert(numeric_key, acc.group_by_result(function));
    record
}
