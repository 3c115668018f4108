//! FILENAME: pivot-engine/src/pivot.rs
//! Pivot Engine - reshapes a long table into one wide row per group.
//!
//! Algorithm:
//! 1. Sort by (group key, pivot key)
//! 2. Pass 1: discover the distinct pivot values in first-seen order; these
//!    become the output columns
//! 3. Pass 2: stream the rows, folding each value into its pivot cell, and
//!    emit a wide row whenever the group key changes
//! 4. Emit the trailing group after the loop

use log::{debug, trace};
use records::{FieldValue, Record, Table};
use rustc_hash::FxHashMap;

use crate::accumulator::{numeric_value, Accumulator};
use crate::compare::sort;
use crate::definition::{empty_pivot_value, AggregateFunction};
use crate::error::Result;

// ============================================================================
// PIVOT COLUMNS
// ============================================================================

/// Distinct pivot values, interned in first-seen order.
/// Each value's index is its output column slot.
#[derive(Debug, Default)]
pub(crate) struct PivotColumns {
    value_to_slot: FxHashMap<FieldValue, usize>,
    slot_to_value: Vec<FieldValue>,
}

impl PivotColumns {
    /// Interns a value and returns its slot.
    pub fn intern(&mut self, value: FieldValue) -> usize {
        if let Some(&slot) = self.value_to_slot.get(&value) {
            return slot;
        }
        let slot = self.slot_to_value.len();
        self.slot_to_value.push(value.clone());
        self.value_to_slot.insert(value, slot);
        slot
    }

    pub fn slot(&self, value: &FieldValue) -> Option<usize> {
        self.value_to_slot.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.slot_to_value.len()
    }

    pub fn into_values(self) -> Vec<FieldValue> {
        self.slot_to_value
    }
}

/// A row's pivot value, with null or missing replaced by the sentinel.
pub(crate) fn pivot_value_of(row: &Record, pivot_key: &str) -> FieldValue {
    match row.value(pivot_key) {
        FieldValue::Null => empty_pivot_value(),
        value => value.clone(),
    }
}

// ============================================================================
// PIVOT
// ============================================================================

/// Pivots `table`: one output row per distinct `group_by_key` value (ascending),
/// with one column per distinct `pivot_key` value (first-seen order after
/// sorting) holding the fold of `value_key` under `function`.
///
/// Null or missing pivot values land in the [`EMPTY_PIVOT_VALUE`] column.
/// Cells with no matching rows get `empty_value`. SUM and AVG cells whose
/// rows are all null read 0 and null respectively. Group boundaries compare the
/// string form of the group key; each output row carries the key value of its
/// group's first row.
///
/// `table` is sorted in place by (`group_by_key`, `pivot_key`).
///
/// [`EMPTY_PIVOT_VALUE`]: crate::definition::EMPTY_PIVOT_VALUE
pub fn pivot(
    table: &mut [Record],
    group_by_key: &str,
    pivot_key: &str,
    value_key: &str,
    function: AggregateFunction,
    empty_value: impl Into<FieldValue>,
) -> Result<Table> {
    if table.is_empty() {
        return Ok(Table::new());
    }
    let empty_value = empty_value.into();

    debug!(
        "pivot rows={} group_by_key={} pivot_key={} value_key={} function={:?}",
        table.len(),
        group_by_key,
        pivot_key,
        value_key,
        function
    );

    sort(table, &[group_by_key, pivot_key]);

    // Pass 1: column discovery
    let mut columns = PivotColumns::default();
    for row in table.iter() {
        columns.intern(pivot_value_of(row, pivot_key));
    }

    // Pass 2: fold
    let mut cells = vec![Accumulator::new(); columns.len()];
    let mut results = Table::new();
    let mut current: Option<(String, FieldValue)> = None;

    for (row_index, row) in table.iter().enumerate() {
        let group_value = row.value(group_by_key);
        let group_label = group_value.to_string();

        let starts_group = current
            .as_ref()
            .map_or(true, |(last_label, _)| *last_label != group_label);
        if starts_group {
            if let Some((_, last_value)) = current.take() {
                trace!("pivot boundary at row {}", row_index);
                results.push(build_pivot_record(
                    group_by_key,
                    last_value,
                    &columns,
                    &cells,
                    function,
                    &empty_value,
                ));
                cells.iter_mut().for_each(Accumulator::reset);
            }
            current = Some((group_label, group_value.clone()));
        }

        let n = numeric_value(row, value_key, row_index)?;
        if let Some(slot) = columns.slot(&pivot_value_of(row, pivot_key)) {
            cells[slot].add_pivot(n, function);
        }
    }

    if let Some((_, last_value)) = current {
        results.push(build_pivot_record(
            group_by_key,
            last_value,
            &columns,
            &cells,
            function,
            &empty_value,
        ));
    }

    debug!("pivot produced {} rows x {} pivot columns", results.len(), columns.len());
    Ok(results)
}

/// Builds one wide row: the group key followed by one cell per pivot column.
fn build_pivot_record(
    group_by_key: &str,
    group_value: FieldValue,
    columns: &PivotColumns,
    cells: &[Accumulator],
    function: AggregateFunction,
    empty_value: &FieldValue,
) -> Record {
    let mut record = Record::with_capacity(columns.len() + 1);
    record.insert(group_by_key, group_value);
    for (value, cell) in columns.slot_to_value.iter().zip(cells) {
        record.insert(value.to_string(), cell.pivot_result(function, empty_value));
    }
    record
}
