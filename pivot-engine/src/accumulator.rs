//! FILENAME: pivot-engine/src/accumulator.rs
//! Running aggregate state for one group (group-by) or one cell (pivot).

use records::{FieldValue, Record};

use crate::definition::AggregateFunction;
use crate::error::{EngineError, Result};

// ============================================================================
// NUMERIC EXTRACTION
// ============================================================================

/// Reads `column` of `row` as a number for folding.
/// Null and missing columns yield `None`; any other non-number is a type mismatch.
pub(crate) fn numeric_value(row: &Record, column: &str, row_index: usize) -> Result<Option<f64>> {
    match row.value(column) {
        FieldValue::Null => Ok(None),
        FieldValue::Integer(i) => Ok(Some(*i as f64)),
        FieldValue::Float(f) => Ok(Some(*f)),
        other => Err(EngineError::TypeMismatch {
            column: column.to_string(),
            row: row_index,
            found: other.type_name(),
        }),
    }
}

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Accumulator for computing an aggregate incrementally.
///
/// Tracks two counters because the two engines average differently:
/// group-by divides by every visited row, pivot divides by non-null
/// contributions only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Accumulator {
    /// Running aggregate. `None` until the first non-null value arrives
    /// (group-by, pivot MIN/MAX) or the first matching row (pivot SUM/AVG).
    pub aggregate: Option<f64>,
    /// Rows visited, null values included.
    pub rows: u64,
    /// Rows that carried a non-null value.
    pub contributions: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator::default()
    }

    /// Folds one row's value. A null value only bumps the row counter.
    pub fn add(&mut self, value: Option<f64>, function: AggregateFunction) {
        self.rows += 1;
        let Some(n) = value else {
            return;
        };
        self.contributions += 1;

        self.aggregate = Some(match (self.aggregate, function) {
            (None, _) => n,
            (Some(acc), AggregateFunction::Sum | AggregateFunction::Avg) => acc + n,
            (Some(acc), AggregateFunction::Min) => if n < acc { n } else { acc },
            (Some(acc), AggregateFunction::Max) => if n > acc { n } else { acc },
        });
    }

    /// Folds one row's value into a pivot cell.
    ///
    /// SUM and AVG cells start at 0 on their first matching row, so a cell
    /// whose rows are all null reads 0 (SUM) or null (AVG), never `empty_value`.
    /// MIN and MAX fold as in group-by.
    pub fn add_pivot(&mut self, value: Option<f64>, function: AggregateFunction) {
        match function {
            AggregateFunction::Sum | AggregateFunction::Avg => {
                self.rows += 1;
                let acc = self.aggregate.unwrap_or(0.0);
                self.aggregate = Some(match value {
                    Some(n) => {
                        self.contributions += 1;
                        acc + n
                    }
                    None => acc,
                });
            }
            AggregateFunction::Min | AggregateFunction::Max => self.add(value, function),
        }
    }

    pub fn reset(&mut self) {
        *self = Accumulator::default();
    }

    /// Final value for a group-by output row. AVG divides by every visited
    /// row, so null values dilute the average.
    pub fn group_by_result(&self, function: AggregateFunction) -> Option<f64> {
        match function {
            AggregateFunction::Avg => {
                if self.rows == 0 {
                    None
                } else {
                    self.aggregate.map(|sum| sum / self.rows as f64)
                }
            }
            AggregateFunction::Sum | AggregateFunction::Min | AggregateFunction::Max => self.aggregate,
        }
    }

    /// Final value for a pivot cell.
    ///
    /// A cell that never received an aggregate gets `empty_value`. AVG divides
    /// by non-null contributions; a zero count with an aggregate present yields null.
    pub fn pivot_result(&self, function: AggregateFunction, empty_value: &FieldValue) -> FieldValue {
        let Some(aggregate) = self.aggregate else {
            return empty_value.clone();
        };
        match function {
            AggregateFunction::Avg => {
                if self.contributions > 0 {
                    FieldValue::Float(aggregate / self.contributions as f64)
                } else {
                    FieldValue::Null
                }
            }
            AggregateFunction::Sum | AggregateFunction::Min | AggregateFunction::Max => {
                FieldValue::Float(aggregate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(values: &[Option<f64>], function: AggregateFunction) -> Accumulator {
        let mut acc = Accumulator::new();
        for v in values {
            acc.add(*v, function);
        }
        acc
    }

    #[test]
    fn sum_min_max() {
        let values = [Some(4.0), Some(-1.0), Some(10.0)];
        assert_eq!(fold(&values, AggregateFunction::Sum).aggregate, Some(13.0));
        assert_eq!(fold(&values, AggregateFunction::Min).aggregate, Some(-1.0));
        assert_eq!(fold(&values, AggregateFunction::Max).aggregate, Some(10.0));
    }

    #[test]
    fn leading_null_leaves_aggregate_unset() {
        let acc = fold(&[None], AggregateFunction::Sum);
        assert_eq!(acc.aggregate, None);
        assert_eq!(acc.rows, 1);
        assert_eq!(acc.contributions, 0);

        let acc = fold(&[None, Some(3.0), None], AggregateFunction::Min);
        assert_eq!(acc.aggregate, Some(3.0));
    }

    #[test]
    fn averages_differ_by_denominator() {
        let acc = fold(&[Some(10.0), None], AggregateFunction::Avg);
        assert_eq!(acc.group_by_result(AggregateFunction::Avg), Some(5.0));
        assert_eq!(
            acc.pivot_result(AggregateFunction::Avg, &FieldValue::Null),
            FieldValue::Float(10.0)
        );
    }

    #[test]
    fn pivot_result_falls_back_to_empty_value() {
        let acc = fold(&[None, None], AggregateFunction::Sum);
        assert_eq!(acc.pivot_result(AggregateFunction::Sum, &FieldValue::Integer(0)), FieldValue::Integer(0));
        assert_eq!(acc.group_by_result(AggregateFunction::Sum), None);
    }

    #[test]
    fn pivot_cells_start_at_zero_for_sum_and_avg() {
        let mut sum = Accumulator::new();
        sum.add_pivot(None, AggregateFunction::Sum);
        sum.add_pivot(None, AggregateFunction::Sum);
        assert_eq!(sum.aggregate, Some(0.0));
        assert_eq!(sum.pivot_result(AggregateFunction::Sum, &FieldValue::Null), FieldValue::Float(0.0));

        let mut avg = Accumulator::new();
        avg.add_pivot(None, AggregateFunction::Avg);
        assert_eq!(avg.pivot_result(AggregateFunction::Avg, &FieldValue::Integer(0)), FieldValue::Null);

        let mut min = Accumulator::new();
        min.add_pivot(None, AggregateFunction::Min);
        assert_eq!(min.pivot_result(AggregateFunction::Min, &FieldValue::Integer(0)), FieldValue::Integer(0));
    }

    #[test]
    fn numeric_value_rejects_text() {
        let row = Record::new().with("v", "ten").with("n", 3);
        assert_eq!(numeric_value(&row, "n", 0), Ok(Some(3.0)));
        assert_eq!(numeric_value(&row, "missing", 0), Ok(None));
        assert_eq!(
            numeric_value(&row, "v", 7),
            Err(EngineError::TypeMismatch {
                column: "v".to_string(),
                row: 7,
                found: "text",
            })
        );
    }
}
