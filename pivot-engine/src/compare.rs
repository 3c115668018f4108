//! FILENAME: pivot-engine/src/compare.rs
//! Record Comparator - type-aware, multi-key, null-tolerant ordering.
//!
//! Keys are evaluated left to right and the first non-equal key decides.
//! Per-key rules:
//! 1. null vs null is equal; null sorts before any value
//! 2. numbers compare as f64
//! 3. booleans: false < true
//! 4. dates compare chronologically
//! 5. anything else (including mixed types) compares by string form

use std::cmp::Ordering;

use records::{FieldValue, Record};

/// Compares two field values. Missing columns should be passed as `Null`.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    use FieldValue::*;
    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,

        (Boolean(x), Boolean(y)) => x.cmp(y),
        (Date(x), Date(y)) => x.cmp(y),
        (Text(x), Text(y)) => x.as_str().cmp(y.as_str()),

        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => compare_f64(x, y),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

/// f64 ordering that agrees with `FieldValue` equality: -0.0 equals 0.0 and
/// NaN equals NaN, sorting after every other number.
fn compare_f64(x: f64, y: f64) -> Ordering {
    match x.partial_cmp(&y) {
        Some(ordering) => ordering,
        None => x.is_nan().cmp(&y.is_nan()),
    }
}

/// Compares two records over `keys`, most significant first.
pub fn compare_records<S: AsRef<str>>(a: &Record, b: &Record, keys: &[S]) -> Ordering {
    for key in keys {
        let key = key.as_ref();
        let ordering = compare_values(a.value(key), b.value(key));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Sorts `table` in place by `keys`. The sort is stable: rows that compare
/// equal keep their relative order.
pub fn sort<S: AsRef<str>>(table: &mut [Record], keys: &[S]) {
    if table.len() < 2 {
        return;
    }
    table.sort_by(|a, b| compare_records(a, b, keys));
}
