//! FILENAME: records/src/table.rs
//! Table-level helpers that do not aggregate: cross-reference maps and
//! record intersections.

use std::collections::HashMap;

use crate::record::Record;
use crate::value::FieldValue;

/// An ordered sequence of records. Order is significant.
pub type Table = Vec<Record>;

/// A key -> value lookup built from two columns of a table.
///
/// Keys keep the position in which they were first seen; when a key repeats,
/// the later row's value wins.
#[derive(Debug, Clone, Default)]
pub struct CrossReference {
    index: HashMap<FieldValue, usize>,
    entries: Vec<(FieldValue, FieldValue)>,
}

impl CrossReference {
    pub fn get(&self, key: &FieldValue) -> Option<&FieldValue> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldValue, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    fn put(&mut self, key: FieldValue, value: FieldValue) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }
}

/// Builds a cross-reference from `key_column` to `value_column`.
/// Missing columns read as null on either side.
pub fn create_map(table: &[Record], key_column: &str, value_column: &str) -> CrossReference {
    let mut map = CrossReference::default();
    for row in table {
        map.put(row.value(key_column).clone(), row.value(value_column).clone());
    }
    map
}

/// Columns present in both records, in `a`'s column order, paired with each
/// record's value for that column.
pub fn intersection<'a>(a: &'a Record, b: &'a Record) -> Vec<(&'a str, &'a FieldValue, &'a FieldValue)> {
    a.iter()
        .filter_map(|(key, va)| b.get(key).map(|vb| (key, va, vb)))
        .collect()
}
