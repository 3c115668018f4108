//! FILENAME: pivot-engine/src/definition.rs
//! Aggregation Definitions - The serializable configuration.
//!
//! This module contains the types needed to DESCRIBE a group-by or pivot
//! request. These structures are designed to be:
//! - Serializable (reports can store them as JSON next to their query)
//! - Validated before they touch any data
//! - Immutable snapshots of caller intent

use records::{FieldValue, Record, Table};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Stands in for a null or missing pivot-key value so those rows form their
/// own column instead of being dropped.
///
/// Unrelated to the caller's `empty_value`, which fills cells that received
/// no contributions.
pub const EMPTY_PIVOT_VALUE: &str = "(empty)";

/// The pivot sentinel as a field value.
pub fn empty_pivot_value() -> FieldValue {
    FieldValue::text(EMPTY_PIVOT_VALUE)
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// How a numeric column is folded across the rows of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFunction {
    Sum,
    Min,
    Max,
    Avg,
}

impl Default for AggregateFunction {
    fn default() -> Self {
        AggregateFunction::Sum
    }
}

// ============================================================================
// GROUP BY
// ============================================================================

/// Describes a group-by: one output row per distinct tuple of
/// `group_by_keys`, carrying the folded `numeric_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupByDefinition {
    /// Column holding the numbers to fold.
    pub numeric_key: String,

    #[serde(default)]
    pub function: AggregateFunction,

    /// Grouping columns, most significant first.
    pub group_by_keys: Vec<String>,
}

impl GroupByDefinition {
    pub fn new(numeric_key: impl Into<String>, function: AggregateFunction, group_by_keys: &[&str]) -> Self {
        GroupByDefinition {
            numeric_key: numeric_key.into(),
            function,
            group_by_keys: group_by_keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.numeric_key.is_empty() {
            return Err(EngineError::InvalidDefinition("numeric_key is empty".to_string()));
        }
        if self.group_by_keys.is_empty() {
            return Err(EngineError::MissingKeys);
        }
        if self.group_by_keys.iter().any(String::is_empty) {
            return Err(EngineError::InvalidDefinition("group_by_keys contains an empty name".to_string()));
        }
        Ok(())
    }

    /// Validates, then runs the group-by. Reorders `table` in place.
    pub fn apply(&self, table: &mut [Record]) -> Result<Table> {
        self.validate()?;
        crate::group_by::group_by(table, &self.numeric_key, self.function, self.group_by_keys.as_slice())
    }
}

// ============================================================================
// PIVOT
// ============================================================================

/// Describes a pivot: one wide row per distinct `group_by_key` value, one
/// column per distinct `pivot_key` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotDefinition {
    pub group_by_key: String,

    /// Column whose distinct values become output columns.
    pub pivot_key: String,

    /// Column holding the numbers to fold into each cell.
    pub value_key: String,

    #[serde(default)]
    pub function: AggregateFunction,

    /// Cell value for a (group, pivot value) pair with no matching rows.
    /// Zero is the usual choice for reports; absent means null.
    #[serde(default)]
    pub empty_value: FieldValue,
}

impl PivotDefinition {
    pub fn new(
        group_by_key: impl Into<String>,
        pivot_key: impl Into<String>,
        value_key: impl Into<String>,
        function: AggregateFunction,
        empty_value: impl Into<FieldValue>,
    ) -> Self {
        PivotDefinition {
            group_by_key: group_by_key.into(),
            pivot_key: pivot_key.into(),
            value_key: value_key.into(),
            function,
            empty_value: empty_value.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, key) in [
            ("group_by_key", &self.group_by_key),
            ("pivot_key", &self.pivot_key),
            ("value_key", &self.value_key),
        ] {
            if key.is_empty() {
                return Err(EngineError::InvalidDefinition(format!("{} is empty", name)));
            }
        }
        Ok(())
    }

    /// Validates, then runs the pivot. Reorders `table` in place.
    pub fn apply(&self, table: &mut [Record]) -> Result<Table> {
        self.validate()?;
        crate::pivot::pivot(
            table,
            &self.group_by_key,
            &self.pivot_key,
            &self.value_key,
            self.function,
            self.empty_value.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_by_definition_from_json() {
        let def: GroupByDefinition = serde_json::from_str(
            r#"{"numeric_key":"amt","function":"Avg","group_by_keys":["state","city"]}"#,
        )
        .unwrap();
        assert_eq!(def.function, AggregateFunction::Avg);
        assert_eq!(def.group_by_keys, vec!["state", "city"]);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn function_defaults_to_sum() {
        let def: GroupByDefinition =
            serde_json::from_str(r#"{"numeric_key":"amt","group_by_keys":["state"]}"#).unwrap();
        assert_eq!(def.function, AggregateFunction::Sum);
    }

    #[test]
    fn group_by_without_keys_is_rejected() {
        let def = GroupByDefinition::new("amt", AggregateFunction::Sum, &[]);
        assert_eq!(def.validate(), Err(EngineError::MissingKeys));

        let def = GroupByDefinition::new("amt", AggregateFunction::Sum, &["state", ""]);
        assert!(matches!(def.validate(), Err(EngineError::InvalidDefinition(_))));
    }

    #[test]
    fn pivot_definition_empty_value() {
        let def: PivotDefinition = serde_json::from_str(
            r#"{"group_by_key":"state","pivot_key":"pet_type","value_key":"owner_count","function":"Sum","empty_value":0}"#,
        )
        .unwrap();
        assert_eq!(def.empty_value, FieldValue::Integer(0));

        let def: PivotDefinition = serde_json::from_str(
            r#"{"group_by_key":"state","pivot_key":"pet_type","value_key":"owner_count"}"#,
        )
        .unwrap();
        assert!(def.empty_value.is_null());
    }

    #[test]
    fn pivot_definition_rejects_blank_keys() {
        let def = PivotDefinition::new("state", "", "owner_count", AggregateFunction::Max, 0);
        assert_eq!(
            def.validate(),
            Err(EngineError::InvalidDefinition("pivot_key is empty".to_string()))
        );
    }
}
