//! Result records
//!
//! A record is one row of a query result: a mapping from field name to a
//! typed value. Values are kept as JSON values; accessors narrow them where
//! the pipeline needs a specific type.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One row of a graph store query result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record by zipping column names with row values
    pub fn from_columns(columns: &[String], row: Vec<Value>) -> Self {
        let fields = columns.iter().cloned().zip(row).collect();
        Self { fields }
    }

    /// Inserts a field, replacing any previous value
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Raw field value; `None` when the field is absent
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field value as a string; `None` when absent or null or non-string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Field value as an integer; `None` when absent or not a number
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Used to describe unexpected payloads in protocol errors.
        let rendered: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}
