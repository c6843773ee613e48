use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::types::Value;

type ColumnIndex = Arc<HashMap<String, usize>>;

fn build_column_index(column_names: &[String]) -> ColumnIndex {
    Arc::new(
        column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect(),
    )
}

/// One row of a query result: column name to value.
///
/// Column order follows the driver's result metadata.
#[derive(Debug, Clone)]
pub struct Record {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub values: Vec<Value>,
    // name -> position, shared with the rest of the result set
    column_index: ColumnIndex,
}

impl Record {
    /// Create a record from column names and values in matching order.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        let column_index = build_column_index(&column_names);
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Get a value from the row by column name, or None if the column wasn't returned.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&Value> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Apply `f` to every value, keeping the column layout.
    #[must_use]
    pub fn map_values<F>(self, f: F) -> Self
    where
        F: FnMut(Value) -> Value,
    {
        Self {
            column_names: self.column_names,
            values: self.values.into_iter().map(f).collect(),
            column_index: self.column_index,
        }
    }

    /// Render the record as a JSON object keyed by column name.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}

/// The rows returned by one SELECT.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<Record>,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<ColumnIndex>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names shared by every row added afterwards.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(build_column_index(&column_names));
        self.column_names = Some(column_names);
    }

    /// Add a row to the result set.
    ///
    /// Rows added before `set_column_names` are dropped.
    pub fn add_row_values(&mut self, values: Vec<Value>) {
        if let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index)
        {
            self.results.push(Record {
                column_names: Arc::clone(column_names),
                values,
                column_index: Arc::clone(column_index),
            });
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Outcome of an INSERT, UPDATE or DELETE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecResult {
    /// Rows changed by the statement, as reported by the driver
    pub rows_affected: u64,
    /// Auto-increment id generated by the statement, if the driver reports one
    pub last_insert_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns(names: &[&str]) -> Arc<Vec<String>> {
        Arc::new(names.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn lookup_by_name_and_index() {
        let rec = Record::new(
            columns(&["id", "name"]),
            vec![Value::Int(1), Value::Text("alice".into())],
        );
        assert_eq!(rec.get("name"), Some(&Value::Text("alice".into())));
        assert_eq!(rec.get_by_index(0), Some(&Value::Int(1)));
        assert_eq!(rec.get("missing"), None);
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn result_set_shares_columns() {
        let mut rs = ResultSet::with_capacity(2);
        rs.add_row_values(vec![Value::Int(0)]);
        assert!(rs.is_empty(), "rows without column names are dropped");

        rs.set_column_names(columns(&["id"]));
        rs.add_row_values(vec![Value::Int(1)]);
        rs.add_row_values(vec![Value::Int(2)]);
        assert_eq!(rs.len(), 2);
        assert!(Arc::ptr_eq(
            &rs.results[0].column_names,
            &rs.results[1].column_names
        ));
        assert_eq!(rs.results[1].get("id"), Some(&Value::Int(2)));
    }

    #[test]
    fn map_values_keeps_layout() {
        let rec = Record::new(
            columns(&["a", "b"]),
            vec![Value::Blob(b"x".to_vec()), Value::Int(5)],
        )
        .map_values(Value::normalize_bytes);
        assert_eq!(rec.get("a"), Some(&Value::Text("x".into())));
        assert_eq!(rec.get("b"), Some(&Value::Int(5)));
    }

    #[test]
    fn record_to_json() {
        let rec = Record::new(
            columns(&["id", "name", "deleted_at"]),
            vec![Value::Int(1), Value::Text("alice".into()), Value::Null],
        );
        assert_eq!(
            rec.to_json(),
            json!({"id": 1, "name": "alice", "deleted_at": null})
        );
    }
}
