use rusqlite::types::Value as SqliteValue;

use crate::error::KnexError;
use crate::types::{ParamConverter, Value};

/// Convert a single `Value` to a rusqlite `Value`.
#[must_use]
pub fn value_to_sqlite(value: &Value) -> SqliteValue {
    match value {
        Value::Int(i) => SqliteValue::Integer(*i),
        Value::Float(f) => SqliteValue::Real(*f),
        Value::Text(s) => SqliteValue::Text(s.clone()),
        Value::Bool(b) => SqliteValue::Integer(i64::from(*b)),
        Value::Timestamp(dt) => SqliteValue::Text(dt.format("%F %T%.f").to_string()),
        Value::Null => SqliteValue::Null,
        Value::JSON(json) => SqliteValue::Text(json.to_string()),
        Value::Blob(bytes) => SqliteValue::Blob(bytes.clone()),
    }
}

/// Owned `SQLite` parameters, movable into a blocking task.
pub struct Params(pub Vec<SqliteValue>);

impl Params {
    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.0.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
    }
}

impl ParamConverter for Params {
    fn convert_sql_params(params: &[Value]) -> Result<Self, KnexError> {
        Ok(Params(params.iter().map(value_to_sqlite).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn converts_in_order() {
        let params = Params::convert_sql_params(&[
            Value::Int(1),
            Value::Text("a".into()),
            Value::Bool(false),
            Value::Null,
        ])
        .unwrap();
        assert_eq!(
            params.0,
            vec![
                SqliteValue::Integer(1),
                SqliteValue::Text("a".into()),
                SqliteValue::Integer(0),
                SqliteValue::Null,
            ]
        );
        assert_eq!(params.as_refs().len(), 4);
    }

    #[test]
    fn timestamps_become_text() {
        let dt = NaiveDateTime::parse_from_str("2024-01-01 08:00:01", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(
            value_to_sqlite(&Value::Timestamp(dt)),
            SqliteValue::Text("2024-01-01 08:00:01".into())
        );
    }
}
