use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde_json::Value as JsonValue;

use crate::error::KnexError;

/// Values that can be bound as query parameters or read back from a row.
///
/// The same enum is used for every backend, and most Rust scalars convert into it:
/// ```rust
/// use knex_sql::prelude::*;
///
/// let params: Vec<Value> = vec![1.into(), "alice".into(), true.into(), Value::Null];
/// assert_eq!(params[1], Value::Text("alice".into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    /// `DATETIME`/`TIMESTAMP` without a zone
    Timestamp(NaiveDateTime),
    Null,
    /// bound as its serialized text
    JSON(JsonValue),
    /// raw bytes; see [`Value::normalize_bytes`]
    Blob(Vec<u8>),
}

impl Value {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// `Bool`, or the `0`/`1` integers SQLite and `MySQL` `TINYINT(1)` columns come back as.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(0) => Some(false),
            Value::Int(1) => Some(true),
            _ => None,
        }
    }

    /// `Timestamp`, or text in `YYYY-MM-DD HH:MM:SS[.f]` form.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(dt) => Some(*dt),
            // MySQL DATETIME and SQLite CURRENT_TIMESTAMP text
            Value::Text(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Turn a `Blob` holding valid UTF-8 into `Text`.
    ///
    /// MySQL hands `VARCHAR`/`TEXT` columns back as raw bytes over the binary protocol, so
    /// every scanned row goes through this before it reaches the caller. Bytes that are not
    /// UTF-8 stay a `Blob`.
    #[must_use]
    pub fn normalize_bytes(self) -> Value {
        match self {
            Value::Blob(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Value::Text(text),
                Err(err) => Value::Blob(err.into_bytes()),
            },
            other => other,
        }
    }

    /// Render this value as JSON.
    ///
    /// Timestamps become `"YYYY-MM-DD HH:MM:SS[.f]"` strings, blobs become byte arrays and
    /// non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(JsonValue::Null, JsonValue::Number),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Timestamp(dt) => JsonValue::String(dt.format("%F %T%.f").to_string()),
            Value::Null => JsonValue::Null,
            Value::JSON(json) => json.clone(),
            Value::Blob(bytes) => JsonValue::from(bytes.clone()),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Value::JSON(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// Unsigned ids and counts above `i64::MAX` have no lossless `Int`, so these are fallible:
// `Value::try_from(id)?`.
macro_rules! value_try_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Value {
                type Error = KnexError;

                fn try_from(v: $t) -> Result<Self, Self::Error> {
                    i64::try_from(v).map(Value::Int).map_err(|_| {
                        KnexError::ParameterError(format!("{v} does not fit in a signed 64-bit integer"))
                    })
                }
            }
        )*
    };
}

value_try_from_unsigned!(u64, usize);

/// The database backends this crate can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DatabaseType {
    /// `MySQL` (or any wire-compatible server such as `MariaDB`)
    #[cfg(feature = "mysql")]
    MySql,
    /// `SQLite` database
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Convert a slice of `Value`s into a backend's own parameter container.
pub trait ParamConverter: Sized {
    /// Convert every parameter, in order.
    ///
    /// # Errors
    ///
    /// Returns `KnexError::ParameterError` if a value cannot be represented by the backend.
    fn convert_sql_params(params: &[Value]) -> Result<Self, KnexError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn utf8_blob_becomes_text() {
        let v = Value::Blob(b"alice".to_vec()).normalize_bytes();
        assert_eq!(v, Value::Text("alice".into()));
    }

    #[test]
    fn binary_blob_is_left_alone() {
        let raw = vec![0xff, 0xfe, 0x00];
        let v = Value::Blob(raw.clone()).normalize_bytes();
        assert_eq!(v, Value::Blob(raw));
    }

    #[test]
    fn non_blob_values_pass_through() {
        for v in [
            Value::Int(7),
            Value::Float(1.5),
            Value::Null,
            Value::Bool(false),
            Value::Text("x".into()),
        ] {
            assert_eq!(v.clone().normalize_bytes(), v);
        }
    }

    #[test]
    fn conversions_from_rust_types() {
        assert_eq!(Value::from(18), Value::Int(18));
        assert_eq!(Value::from(2u8), Value::Int(2));
        assert_eq!(Value::from("bob"), Value::Text("bob".into()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3.5)), Value::Float(3.5));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Blob(vec![1, 2]));
    }

    #[test]
    fn as_bool_accepts_sqlite_integers() {
        assert_eq!(Value::Int(1).as_bool(), Some(true));
        assert_eq!(Value::Int(0).as_bool(), Some(false));
        assert_eq!(Value::Int(2).as_bool(), None);
        assert_eq!(Value::Text("true".into()).as_bool(), None);
    }

    #[test]
    fn unsigned_ids_convert_when_they_fit() {
        assert_eq!(Value::try_from(42_u64).unwrap(), Value::Int(42));
        assert_eq!(Value::try_from(7_usize).unwrap(), Value::Int(7));
        assert_eq!(
            Value::try_from(i64::MAX as u64).unwrap(),
            Value::Int(i64::MAX)
        );

        let err = Value::try_from(u64::MAX).unwrap_err();
        assert!(matches!(err, KnexError::ParameterError(_)), "got {err:?}");
    }

    #[test]
    fn as_timestamp_parses_fractional_text() {
        let v = Value::Text("2024-01-01 08:00:01.250".into());
        assert_eq!(
            v.as_timestamp().map(|t| t.to_string()),
            Some("2024-01-01 08:00:01.250".to_string())
        );
        assert_eq!(Value::Text("yesterday".into()).as_timestamp(), None);
    }

    #[test]
    fn as_timestamp_parses_text() {
        let v = Value::Text("2024-01-01 08:00:01".into());
        let expected =
            NaiveDateTime::parse_from_str("2024-01-01 08:00:01", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(v.as_timestamp(), Some(expected));
    }

    #[test]
    fn json_rendering() {
        assert_eq!(Value::Int(3).to_json(), json!(3));
        assert_eq!(Value::Float(f64::NAN).to_json(), json!(null));
        assert_eq!(Value::Blob(vec![1, 2]).to_json(), json!([1, 2]));
        assert_eq!(Value::JSON(json!({"a": 1})).to_json(), json!({"a": 1}));
    }
}
