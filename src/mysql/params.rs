use chrono::{Datelike, NaiveDateTime, Timelike};
use mysql_async::Value as MySqlValue;

use crate::error::KnexError;
use crate::types::{ParamConverter, Value};

// chrono keeps month/day/hour/minute/second in range for u8
#[allow(clippy::cast_possible_truncation)]
fn timestamp_to_mysql(dt: &NaiveDateTime) -> Result<MySqlValue, KnexError> {
    let year = u16::try_from(dt.year()).map_err(|_| {
        KnexError::ParameterError(format!("timestamp year out of range for MySQL: {dt}"))
    })?;
    Ok(MySqlValue::Date(
        year,
        dt.month() as u8,
        dt.day() as u8,
        dt.hour() as u8,
        dt.minute() as u8,
        dt.second() as u8,
        dt.nanosecond() / 1_000,
    ))
}

/// Convert a single `Value` to a `mysql_async` value.
///
/// # Errors
/// Returns `KnexError::ParameterError` for timestamps MySQL cannot store (negative years).
pub fn value_to_mysql(value: &Value) -> Result<MySqlValue, KnexError> {
    Ok(match value {
        Value::Int(i) => MySqlValue::Int(*i),
        Value::Float(f) => MySqlValue::Double(*f),
        Value::Text(s) => MySqlValue::Bytes(s.as_bytes().to_vec()),
        Value::Bool(b) => MySqlValue::Int(i64::from(*b)),
        Value::Timestamp(dt) => timestamp_to_mysql(dt)?,
        Value::Null => MySqlValue::NULL,
        Value::JSON(json) => MySqlValue::Bytes(json.to_string().into_bytes()),
        Value::Blob(bytes) => MySqlValue::Bytes(bytes.clone()),
    })
}

/// Positional `MySQL` parameter container.
pub struct Params(pub Vec<MySqlValue>);

impl Params {
    /// Hand the values to the driver; no values means `Params::Empty`.
    #[must_use]
    pub fn into_driver(self) -> mysql_async::Params {
        if self.0.is_empty() {
            mysql_async::Params::Empty
        } else {
            mysql_async::Params::Positional(self.0)
        }
    }
}

impl ParamConverter for Params {
    fn convert_sql_params(params: &[Value]) -> Result<Self, KnexError> {
        params
            .iter()
            .map(value_to_mysql)
            .collect::<Result<Vec<_>, _>>()
            .map(Params)
    }
}
