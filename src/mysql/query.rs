use std::sync::Arc;

use chrono::NaiveDate;
use mysql_async::{Row, Value as MySqlValue};

use crate::results::ResultSet;
use crate::types::Value;

fn date_to_value(y: u16, mo: u8, d: u8, h: u8, mi: u8, s: u8, us: u32) -> Value {
    NaiveDate::from_ymd_opt(i32::from(y), u32::from(mo), u32::from(d))
        .and_then(|date| {
            date.and_hms_micro_opt(u32::from(h), u32::from(mi), u32::from(s), us)
        })
        .map_or_else(
            // zero dates ('0000-00-00') have no chrono representation
            || Value::Text(format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}")),
            Value::Timestamp,
        )
}

fn time_to_value(negative: bool, days: u32, h: u8, mi: u8, s: u8, us: u32) -> Value {
    let hours = days * 24 + u32::from(h);
    let sign = if negative { "-" } else { "" };
    if us == 0 {
        Value::Text(format!("{sign}{hours:02}:{mi:02}:{s:02}"))
    } else {
        Value::Text(format!("{sign}{hours:02}:{mi:02}:{s:02}.{us:06}"))
    }
}

/// Convert a `mysql_async` value into a `Value`.
///
/// Byte strings stay `Blob` here; text normalization happens when rows are handed to the caller.
#[must_use]
pub fn mysql_extract_value(value: &MySqlValue) -> Value {
    match value {
        MySqlValue::NULL => Value::Null,
        MySqlValue::Bytes(bytes) => Value::Blob(bytes.clone()),
        MySqlValue::Int(i) => Value::Int(*i),
        MySqlValue::UInt(u) => {
            i64::try_from(*u).map_or_else(|_| Value::Text(u.to_string()), Value::Int)
        }
        MySqlValue::Float(f) => Value::Float(f64::from(*f)),
        MySqlValue::Double(f) => Value::Float(*f),
        MySqlValue::Date(y, mo, d, h, mi, s, us) => date_to_value(*y, *mo, *d, *h, *mi, *s, *us),
        MySqlValue::Time(neg, days, h, mi, s, us) => time_to_value(*neg, *days, *h, *mi, *s, *us),
    }
}

/// Build a result set from rows returned by the driver.
///
/// Column names come from the first row; an empty result has none.
#[must_use]
pub fn build_result_set(rows: Vec<Row>) -> ResultSet {
    let column_names = rows.first().map(|first| {
        first
            .columns_ref()
            .iter()
            .map(|col| col.name_str().into_owned())
            .collect()
    });
    let cells = rows
        .iter()
        .map(|row| (0..row.len()).map(|i| row.as_ref(i)).collect::<Vec<_>>());
    collect_rows(column_names, cells)
}

/// A cell the driver did not hand back (`None`) reads as `Null`.
fn collect_rows<'a, I>(column_names: Option<Vec<String>>, rows: I) -> ResultSet
where
    I: Iterator<Item = Vec<Option<&'a MySqlValue>>>,
{
    let mut result_set = ResultSet::with_capacity(rows.size_hint().0);
    if let Some(names) = column_names {
        result_set.set_column_names(Arc::new(names));
    }
    for cells in rows {
        let values = cells
            .into_iter()
            .map(|cell| cell.map_or(Value::Null, mysql_extract_value))
            .collect();
        result_set.add_row_values(values);
    }
    result_set
}
