//! Dynamic row marshalling. Column types belong to the external schema, so rows
//! are decoded by trying the MySQL-compatible Rust types in turn.

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::Serialize;
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use sqlx::{Column, Row, TypeInfo};

/// Result set that keeps the server's column order (JSON objects do not).
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn from_rows(rows: &[MySqlRow]) -> Self {
        let columns = rows
            .first()
            .map(|r| r.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = rows
            .iter()
            .map(|r| (0..r.columns().len()).map(|i| cell_to_value(r, i)).collect())
            .collect();
        ResultTable { columns, rows }
    }
}

pub fn row_to_json(row: &MySqlRow) -> Value {
    let mut map = serde_json::Map::new();
    for (i, col) in row.columns().iter().enumerate() {
        map.insert(col.name().to_string(), cell_to_value(row, i));
    }
    Value::Object(map)
}

pub fn rows_to_json(rows: &[MySqlRow]) -> Vec<Value> {
    rows.iter().map(row_to_json).collect()
}

pub(crate) fn cell_to_value(row: &MySqlRow, idx: usize) -> Value {
    // NaiveDateTime also decodes TIMESTAMP, so route it to the UTC decode first.
    let is_timestamp = row
        .columns()
        .get(idx)
        .is_some_and(|c| c.type_info().name() == "TIMESTAMP");
    if is_timestamp {
        if let Ok(Some(d)) = row.try_get::<Option<DateTime<Utc>>, _>(idx) {
            return Value::String(timestamp_text(&d));
        }
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(idx) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<u64>, _>(idx) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(idx) {
        return float_value(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(idx) {
        return float_value(n as f64);
    }
    if let Ok(Some(d)) = row.try_get::<Option<BigDecimal>, _>(idx) {
        return decimal_value(&d);
    }
    if let Ok(Some(d)) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
        return Value::String(datetime_text(&d));
    }
    if let Ok(Some(d)) = row.try_get::<Option<NaiveDate>, _>(idx) {
        return Value::String(date_text(&d));
    }
    if let Ok(Some(t)) = row.try_get::<Option<NaiveTime>, _>(idx) {
        return Value::String(t.format("%H:%M:%S").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(idx) {
        return Value::String(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(idx) {
        return j;
    }
    if let Ok(Some(b)) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return Value::String(String::from_utf8_lossy(&b).into_owned());
    }
    Value::Null
}

/// DATE as `YYYY-MM-DD`.
pub fn date_text(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// DATETIME as `YYYY-MM-DDTHH:MM:SS`, with fractional seconds only when present.
pub fn datetime_text(d: &NaiveDateTime) -> String {
    d.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// TIMESTAMP as RFC 3339 in UTC.
pub fn timestamp_text(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn float_value(n: f64) -> Value {
    serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// DECIMAL columns become JSON numbers; whole values stay integers.
pub fn decimal_value(d: &BigDecimal) -> Value {
    if d.is_integer() {
        if let Some(i) = d.to_i64() {
            return Value::Number(i.into());
        }
    }
    d.to_f64().map(float_value).unwrap_or_else(|| Value::String(d.to_string()))
}
