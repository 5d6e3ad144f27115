use chrono::{DateTime, Utc};
use core::fmt;
use model::{core::value::Value, records::record::FieldValue};
use mysql_async::{Row as MySqlRow, Value as MySqlValue};
use rust_decimal::Decimal;
use std::{fmt::Formatter, str::FromStr};
use tokio_postgres::{SimpleQueryRow, types::Type};
use tracing::{debug, warn};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const PG_TIMESTAMPTZ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

pub enum DbRow<'a> {
    MySqlRow(&'a MySqlRow),
    /// A text-protocol row plus the column types reported when the same
    /// statement was prepared.
    PostgresRow {
        row: &'a SimpleQueryRow,
        types: &'a [Type],
    },
}

impl DbRow<'_> {
    /// Every column of the row, in the order the driver reports them.
    pub fn to_fields(&self) -> Vec<FieldValue> {
        self.columns()
            .into_iter()
            .enumerate()
            .map(|(idx, name)| FieldValue {
                value: self.get_value(idx, &name),
                name,
            })
            .collect()
    }

    pub fn columns(&self) -> Vec<String> {
        match self {
            DbRow::MySqlRow(row) => row
                .columns_ref()
                .iter()
                .map(|col| col.name_str().into_owned())
                .collect(),
            DbRow::PostgresRow { row, .. } => row
                .columns()
                .iter()
                .map(|col| col.name().to_string())
                .collect(),
        }
    }

    pub fn get_value(&self, idx: usize, name: &str) -> Value {
        match self {
            DbRow::MySqlRow(row) => row.as_ref(idx).map(mysql_value).unwrap_or(Value::Null),
            DbRow::PostgresRow { row, types } => {
                let type_name = types.get(idx).map(Type::name).unwrap_or("text");
                match row.try_get(idx) {
                    Ok(text) => pg_text_value(type_name, text),
                    Err(err) => {
                        warn!(column = name, %err, "Column could not be read, reading as empty");
                        Value::Null
                    }
                }
            }
        }
    }
}

fn mysql_value(value: &MySqlValue) -> Value {
    match value {
        MySqlValue::NULL => Value::Null,
        MySqlValue::Bytes(bytes) => Value::Bytes(bytes.clone()),
        MySqlValue::Int(v) => Value::Int(*v),
        MySqlValue::UInt(v) => Value::Uint(*v),
        MySqlValue::Float(v) => Value::Float(*v as f64),
        MySqlValue::Double(v) => Value::Float(*v),
        MySqlValue::Date(year, month, day, hour, minute, second, micros) => {
            let mut text = format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            );
            if *micros > 0 {
                text.push_str(&format!(".{micros:06}"));
            }
            Value::String(text)
        }
        MySqlValue::Time(negative, days, hours, minutes, seconds, micros) => {
            let hours = u64::from(*days) * 24 + u64::from(*hours);
            let sign = if *negative { "-" } else { "" };
            let mut text = format!("{sign}{hours:02}:{minutes:02}:{seconds:02}");
            if *micros > 0 {
                text.push_str(&format!(".{micros:06}"));
            }
            Value::String(text)
        }
    }
}

/// Converts one text-protocol Postgres value. Scalars with an exact Rust
/// counterpart are parsed into it; everything else (enums, intervals, network
/// types, arrays, ranges, domains) keeps the server's own text form.
pub(crate) fn pg_text_value(type_name: &str, text: Option<&str>) -> Value {
    let Some(text) = text else {
        return Value::Null;
    };

    let parsed = match type_name {
        "bool" => match text {
            "t" => Some(Value::Boolean(true)),
            "f" => Some(Value::Boolean(false)),
            _ => None,
        },
        "int2" | "int4" | "int8" => text.parse::<i64>().ok().map(Value::Int),
        "oid" => text.parse::<u64>().ok().map(Value::Uint),
        "float4" | "float8" => text.parse::<f64>().ok().map(Value::Float),
        "numeric" => Decimal::from_str(text)
            .ok()
            .map(|d| Value::String(d.normalize().to_string())),
        "bytea" => decode_bytea(text).map(Value::Bytes),
        "timestamptz" => DateTime::parse_from_str(text, PG_TIMESTAMPTZ_FORMAT)
            .ok()
            .map(|ts| {
                let utc = ts.with_timezone(&Utc);
                Value::String(format!("{}+00:00", utc.format(TIMESTAMP_FORMAT)))
            }),
        _ => return Value::String(text.to_string()),
    };

    parsed.unwrap_or_else(|| {
        debug!(pg_type = type_name, value = text, "Keeping server text");
        Value::String(text.to_string())
    })
}

/// Decodes the `\x`-prefixed hex output form of `bytea`.
fn decode_bytea(text: &str) -> Option<Vec<u8>> {
    let hex = text.strip_prefix("\\x")?;
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect()
}

impl fmt::Debug for DbRow<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DbRow::MySqlRow(row) => write!(f, "{row:?}"),
            DbRow::PostgresRow { types, .. } => write!(f, "PostgresRow({types:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_scalars() {
        assert_eq!(mysql_value(&MySqlValue::NULL), Value::Null);
        assert_eq!(mysql_value(&MySqlValue::Int(-3)), Value::Int(-3));
        assert_eq!(mysql_value(&MySqlValue::UInt(3)), Value::Uint(3));
        assert_eq!(mysql_value(&MySqlValue::Double(1.5)), Value::Float(1.5));
        assert_eq!(
            mysql_value(&MySqlValue::Bytes(b"abc".to_vec())),
            Value::Bytes(b"abc".to_vec())
        );
    }

    #[test]
    fn test_mysql_temporal_as_text() {
        assert_eq!(
            mysql_value(&MySqlValue::Date(2024, 1, 2, 3, 4, 5, 0)),
            Value::String("2024-01-02 03:04:05".into())
        );
        assert_eq!(
            mysql_value(&MySqlValue::Date(2024, 1, 2, 3, 4, 5, 120)),
            Value::String("2024-01-02 03:04:05.000120".into())
        );
        assert_eq!(
            mysql_value(&MySqlValue::Time(true, 1, 2, 3, 4, 0)),
            Value::String("-26:03:04".into())
        );
    }

    #[test]
    fn test_pg_builtin_scalars() {
        assert_eq!(pg_text_value("bool", Some("t")), Value::Boolean(true));
        assert_eq!(pg_text_value("int8", Some("-42")), Value::Int(-42));
        assert_eq!(pg_text_value("float8", Some("1.5")), Value::Float(1.5));
        assert_eq!(pg_text_value("numeric", Some("12.500")), Value::String("12.5".into()));
        assert_eq!(pg_text_value("bytea", Some("\\x6869")), Value::Bytes(b"hi".to_vec()));
        assert_eq!(pg_text_value("int4", None), Value::Null);
    }

    #[test]
    fn test_pg_timestamptz_is_shifted_to_utc() {
        assert_eq!(
            pg_text_value("timestamptz", Some("2024-01-02 03:04:05+02")),
            Value::String("2024-01-02 01:04:05+00:00".into())
        );
        assert_eq!(
            pg_text_value("timestamp", Some("2024-01-02 03:04:05.25")),
            Value::String("2024-01-02 03:04:05.25".into())
        );
    }

    #[test]
    fn test_pg_other_types_keep_server_text() {
        assert_eq!(pg_text_value("mood", Some("happy")), Value::String("happy".into()));
        assert_eq!(
            pg_text_value("interval", Some("1 day 02:00:00")),
            Value::String("1 day 02:00:00".into())
        );
        assert_eq!(
            pg_text_value("inet", Some("10.0.0.1")),
            Value::String("10.0.0.1".into())
        );
        assert_eq!(pg_text_value("_int4", Some("{1,2}")), Value::String("{1,2}".into()));
    }

    #[test]
    fn test_pg_numeric_beyond_decimal_range_keeps_text() {
        let huge = "123456789012345678901234567890123456789.5";
        assert_eq!(pg_text_value("numeric", Some(huge)), Value::String(huge.into()));
        assert_eq!(pg_text_value("numeric", Some("NaN")), Value::String("NaN".into()));
    }
}
