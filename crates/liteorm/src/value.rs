//! Scalar values and the SQL literal codec.
//!
//! [`Value`] is the tagged value model used on both sides of the engine:
//! builders encode values into literal text on the way in, and the result
//! mapper decodes raw driver cells back into typed values on the way out.
//! A value may also be a column reference ([`Value::Column`]), which renders
//! as a quoted identifier instead of a literal — used when one column must be
//! compared against another column rather than a constant.
//!
//! Storage conventions (SQLite dialect):
//! - `BOOLEAN` is stored as `0`/`1`
//! - `DATETIME` is stored as epoch seconds; encoding wraps the wall-clock
//!   text in `strftime('%s', ...)`, decoding parses `YYYY-MM-DD HH:MM:SS`
//! - `MONEY` is stored as integer cents

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LiteError, LiteResult};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column type as declared in a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Text,
    Boolean,
    Decimal,
    DateTime,
    Money,
}

/// A typed scalar value, or a reference to another column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    /// Wall-clock date and time, second precision, no timezone.
    DateTime(NaiveDateTime),
    /// Currency amount; persisted as integer cents.
    Money(Decimal),
    /// Reference to a column, rendered as a quoted identifier.
    Column {
        alias: Option<String>,
        column: String,
    },
}

impl Value {
    /// Reference a column on an aliased table: renders `"alias"."column"`.
    pub fn column(alias: impl Into<String>, column: impl Into<String>) -> Self {
        Value::Column {
            alias: Some(alias.into()),
            column: column.into(),
        }
    }

    /// Reference a column on the current table: renders `"column"`.
    pub fn field(column: impl Into<String>) -> Self {
        Value::Column {
            alias: None,
            column: column.into(),
        }
    }

    /// Create a money value from a decimal amount.
    pub fn money(amount: Decimal) -> Self {
        Value::Money(amount)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Money(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Real(f) => serde_json::Value::from(*f),
            Value::Text(s) => serde_json::Value::from(s.as_str()),
            Value::Bool(b) => serde_json::Value::from(*b),
            Value::DateTime(dt) => {
                serde_json::Value::from(dt.format(DATETIME_FORMAT).to_string())
            }
            Value::Money(d) => serde_json::Value::from(d.to_string()),
            Value::Column { alias, column } => {
                serde_json::Value::from(qualify(alias.as_deref(), column))
            }
        }
    }
}

/// Quote a SQL identifier, doubling any embedded quote.
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Render an optionally alias-qualified column reference.
pub(crate) fn qualify(alias: Option<&str>, column: &str) -> String {
    match alias {
        Some(alias) => format!("{}.{}", quote_ident(alias), quote_ident(column)),
        None => quote_ident(column),
    }
}

/// Escape a string for use inside a single-quoted SQL literal.
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('\'', "''")
}

pub(crate) fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok()
}

/// Encode a typed value as SQL literal text for the given column type.
///
/// Column references bypass all type-specific encoding and render as quoted
/// identifiers. `column` is only used for error reporting.
pub fn encode(ty: SqlType, column: &str, value: &Value) -> LiteResult<String> {
    if let Value::Column { alias, column } = value {
        return Ok(qualify(alias.as_deref(), column));
    }
    if value.is_null() {
        return Ok("null".to_string());
    }

    match ty {
        SqlType::DateTime => encode_datetime(column, value),
        SqlType::Money => encode_money(column, value),
        _ => Ok(match value {
            Value::Integer(i) => i.to_string(),
            Value::Real(f) => f.to_string(),
            Value::Text(s) => format!("'{}'", escape_text(s)),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
            Value::DateTime(dt) => format!("'{}'", format_datetime(dt)),
            Value::Money(d) => d.to_string(),
            // handled above
            Value::Null | Value::Column { .. } => "null".to_string(),
        }),
    }
}

fn encode_datetime(column: &str, value: &Value) -> LiteResult<String> {
    match value {
        Value::DateTime(dt) => Ok(format!("strftime('%s', '{}')", format_datetime(dt))),
        // already epoch seconds
        Value::Integer(secs) => Ok(secs.to_string()),
        other => Err(LiteError::encode(
            column,
            format!("expected datetime value, got {other:?}"),
        )),
    }
}

fn encode_money(column: &str, value: &Value) -> LiteResult<String> {
    let cents = match value {
        Value::Money(d) => (d * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64(),
        Value::Integer(i) => i.checked_mul(100),
        Value::Real(f) => Some((f * 100.0).round() as i64),
        other => {
            return Err(LiteError::encode(
                column,
                format!("expected money value, got {other:?}"),
            ));
        }
    };
    cents
        .map(|c| c.to_string())
        .ok_or_else(|| LiteError::encode(column, "money amount out of range"))
}

/// Decode a raw driver cell into a typed value for the given column type.
///
/// `Null` passes through for every type. Types without a storage conversion
/// (INTEGER, TEXT, DECIMAL) leave the raw value untouched.
pub fn decode(ty: SqlType, column: &str, raw: Value) -> LiteResult<Value> {
    if raw.is_null() {
        return Ok(Value::Null);
    }

    match ty {
        SqlType::Boolean => Ok(Value::Bool(!matches!(
            raw,
            Value::Integer(0) | Value::Bool(false)
        ))),
        SqlType::DateTime => match raw {
            Value::Text(s) => parse_datetime(&s).map(Value::DateTime).ok_or_else(|| {
                LiteError::decode(column, format!("cannot parse datetime from '{s}'"))
            }),
            Value::Integer(secs) => chrono::DateTime::from_timestamp(secs, 0)
                .map(|dt| Value::DateTime(dt.naive_utc()))
                .ok_or_else(|| {
                    LiteError::decode(column, format!("epoch seconds out of range: {secs}"))
                }),
            Value::DateTime(dt) => Ok(Value::DateTime(dt)),
            other => Err(LiteError::decode(
                column,
                format!("expected datetime cell, got {other:?}"),
            )),
        },
        SqlType::Money => match raw {
            Value::Integer(cents) => Ok(Value::Money(Decimal::new(cents, 2))),
            Value::Real(f) => Decimal::from_f64_retain(f)
                .map(|d| Value::Money(d / Decimal::ONE_HUNDRED))
                .ok_or_else(|| {
                    LiteError::decode(column, format!("cannot decode money from {f}"))
                }),
            Value::Money(d) => Ok(Value::Money(d)),
            other => Err(LiteError::decode(
                column,
                format!("expected money cell, got {other:?}"),
            )),
        },
        SqlType::Integer | SqlType::Text | SqlType::Decimal => Ok(raw),
    }
}

/// Encode a raw driver cell for bulk/backup output.
///
/// Numeric-affinity types (INTEGER, BOOLEAN, DECIMAL, DATETIME, MONEY) render
/// bare; everything else renders as an escaped quoted string.
pub fn encode_raw(ty: SqlType, value: &Value) -> String {
    if value.is_null() {
        return "NULL".to_string();
    }

    let numeric = matches!(
        ty,
        SqlType::Integer | SqlType::Boolean | SqlType::Decimal | SqlType::DateTime | SqlType::Money
    );
    match value {
        Value::Integer(i) if numeric => i.to_string(),
        Value::Real(f) if numeric => f.to_string(),
        Value::Bool(b) if numeric => (if *b { "1" } else { "0" }).to_string(),
        Value::Money(d) if numeric => (d * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        Value::DateTime(dt) if numeric => dt.and_utc().timestamp().to_string(),
        Value::Integer(i) => format!("'{i}'"),
        Value::Real(f) => format!("'{f}'"),
        Value::Bool(b) => format!("'{}'", if *b { "1" } else { "0" }),
        Value::Text(s) => format!("'{}'", escape_text(s)),
        Value::DateTime(dt) => format!("'{}'", format_datetime(dt)),
        Value::Money(d) => format!("'{d}'"),
        Value::Column { alias, column } => qualify(alias.as_deref(), column),
        Value::Null => "NULL".to_string(),
    }
}
