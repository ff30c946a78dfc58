// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Expected values supplied by test authors
//!
//! The wire side of a comparison is a plain `serde_json::Value`. The expected
//! side is richer: it keeps the distinctions a test author makes (a 32-bit
//! integer versus a 64-bit one, an exact decimal, a UUID) because the equality
//! rules depend on them.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::fmt;
use std::net::IpAddr;
use uuid::Uuid;

use crate::types::coercion::{encode_hex_blob, parse_decimal};

/// Strongly or ambiguously typed expected value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    /// Native 32-bit integer
    Int(i32),
    /// Native 64-bit integer
    Long(i64),
    /// Arbitrary-width integer
    BigInteger(i128),
    Double(f64),
    BigDecimal(BigDecimal),
    Text(String),
    Blob(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Inet(IpAddr),
    List(Vec<Value>),
    /// Unordered and deduplicated; build with [`Value::set`]
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Build a set, dropping duplicate elements
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(dedup_values(items))
    }

    /// Build a map; a repeated key keeps its last value
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut unique: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match unique.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => unique.push((key, value)),
            }
        }
        Value::Map(unique)
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn blob(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Blob(bytes.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Human-readable kind, used in log lines
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::BigInteger(_) => "big integer",
            Value::Double(_) => "double",
            Value::BigDecimal(_) => "big decimal",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
            Value::Timestamp(_) => "timestamp",
            Value::Uuid(_) => "uuid",
            Value::Inet(_) => "inet",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    /// Convert an author-supplied JSON value, as found in prime requests
    ///
    /// Integers that fit 64 bits become `Long`, other numbers `BigDecimal`
    /// (or `Double` when not representable), objects become maps keyed by text.
    pub fn from_json(json: &JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Long(i)
                } else if let Some(u) = n.as_u64() {
                    Value::BigInteger(i128::from(u))
                } else {
                    match parse_decimal(&n.to_string()) {
                        Some(d) => Value::BigDecimal(d),
                        None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
                    }
                }
            }
            JsonValue::String(s) => Value::Text(s.clone()),
            JsonValue::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            JsonValue::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (Value::Text(k.clone()), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(i) => write!(f, "{}", i),
            Value::BigInteger(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::BigDecimal(d) => write!(f, "{}", d),
            Value::Text(s) => f.write_str(s),
            Value::Blob(bytes) => f.write_str(&encode_hex_blob(bytes)),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::Uuid(u) => write!(f, "{}", u),
            Value::Inet(addr) => write!(f, "{}", addr),
            Value::List(items) => write_joined(f, "[", items.iter(), "]"),
            Value::Set(items) => write_joined(f, "{", items.iter(), "}"),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Keep the first occurrence of each value, preserving order
pub(crate) fn dedup_values(items: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut unique: Vec<Value> = Vec::new();
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Long(i)
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Value::BigInteger(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<BigDecimal> for Value {
    fn from(d: BigDecimal) -> Self {
        Value::BigDecimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<IpAddr> for Value {
    fn from(addr: IpAddr) -> Self {
        Value::Inet(addr)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
