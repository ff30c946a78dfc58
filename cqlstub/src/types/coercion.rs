// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Coercion of loosely-typed values into typed scalars
//!
//! Values decoded from the wire arrive as JSON numbers and strings whatever
//! their declared CQL type. These helpers read them back as the scalar the
//! declared type implies, returning `None` when the loose value has no sensible
//! reading. They never fail with an error: a wire value that cannot be read is
//! simply not equal to anything.

use bigdecimal::BigDecimal;
use serde_json::Value as JsonValue;
use std::net::IpAddr;
use std::num::IntErrorKind;
use std::str::FromStr;
use uuid::Uuid;

/// Outcome of reading an author-supplied integer literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerLiteral {
    Value(i128),
    /// Well-formed digits, but too large for any 64-bit wire value
    OutOfRange,
}

/// Read a loose value as a 64-bit integer
///
/// Fractional numbers truncate toward zero; strings must be base-10 integers.
pub fn loose_to_i64(actual: &JsonValue) -> Option<i64> {
    match actual {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).ok()
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
            }
        }
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Exponents beyond this make comparisons rescale into enormous integers
const MAX_DECIMAL_SCALE: i64 = 4096;

/// Read a loose value as an exact decimal
pub fn loose_to_decimal(actual: &JsonValue) -> Option<BigDecimal> {
    match actual {
        JsonValue::Number(n) => parse_decimal(&n.to_string()),
        JsonValue::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Parse plain or scientific decimal notation at any precision
pub fn parse_decimal(text: &str) -> Option<BigDecimal> {
    let decimal = BigDecimal::from_str(text.trim()).ok()?;
    let (_, scale) = decimal.as_bigint_and_exponent();
    (scale.abs() <= MAX_DECIMAL_SCALE).then_some(decimal)
}

/// Parse an integer literal, distinguishing garbage from overflow
pub fn parse_integer(text: &str) -> Option<IntegerLiteral> {
    match text.trim().parse::<i128>() {
        Ok(value) => Some(IntegerLiteral::Value(value)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Some(IntegerLiteral::OutOfRange)
            }
            _ => None,
        },
    }
}

pub fn loose_to_bool(actual: &JsonValue) -> Option<bool> {
    match actual {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => parse_bool(s),
        _ => None,
    }
}

pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Read a loose value as blob bytes from its `0x`-prefixed hex form
pub fn loose_to_bytes(actual: &JsonValue) -> Option<Vec<u8>> {
    actual.as_str().and_then(decode_hex_blob)
}

/// Decode `0x0102ff` into bytes
pub fn decode_hex_blob(text: &str) -> Option<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))?;
    hex::decode(digits).ok()
}

/// Lowercase `0x` hex form of a blob
pub fn encode_hex_blob(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn loose_to_uuid(actual: &JsonValue) -> Option<Uuid> {
    actual.as_str().and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Read a loose value as an address, accepting the `/1.2.3.4` form some clients print
pub fn loose_to_inet(actual: &JsonValue) -> Option<IpAddr> {
    actual.as_str().and_then(parse_inet)
}

pub fn parse_inet(text: &str) -> Option<IpAddr> {
    let text = text.trim();
    let address = match text.rsplit_once('/') {
        Some((_, address)) => address,
        None => text,
    };
    address.parse().ok()
}

/// Short representation of a loose value for error messages
pub fn describe_loose(actual: &JsonValue) -> String {
    match actual {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
