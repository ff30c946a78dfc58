// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Type-aware equality between expected and wire values
//!
//! `equals(type, expected, actual)` answers three ways:
//! - `Ok(true)` when the values are equal under the declared type
//! - `Ok(false)` when they differ
//! - `Err(TypeMismatch)` when the expected value is a shape the declared type
//!   cannot interpret, so a wrongly-typed test is never mistaken for a
//!   non-matching one
//!
//! Null handling is uniform: a null expected value matches only a null actual
//! value, and a null actual never matches a non-null expected value. The
//! `decimal`, `float` and `double` types are the exception and reject a null
//! expected value outright.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{MatchResult, TypeMismatch};
use crate::types::coercion::{
    decode_hex_blob, describe_loose, loose_to_bool, loose_to_bytes, loose_to_decimal,
    loose_to_i64, loose_to_inet, loose_to_uuid, parse_bool, parse_decimal, parse_inet,
    parse_integer, IntegerLiteral,
};
use crate::types::{CqlType, PrimitiveFamily, PrimitiveType};
use crate::value::{dedup_values, Value};

/// How `set<T>` values are paired up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetMatching {
    /// Every expected element is paired with a distinct actual element
    #[default]
    Bijective,
    /// Every expected element has some equal actual element; sizes must agree
    Existence,
}

/// Equality rules for expected values against loosely-typed wire values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EqualityEngine {
    set_matching: SetMatching,
}

impl EqualityEngine {
    pub fn new(set_matching: SetMatching) -> Self {
        Self { set_matching }
    }

    pub fn set_matching(&self) -> SetMatching {
        self.set_matching
    }

    /// Compare `expected` with `actual` under `ty`
    pub fn equals(&self, ty: &CqlType, expected: &Value, actual: &JsonValue) -> MatchResult<bool> {
        if let CqlType::Primitive(primitive) = ty {
            if primitive.family() == PrimitiveFamily::Decimal && expected.is_null() {
                return Err(mismatch(ty, expected, actual));
            }
        }
        if expected.is_null() {
            return Ok(actual.is_null());
        }
        if actual.is_null() {
            return Ok(false);
        }

        match ty {
            CqlType::Primitive(primitive) => self.primitive_equals(ty, *primitive, expected, actual),
            CqlType::List(element) => self.list_equals(ty, element, expected, actual),
            CqlType::Set(element) => self.set_equals(ty, element, expected, actual),
            CqlType::Map(key, value) => self.map_equals(ty, key, value, expected, actual),
            CqlType::Tuple(elements) => self.tuple_equals(ty, elements, expected, actual),
        }
    }

    fn primitive_equals(
        &self,
        ty: &CqlType,
        primitive: PrimitiveType,
        expected: &Value,
        actual: &JsonValue,
    ) -> MatchResult<bool> {
        let fail = || mismatch(ty, expected, actual);

        match primitive.family() {
            PrimitiveFamily::Textual => match expected {
                Value::Text(text) => Ok(actual.as_str() == Some(text.as_str())),
                _ => Err(fail()),
            },
            PrimitiveFamily::Integral => {
                let wanted = match expected {
                    Value::Int(i) => IntegerLiteral::Value(i128::from(*i)),
                    Value::Long(i) => IntegerLiteral::Value(i128::from(*i)),
                    Value::BigInteger(i) => IntegerLiteral::Value(*i),
                    Value::Text(text) => parse_integer(text).ok_or_else(fail)?,
                    _ => return Err(fail()),
                };
                Ok(integer_matches(wanted, actual))
            }
            PrimitiveFamily::VarInt => {
                // Native machine integers are rejected here, unlike bigint and int
                let wanted = match expected {
                    Value::BigInteger(i) => IntegerLiteral::Value(*i),
                    Value::Text(text) => parse_integer(text).ok_or_else(fail)?,
                    _ => return Err(fail()),
                };
                Ok(integer_matches(wanted, actual))
            }
            PrimitiveFamily::Decimal => {
                let wanted = match expected {
                    Value::BigDecimal(d) => d.clone(),
                    Value::Text(text) => parse_decimal(text).ok_or_else(fail)?,
                    _ => return Err(fail()),
                };
                Ok(loose_to_decimal(actual) == Some(wanted))
            }
            PrimitiveFamily::Boolean => {
                let wanted = match expected {
                    Value::Boolean(b) => *b,
                    Value::Text(text) => parse_bool(text).ok_or_else(fail)?,
                    _ => return Err(fail()),
                };
                Ok(loose_to_bool(actual) == Some(wanted))
            }
            PrimitiveFamily::Blob => {
                let wanted = match expected {
                    Value::Blob(bytes) => bytes.clone(),
                    Value::Text(text) => decode_hex_blob(text).ok_or_else(fail)?,
                    _ => return Err(fail()),
                };
                Ok(loose_to_bytes(actual) == Some(wanted))
            }
            PrimitiveFamily::Uuid => {
                let wanted = match expected {
                    Value::Uuid(u) => *u,
                    Value::Text(text) => uuid::Uuid::parse_str(text.trim()).map_err(|_| fail())?,
                    _ => return Err(fail()),
                };
                Ok(loose_to_uuid(actual) == Some(wanted))
            }
            PrimitiveFamily::Inet => {
                let wanted = match expected {
                    Value::Inet(addr) => *addr,
                    Value::Text(text) => parse_inet(text).ok_or_else(fail)?,
                    _ => return Err(fail()),
                };
                Ok(loose_to_inet(actual) == Some(wanted))
            }
            PrimitiveFamily::Timestamp => {
                let wanted = match expected {
                    Value::Timestamp(ts) => ts.timestamp_millis(),
                    Value::Long(millis) => *millis,
                    _ => return Err(fail()),
                };
                Ok(loose_to_i64(actual) == Some(wanted))
            }
        }
    }

    fn list_equals(
        &self,
        ty: &CqlType,
        element: &CqlType,
        expected: &Value,
        actual: &JsonValue,
    ) -> MatchResult<bool> {
        let expected_items = match expected {
            Value::List(items) => items,
            _ => return Err(mismatch(ty, expected, actual)),
        };
        let actual_items = match actual.as_array() {
            Some(items) => items,
            None => return Ok(false),
        };
        if expected_items.len() != actual_items.len() {
            return Ok(false);
        }
        for (e, a) in expected_items.iter().zip(actual_items) {
            if !self.equals(element, e, a)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn set_equals(
        &self,
        ty: &CqlType,
        element: &CqlType,
        expected: &Value,
        actual: &JsonValue,
    ) -> MatchResult<bool> {
        // Lists are accepted as sets since JSON-sourced expectations have no set form
        let expected_items = match expected {
            Value::Set(items) => items.clone(),
            Value::List(items) => dedup_values(items.iter().cloned()),
            _ => return Err(mismatch(ty, expected, actual)),
        };
        let actual_items = match actual.as_array() {
            Some(items) => items,
            None => return Ok(false),
        };
        if expected_items.len() != actual_items.len() {
            return Ok(false);
        }

        match self.set_matching {
            SetMatching::Existence => {
                for e in &expected_items {
                    let mut found = false;
                    for a in actual_items {
                        if self.equals(element, e, a)? {
                            found = true;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            SetMatching::Bijective => {
                let mut adjacency = Vec::with_capacity(expected_items.len());
                for e in &expected_items {
                    let mut row = Vec::with_capacity(actual_items.len());
                    for a in actual_items {
                        row.push(self.equals(element, e, a)?);
                    }
                    adjacency.push(row);
                }
                Ok(has_perfect_matching(&adjacency))
            }
        }
    }

    fn map_equals(
        &self,
        ty: &CqlType,
        key_type: &CqlType,
        value_type: &CqlType,
        expected: &Value,
        actual: &JsonValue,
    ) -> MatchResult<bool> {
        let expected_entries = match expected {
            Value::Map(entries) => entries,
            _ => return Err(mismatch(ty, expected, actual)),
        };
        let actual_entries = match actual.as_object() {
            Some(entries) => entries,
            None => return Ok(false),
        };
        if expected_entries.len() != actual_entries.len() {
            return Ok(false);
        }
        for (expected_key, expected_value) in expected_entries {
            let mut found = false;
            for (actual_key, actual_value) in actual_entries {
                let actual_key = JsonValue::String(actual_key.clone());
                if self.equals(key_type, expected_key, &actual_key)?
                    && self.equals(value_type, expected_value, actual_value)?
                {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn tuple_equals(
        &self,
        ty: &CqlType,
        elements: &[CqlType],
        expected: &Value,
        actual: &JsonValue,
    ) -> MatchResult<bool> {
        let expected_items = match expected {
            Value::List(items) => items,
            _ => return Err(mismatch(ty, expected, actual)),
        };
        let actual_items = match actual.as_array() {
            Some(items) => items,
            None => return Ok(false),
        };
        // Arity violations are errors for tuples, not plain non-matches
        if expected_items.len() != elements.len() || actual_items.len() != elements.len() {
            return Err(mismatch(ty, expected, actual));
        }
        for ((element, e), a) in elements.iter().zip(expected_items).zip(actual_items) {
            if !self.equals(element, e, a)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl CqlType {
    /// Compare with the default engine (bijective set matching)
    pub fn equals(&self, expected: &Value, actual: &JsonValue) -> MatchResult<bool> {
        EqualityEngine::default().equals(self, expected, actual)
    }
}

/// Compare with the default engine
pub fn equals(ty: &CqlType, expected: &Value, actual: &JsonValue) -> MatchResult<bool> {
    ty.equals(expected, actual)
}

fn mismatch(ty: &CqlType, expected: &Value, actual: &JsonValue) -> TypeMismatch {
    TypeMismatch {
        type_signature: ty.signature(),
        expected_repr: expected.to_string(),
        actual_repr: describe_loose(actual),
    }
}

fn integer_matches(wanted: IntegerLiteral, actual: &JsonValue) -> bool {
    match (wanted, loose_to_i64(actual)) {
        (IntegerLiteral::Value(wanted), Some(actual)) => wanted == i128::from(actual),
        _ => false,
    }
}

/// Kuhn's augmenting-path matching over `adjacency[expected][actual]`
fn has_perfect_matching(adjacency: &[Vec<bool>]) -> bool {
    let width = adjacency.first().map_or(0, Vec::len);
    let mut owner: Vec<Option<usize>> = vec![None; width];
    for expected in 0..adjacency.len() {
        let mut visited = vec![false; width];
        if !augment(expected, adjacency, &mut visited, &mut owner) {
            return false;
        }
    }
    true
}

fn augment(
    expected: usize,
    adjacency: &[Vec<bool>],
    visited: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    for actual in 0..adjacency[expected].len() {
        if !adjacency[expected][actual] || visited[actual] {
            continue;
        }
        visited[actual] = true;
        let free = match owner[actual] {
            None => true,
            Some(other) => augment(other, adjacency, visited, owner),
        };
        if free {
            owner[actual] = Some(expected);
            return true;
        }
    }
    false
}
