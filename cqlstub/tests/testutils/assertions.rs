//! Equality assertions keyed by type signature

use cqlstub::{parse_type, CqlType, EqualityEngine, TypeMismatch, Value};
use serde_json::Value as JsonValue;

pub fn ty(signature: &str) -> CqlType {
    parse_type(signature).unwrap_or_else(|e| panic!("bad signature {}: {}", signature, e))
}

/// Assert `expected` equals `actual` under `signature`
pub fn assert_equal(signature: &str, expected: impl Into<Value>, actual: JsonValue) {
    let expected = expected.into();
    let result = ty(signature).equals(&expected, &actual);
    assert_eq!(
        result,
        Ok(true),
        "expected {} to equal {} as {}",
        expected,
        actual,
        signature
    );
}

/// Assert `expected` and `actual` differ under `signature`
pub fn assert_not_equal(signature: &str, expected: impl Into<Value>, actual: JsonValue) {
    let expected = expected.into();
    let result = ty(signature).equals(&expected, &actual);
    assert_eq!(
        result,
        Ok(false),
        "expected {} to differ from {} as {}",
        expected,
        actual,
        signature
    );
}

/// Assert the comparison raises a type mismatch and return it
pub fn assert_type_mismatch(
    signature: &str,
    expected: impl Into<Value>,
    actual: JsonValue,
) -> TypeMismatch {
    let expected = expected.into();
    match ty(signature).equals(&expected, &actual) {
        Err(mismatch) => mismatch,
        Ok(matched) => panic!(
            "expected a type mismatch for {} against {} as {}, got {}",
            expected, actual, signature, matched
        ),
    }
}

/// Compare with an explicit engine
pub fn equals_with(
    engine: &EqualityEngine,
    signature: &str,
    expected: impl Into<Value>,
    actual: JsonValue,
) -> Result<bool, TypeMismatch> {
    engine.equals(&ty(signature), &expected.into(), &actual)
}
