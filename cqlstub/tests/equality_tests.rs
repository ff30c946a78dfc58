// Type-aware equality between author-supplied values and wire values
//
// Each case is (signature, expected, actual, outcome). A type mismatch must
// name the declared type's signature in its message.

#[path = "testutils/mod.rs"]
mod testutils;

use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use cqlstub::{EqualityEngine, SetMatching, Value};
use serde_json::{json, Value as JsonValue};
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use testutils::assertions::{assert_equal, assert_not_equal, assert_type_mismatch, equals_with, ty};
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Match,
    NoMatch,
    Mismatch,
}

use Outcome::*;

const TIME_UUID: &str = "59ad61d0-c540-11e2-881e-b9e6057626c4";

fn check(cases: Vec<(&str, Value, JsonValue, Outcome)>) {
    for (signature, expected, actual, outcome) in cases {
        match outcome {
            Match => assert_equal(signature, expected, actual),
            NoMatch => assert_not_equal(signature, expected, actual),
            Mismatch => {
                let err = assert_type_mismatch(signature, expected, actual);
                let canonical = ty(signature).signature();
                assert!(
                    err.to_string().contains(&canonical),
                    "message should name {}: {}",
                    canonical,
                    err
                );
            }
        }
    }
}

#[test]
fn test_textual_types() {
    let mut cases = Vec::new();
    for signature in ["ascii", "text", "varchar"] {
        cases.push((signature, Value::from("one"), json!("one"), Match));
        cases.push((signature, Value::from("one"), json!("two"), NoMatch));
        cases.push((signature, Value::from("one"), JsonValue::Null, NoMatch));
        cases.push((signature, Value::Null, json!("two"), NoMatch));
        cases.push((signature, Value::from("one"), json!(5), NoMatch));
        cases.push((signature, Value::Long(1), json!("1"), Mismatch));
    }
    check(cases);
}

#[test]
fn test_fixed_width_integers() {
    let mut cases = Vec::new();
    for signature in ["bigint", "counter", "int", "smallint", "tinyint", "date", "time"] {
        cases.push((signature, Value::Int(1), json!("1"), Match));
        cases.push((signature, Value::Int(1), json!(1.0), Match));
        cases.push((signature, Value::Long(1), json!(1.0), Match));
        cases.push((signature, Value::from("1"), json!(1.0), Match));
        cases.push((signature, Value::BigInteger(1), json!(1.0), Match));
        cases.push((signature, Value::Int(1), json!(2), NoMatch));
        cases.push((signature, Value::Null, json!(1), NoMatch));
        cases.push((signature, Value::BigInteger(1), JsonValue::Null, NoMatch));
        cases.push((signature, Value::from("hello"), json!(1.0), Mismatch));
        cases.push((signature, Value::Boolean(true), json!(1), Mismatch));
    }
    check(cases);
}

#[test]
fn test_out_of_range_literal_never_matches() {
    assert_not_equal("bigint", "9223372036854775808", json!(i64::MAX));
    assert_not_equal("varint", "123456789012345678901234567890123456789012", json!(1));
}

#[test]
fn test_varint_rejects_native_integers() {
    check(vec![
        ("varint", Value::from("1"), json!("1"), Match),
        ("varint", Value::from("1"), json!(1.0), Match),
        ("varint", Value::BigInteger(1), json!(1.0), Match),
        ("varint", Value::from("1"), JsonValue::Null, NoMatch),
        ("varint", Value::Null, json!(1.0), NoMatch),
        ("varint", Value::Int(1), json!(1.0), Mismatch),
        ("varint", Value::Long(1), json!(1.0), Mismatch),
        ("varint", Value::from("hello"), json!(1.0), Mismatch),
    ]);
}

#[test]
fn test_decimal_family() {
    let mut cases = Vec::new();
    for signature in ["decimal", "float", "double"] {
        cases.push((signature, Value::from("1"), json!("1"), Match));
        cases.push((signature, Value::from("1.0000"), json!("1"), Match));
        cases.push((signature, Value::from(BigDecimal::from_str("1.0000").unwrap()), json!("1"), Match));
        cases.push((signature, Value::from("3.440000"), json!("3.44"), Match));
        cases.push((signature, Value::from("1"), JsonValue::Null, NoMatch));
        cases.push((signature, Value::from("1"), json!("2"), NoMatch));
        cases.push((signature, Value::BigInteger(1), json!("1.234"), Mismatch));
        cases.push((signature, Value::Null, json!("1"), Mismatch));
        cases.push((signature, Value::Int(1), json!("1"), Mismatch));
        cases.push((signature, Value::Long(1), json!(1), Mismatch));
        cases.push((signature, Value::from("hello"), json!(1), Mismatch));
    }
    check(cases);
}

#[test]
fn test_decimal_family_beyond_fixed_precision() {
    assert_equal("double", Value::from("1e40"), json!(1e40));
    assert_equal("double", Value::from("1e-30"), json!(1e-30));
    assert_equal("float", Value::from("1E+40"), json!("1e40"));
    assert_not_equal("double", Value::from("1e40"), json!(1e39));

    let wide = "12345678901234567890123456789012";
    assert_equal("decimal", Value::from(wide), json!(wide));
    assert_equal("decimal", Value::from(BigDecimal::from_str(wide).unwrap()), json!(wide));
    assert_not_equal("decimal", Value::from(wide), json!("12345678901234567890123456789013"));
    assert_type_mismatch("decimal", Value::from("1e40e2"), json!(1e40));
}

#[test]
fn test_boolean() {
    check(vec![
        ("boolean", Value::Boolean(true), json!("true"), Match),
        ("boolean", Value::Boolean(true), json!(true), Match),
        ("boolean", Value::Boolean(false), json!(false), Match),
        ("boolean", Value::Boolean(true), json!(false), NoMatch),
        ("boolean", Value::from("true"), json!(true), Match),
        ("boolean", Value::from("true"), json!(false), NoMatch),
        ("boolean", Value::Null, json!(false), NoMatch),
        ("boolean", Value::Int(1), json!(false), Mismatch),
        ("boolean", Value::from("yes"), json!(true), Mismatch),
        ("boolean", Value::from(BigDecimal::from_str("1.2").unwrap()), json!(false), Mismatch),
    ]);
}

#[test]
fn test_blob() {
    let bytes: Vec<u8> = (1..=10).collect();
    check(vec![
        ("blob", Value::from("0x0012345435345345435435"), json!("0x0012345435345345435435"), Match),
        ("blob", Value::blob(bytes.clone()), json!("0x0102030405060708090a"), Match),
        ("blob", Value::blob(bytes), json!("0x0102030405060708"), NoMatch),
        ("blob", Value::from("0x0012345435345345435435"), json!("0x0012345435345345435433"), NoMatch),
        ("blob", Value::blob(vec![1]), json!(1.0), NoMatch),
        ("blob", Value::Null, json!("0x00"), NoMatch),
        ("blob", Value::Int(1), json!("0x00"), Mismatch),
        ("blob", Value::BigInteger(1), json!("0x00"), Mismatch),
        ("blob", Value::from(BigDecimal::from(1i64)), json!("0x00"), Mismatch),
        ("blob", Value::from("not hex"), json!("0x00"), Mismatch),
    ]);
}

#[test]
fn test_timestamp() {
    let epoch_plus_one = Utc.timestamp_millis_opt(1).unwrap();
    check(vec![
        ("timestamp", Value::Long(1), json!("1"), Match),
        ("timestamp", Value::Long(1), json!(1.0), Match),
        ("timestamp", Value::from(epoch_plus_one), json!(1.0), Match),
        ("timestamp", Value::Null, json!(1.0), NoMatch),
        ("timestamp", Value::Long(1), json!(12.0), NoMatch),
        ("timestamp", Value::Int(1), json!(1.0), Mismatch),
        ("timestamp", Value::from("1"), json!(1.0), Mismatch),
        ("timestamp", Value::BigInteger(1), json!(1.0), Mismatch),
    ]);
}

#[test]
fn test_uuid_types() {
    let parsed = Uuid::parse_str(TIME_UUID).unwrap();
    let mut cases = Vec::new();
    for signature in ["uuid", "timeuuid"] {
        cases.push((signature, Value::from(TIME_UUID), json!(TIME_UUID), Match));
        cases.push((signature, Value::from(parsed), json!(TIME_UUID), Match));
        cases.push((signature, Value::from(Uuid::new_v4()), json!(TIME_UUID), NoMatch));
        cases.push((signature, Value::from(Uuid::new_v4().to_string()), json!(TIME_UUID), NoMatch));
        cases.push((signature, Value::Null, json!(TIME_UUID), NoMatch));
        cases.push((signature, Value::from(TIME_UUID), JsonValue::Null, NoMatch));
        cases.push((signature, Value::Long(1), json!(TIME_UUID), Mismatch));
        cases.push((signature, Value::Int(1), json!(TIME_UUID), Mismatch));
        cases.push((signature, Value::from("1"), json!(TIME_UUID), Mismatch));
        cases.push((signature, Value::from(Utc.timestamp_millis_opt(1).unwrap()), json!(TIME_UUID), Mismatch));
    }
    check(cases);
}

#[test]
fn test_inet() {
    let local = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
    check(vec![
        ("inet", Value::from(local), json!("127.0.0.1"), Match),
        ("inet", Value::from("127.0.0.1"), json!("127.0.0.1"), Match),
        ("inet", Value::from(local), json!("localhost/127.0.0.1"), Match),
        ("inet", Value::from(local), json!("192.168.56.56"), NoMatch),
        ("inet", Value::Null, json!("127.0.0.1"), NoMatch),
        ("inet", Value::from("127.0.0.1"), JsonValue::Null, NoMatch),
        ("inet", Value::Long(1), json!("127.0.0.1"), Mismatch),
        ("inet", Value::BigInteger(1), json!("127.0.0.1"), Mismatch),
    ]);
}

#[test]
fn test_sets() {
    let one = || Value::set(vec![Value::from("one")]);
    let mut cases = Vec::new();
    for signature in ["set<text>", "set<ascii>", "set<varchar>"] {
        cases.push((signature, one(), json!(["one"]), Match));
        cases.push((signature, one(), json!(["two"]), NoMatch));
        cases.push((signature, one(), json!(["one", "two"]), NoMatch));
        cases.push((signature, Value::Null, json!(["one", "two"]), NoMatch));
        cases.push((signature, one(), JsonValue::Null, NoMatch));
        cases.push((signature, Value::Long(1), json!(["one"]), Mismatch));
        cases.push((signature, Value::Int(1), json!(["one"]), Mismatch));
    }
    cases.push(("set<text>", Value::set(vec!["1".into(), "2".into()]), json!(["2", "1"]), Match));
    cases.push(("set<uuid>", Value::set(vec![Uuid::new_v4().into()]), json!([TIME_UUID]), NoMatch));
    cases.push(("set<uuid>", Value::set(vec![Value::Null]), json!([TIME_UUID]), NoMatch));
    cases.push(("set<uuid>", Value::set(vec![TIME_UUID.into()]), json!([null]), NoMatch));
    cases.push(("set<uuid>", Value::from("hello"), json!([TIME_UUID]), Mismatch));
    check(cases);

    let err = assert_type_mismatch("set<uuid>", Value::set(vec!["1".into()]), json!([TIME_UUID]));
    assert_eq!(err.type_signature, "uuid");
}

#[test]
fn test_set_accepts_list_expectation() {
    assert_equal("set<int>", Value::list(vec![1.into(), 2.into(), 1.into()]), json!([2, 1]));
}

#[test]
fn test_set_matching_modes() {
    let expected = || Value::set(vec![Value::from("1"), Value::Int(1)]);
    let bijective = EqualityEngine::new(SetMatching::Bijective);
    let existence = EqualityEngine::new(SetMatching::Existence);

    assert_eq!(equals_with(&bijective, "set<int>", expected(), json!([1, 5])), Ok(false));
    assert_eq!(equals_with(&existence, "set<int>", expected(), json!([1, 5])), Ok(true));

    // both modes agree when elements pair up unambiguously
    for engine in [bijective, existence] {
        assert_eq!(
            equals_with(&engine, "set<int>", Value::set(vec![1.into(), 5.into()]), json!([5, 1])),
            Ok(true)
        );
    }
}

#[test]
fn test_lists() {
    check(vec![
        ("list<text>", Value::list(vec!["one".into()]), json!(["one"]), Match),
        ("list<text>", Value::list(vec!["one".into()]), json!(["two"]), NoMatch),
        ("list<text>", Value::list(vec!["one".into(), "two".into()]), json!(["one", "two"]), Match),
        ("list<text>", Value::list(vec!["one".into(), "two".into()]), json!(["two", "one"]), NoMatch),
        ("list<text>", Value::list(vec!["one".into()]), json!(["one", "two"]), NoMatch),
        ("list<text>", Value::Null, json!(["one", "two"]), NoMatch),
        ("list<text>", Value::list(vec!["one".into()]), JsonValue::Null, NoMatch),
        ("list<text>", Value::list(vec!["one".into()]), json!("one"), NoMatch),
        ("list<text>", Value::Long(1), json!(["one"]), Mismatch),
        ("list<text>", Value::set(vec!["one".into()]), json!(["one"]), Mismatch),
    ]);
}

#[test]
fn test_element_mismatch_names_element_type() {
    let err = assert_type_mismatch("list<int>", Value::list(vec!["x".into()]), json!([1]));
    assert_eq!(err.type_signature, "int");
    assert_eq!(err.expected_repr, "x");
}

#[test]
fn test_maps() {
    let entry = |k: &str, v: &str| (Value::from(k), Value::from(v));
    check(vec![
        ("map<text,text>", Value::map(vec![entry("ONE", "1")]), json!({"ONE": "1"}), Match),
        ("map<text,text>", Value::map(vec![]), json!({}), Match),
        ("map<text,text>", Value::map(vec![entry("ONE", "1"), entry("TWO", "2")]), json!({"ONE": "1"}), NoMatch),
        ("map<text,text>", Value::map(vec![entry("ONE", "1")]), json!({"ONE": "1", "TWO": "2"}), NoMatch),
        ("map<text,text>", Value::map(vec![entry("ONE", "1")]), json!({"ONE": "2"}), NoMatch),
        ("map<text,text>", Value::map(vec![entry("ONE", "1")]), json!({"TWO": "1"}), NoMatch),
        ("map<text,text>", Value::Null, json!({"TWO": "1"}), NoMatch),
        ("map<text,text>", Value::map(vec![entry("ONE", "1")]), JsonValue::Null, NoMatch),
        ("map<text,text>", Value::Long(1), json!({"ONE": "1"}), Mismatch),
        ("map<text,text>", Value::list(vec!["ONE".into()]), json!({"ONE": "1"}), Mismatch),
        ("map<int,boolean>", Value::map(vec![(1.into(), true.into())]), json!({"1": true}), Match),
        ("map<text,set<int>>", Value::map(vec![("a".into(), Value::set(vec![1.into(), 2.into()]))]), json!({"a": [2, 1]}), Match),
    ]);
}

#[test]
fn test_tuples() {
    let pair = |name: &str, n: i32| Value::list(vec![name.into(), n.into()]);
    check(vec![
        ("tuple<text,int>", pair("one", 1), json!(["one", 1]), Match),
        ("tuple<text,int>", pair("one", 1), json!(["two", 1]), NoMatch),
        ("tuple<text,int>", pair("one", 1), json!(["one", 2]), NoMatch),
        ("tuple<text,int>", Value::Null, json!(["one", 1]), NoMatch),
        ("tuple<text,int>", pair("one", 1), JsonValue::Null, NoMatch),
        ("tuple<text,int>", Value::Long(1), json!(["one", 1]), Mismatch),
        ("tuple<text,int>", Value::list(vec!["one".into()]), json!(["one"]), Mismatch),
        ("tuple<text,int>", pair("one", 1), json!(["one"]), Mismatch),
    ]);
}

#[test]
fn test_nested_null_elements() {
    assert_equal("list<int>", Value::list(vec![Value::Null, 2.into()]), json!([null, 2]));
    assert_not_equal("list<int>", Value::list(vec![Value::Null]), json!([0]));
}

#[test]
fn test_from_json_expectations() {
    // prime requests carry expectations as JSON; numbers arrive as longs and decimals
    assert_equal("int", Value::from_json(&json!(7)), json!(7.0));
    assert_equal("decimal", Value::from_json(&json!(1.5)), json!("1.50"));
    assert_equal(
        "map<text,list<bigint>>",
        Value::from_json(&json!({"k": [1, 2]})),
        json!({"k": [1, 2]}),
    );
    assert_type_mismatch("varint", Value::from_json(&json!(7)), json!(7));
}
