// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CQL type descriptors
//!
//! A [`CqlType`] describes one column or variable type: either a primitive from
//! the closed set in [`PrimitiveType`] or a composite (`list`, `set`, `map`,
//! `tuple`) over other descriptors. Descriptors are immutable values with
//! structural equality and hashing, and every descriptor has a canonical
//! signature (`map<text,set<int>>`) that parses back to an equal descriptor.
//!
//! The submodules provide the operational pieces:
//! - [`parser`] turns a signature string into a descriptor
//! - [`coercion`] interprets loosely-typed wire values
//! - [`equality`] decides whether an expected value matches an actual one

pub mod coercion;
pub mod equality;
pub mod parser;
pub mod primitive;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use self::equality::{EqualityEngine, SetMatching};
pub use self::parser::{parse_type, MAX_TYPE_DEPTH};
pub use self::primitive::{PrimitiveFamily, PrimitiveType};

use crate::error::{ParseError, ParseResult};

/// Descriptor of a CQL type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CqlType {
    Primitive(PrimitiveType),
    List(Box<CqlType>),
    Set(Box<CqlType>),
    Map(Box<CqlType>, Box<CqlType>),
    /// Fixed-arity tuple, always at least one element
    Tuple(Vec<CqlType>),
}

impl CqlType {
    pub const ASCII: CqlType = CqlType::Primitive(PrimitiveType::Ascii);
    pub const TEXT: CqlType = CqlType::Primitive(PrimitiveType::Text);
    pub const VARCHAR: CqlType = CqlType::Primitive(PrimitiveType::Varchar);
    pub const BIGINT: CqlType = CqlType::Primitive(PrimitiveType::BigInt);
    pub const BLOB: CqlType = CqlType::Primitive(PrimitiveType::Blob);
    pub const BOOLEAN: CqlType = CqlType::Primitive(PrimitiveType::Boolean);
    pub const COUNTER: CqlType = CqlType::Primitive(PrimitiveType::Counter);
    pub const DECIMAL: CqlType = CqlType::Primitive(PrimitiveType::Decimal);
    pub const DOUBLE: CqlType = CqlType::Primitive(PrimitiveType::Double);
    pub const FLOAT: CqlType = CqlType::Primitive(PrimitiveType::Float);
    pub const INT: CqlType = CqlType::Primitive(PrimitiveType::Int);
    pub const TIMESTAMP: CqlType = CqlType::Primitive(PrimitiveType::Timestamp);
    pub const TIMEUUID: CqlType = CqlType::Primitive(PrimitiveType::TimeUuid);
    pub const UUID: CqlType = CqlType::Primitive(PrimitiveType::Uuid);
    pub const INET: CqlType = CqlType::Primitive(PrimitiveType::Inet);
    pub const VARINT: CqlType = CqlType::Primitive(PrimitiveType::VarInt);
    pub const DATE: CqlType = CqlType::Primitive(PrimitiveType::Date);
    pub const SMALLINT: CqlType = CqlType::Primitive(PrimitiveType::SmallInt);
    pub const TIME: CqlType = CqlType::Primitive(PrimitiveType::Time);
    pub const TINYINT: CqlType = CqlType::Primitive(PrimitiveType::TinyInt);

    pub fn list(element: CqlType) -> Self {
        CqlType::List(Box::new(element))
    }

    pub fn set(element: CqlType) -> Self {
        CqlType::Set(Box::new(element))
    }

    pub fn map(key: CqlType, value: CqlType) -> Self {
        CqlType::Map(Box::new(key), Box::new(value))
    }

    /// Build a tuple type; an empty element list has no valid signature
    pub fn tuple(elements: Vec<CqlType>) -> ParseResult<Self> {
        if elements.is_empty() {
            return Err(ParseError::new(
                "tuple<>",
                "tuple requires at least one element type",
            ));
        }
        Ok(CqlType::Tuple(elements))
    }

    /// Look up a primitive descriptor by name
    pub fn primitive(name: &str) -> ParseResult<Self> {
        PrimitiveType::from_name(name)
            .map(CqlType::Primitive)
            .ok_or_else(|| ParseError::unknown_type(name))
    }

    /// Canonical grammar form of this descriptor
    pub fn signature(&self) -> String {
        self.to_string()
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, CqlType::Primitive(_))
    }

    /// Nesting depth; primitives are depth 1
    pub fn depth(&self) -> usize {
        match self {
            CqlType::Primitive(_) => 1,
            CqlType::List(element) | CqlType::Set(element) => 1 + element.depth(),
            CqlType::Map(key, value) => 1 + key.depth().max(value.depth()),
            CqlType::Tuple(elements) => {
                1 + elements.iter().map(CqlType::depth).max().unwrap_or(0)
            }
        }
    }
}

impl From<PrimitiveType> for CqlType {
    fn from(primitive: PrimitiveType) -> Self {
        CqlType::Primitive(primitive)
    }
}

impl fmt::Display for CqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CqlType::Primitive(primitive) => write!(f, "{}", primitive),
            CqlType::List(element) => write!(f, "list<{}>", element),
            CqlType::Set(element) => write!(f, "set<{}>", element),
            CqlType::Map(key, value) => write!(f, "map<{},{}>", key, value),
            CqlType::Tuple(elements) => {
                f.write_str("tuple<")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str(">")
            }
        }
    }
}

impl FromStr for CqlType {
    type Err = ParseError;

    fn from_str(signature: &str) -> Result<Self, Self::Err> {
        parse_type(signature)
    }
}

impl Serialize for CqlType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.signature())
    }
}

impl<'de> Deserialize<'de> for CqlType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SignatureVisitor;

        impl Visitor<'_> for SignatureVisitor {
            type Value = CqlType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a CQL type signature such as \"map<text,int>\"")
            }

            fn visit_str<E: de::Error>(self, signature: &str) -> Result<CqlType, E> {
                parse_type(signature).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(SignatureVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_signature_of_nested_types() {
        let ty = CqlType::map(CqlType::TEXT, CqlType::set(CqlType::INT));
        assert_eq!(ty.signature(), "map<text,set<int>>");

        let tuple = CqlType::tuple(vec![CqlType::INT, CqlType::INET, CqlType::DATE]).unwrap();
        assert_eq!(tuple.signature(), "tuple<int,inet,date>");
    }

    #[test]
    fn test_structural_equality_and_hashing() {
        let a = CqlType::list(CqlType::map(CqlType::TEXT, CqlType::BIGINT));
        let b = CqlType::list(CqlType::map(CqlType::TEXT, CqlType::BIGINT));
        let c = CqlType::list(CqlType::map(CqlType::TEXT, CqlType::INT));
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut seen = HashSet::new();
        seen.insert(a);
        assert!(seen.contains(&b));
        assert!(!seen.contains(&c));
    }

    #[test]
    fn test_empty_tuple_rejected() {
        assert!(CqlType::tuple(vec![]).is_err());
    }

    #[test]
    fn test_depth() {
        assert_eq!(CqlType::INT.depth(), 1);
        assert_eq!(
            CqlType::map(CqlType::TEXT, CqlType::set(CqlType::INT)).depth(),
            3
        );
    }

    #[test]
    fn test_serde_uses_signature() {
        let ty = CqlType::set(CqlType::UUID);
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, "\"set<uuid>\"");
        let back: CqlType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ty);

        assert!(serde_json::from_str::<CqlType>("\"set<uuidd>\"").is_err());
    }
}
