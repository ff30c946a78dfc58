// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Closed set of CQL primitive types and the name registry

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// A named scalar CQL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Ascii,
    Text,
    Varchar,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Int,
    Timestamp,
    TimeUuid,
    Uuid,
    Inet,
    VarInt,
    Date,
    SmallInt,
    Time,
    TinyInt,
}

/// How the equality engine interprets values of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveFamily {
    /// ascii, text, varchar
    Textual,
    /// bigint, int, counter, date, time, smallint, tinyint
    Integral,
    VarInt,
    /// decimal, float, double
    Decimal,
    Boolean,
    Blob,
    /// uuid, timeuuid
    Uuid,
    Inet,
    Timestamp,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 20] = [
        PrimitiveType::Ascii,
        PrimitiveType::Text,
        PrimitiveType::Varchar,
        PrimitiveType::BigInt,
        PrimitiveType::Blob,
        PrimitiveType::Boolean,
        PrimitiveType::Counter,
        PrimitiveType::Decimal,
        PrimitiveType::Double,
        PrimitiveType::Float,
        PrimitiveType::Int,
        PrimitiveType::Timestamp,
        PrimitiveType::TimeUuid,
        PrimitiveType::Uuid,
        PrimitiveType::Inet,
        PrimitiveType::VarInt,
        PrimitiveType::Date,
        PrimitiveType::SmallInt,
        PrimitiveType::Time,
        PrimitiveType::TinyInt,
    ];

    /// Canonical lowercase name, as written in type signatures
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Ascii => "ascii",
            PrimitiveType::Text => "text",
            PrimitiveType::Varchar => "varchar",
            PrimitiveType::BigInt => "bigint",
            PrimitiveType::Blob => "blob",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Counter => "counter",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::Double => "double",
            PrimitiveType::Float => "float",
            PrimitiveType::Int => "int",
            PrimitiveType::Timestamp => "timestamp",
            PrimitiveType::TimeUuid => "timeuuid",
            PrimitiveType::Uuid => "uuid",
            PrimitiveType::Inet => "inet",
            PrimitiveType::VarInt => "varint",
            PrimitiveType::Date => "date",
            PrimitiveType::SmallInt => "smallint",
            PrimitiveType::Time => "time",
            PrimitiveType::TinyInt => "tinyint",
        }
    }

    /// Look up a primitive by its canonical name
    ///
    /// Names are case-sensitive; anything outside the closed set is `None`.
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        let found = REGISTRY.get(name).copied();
        if found.is_none() {
            log::trace!("No primitive type registered under '{}'", name);
        }
        found
    }

    pub fn family(self) -> PrimitiveFamily {
        match self {
            PrimitiveType::Ascii | PrimitiveType::Text | PrimitiveType::Varchar => {
                PrimitiveFamily::Textual
            }
            PrimitiveType::BigInt
            | PrimitiveType::Int
            | PrimitiveType::Counter
            | PrimitiveType::Date
            | PrimitiveType::Time
            | PrimitiveType::SmallInt
            | PrimitiveType::TinyInt => PrimitiveFamily::Integral,
            PrimitiveType::VarInt => PrimitiveFamily::VarInt,
            PrimitiveType::Decimal | PrimitiveType::Float | PrimitiveType::Double => {
                PrimitiveFamily::Decimal
            }
            PrimitiveType::Boolean => PrimitiveFamily::Boolean,
            PrimitiveType::Blob => PrimitiveFamily::Blob,
            PrimitiveType::Uuid | PrimitiveType::TimeUuid => PrimitiveFamily::Uuid,
            PrimitiveType::Inet => PrimitiveFamily::Inet,
            PrimitiveType::Timestamp => PrimitiveFamily::Timestamp,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Process-wide name lookup, built once on first access
static REGISTRY: Lazy<HashMap<&'static str, PrimitiveType>> = Lazy::new(|| {
    PrimitiveType::ALL
        .iter()
        .map(|primitive| (primitive.name(), *primitive))
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_primitive_is_registered_under_its_name() {
        for primitive in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_name(primitive.name()), Some(primitive));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(PrimitiveType::from_name("INT"), None);
        assert_eq!(PrimitiveType::from_name("Text"), None);
        assert_eq!(PrimitiveType::from_name("integer"), None);
    }

    #[test]
    fn test_families() {
        assert_eq!(PrimitiveType::Counter.family(), PrimitiveFamily::Integral);
        assert_eq!(PrimitiveType::VarInt.family(), PrimitiveFamily::VarInt);
        assert_eq!(PrimitiveType::Float.family(), PrimitiveFamily::Decimal);
        assert_eq!(PrimitiveType::TimeUuid.family(), PrimitiveFamily::Uuid);
    }
}
