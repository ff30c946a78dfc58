// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for type parsing, value matching and priming

use thiserror::Error;

/// Link included in mismatch messages so test authors can look up accepted shapes
pub const COLUMN_TYPES_HELP: &str = "http://www.scassandra.org/java-client/column-types/";

/// A type signature could not be parsed
///
/// Parsing never recovers partially: a failed parse yields no descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid type signature at '{fragment}': {message}")]
pub struct ParseError {
    /// The offending part of the input
    pub fragment: String,
    pub message: String,
}

impl ParseError {
    pub fn new(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            message: message.into(),
        }
    }

    pub fn unknown_type(name: &str) -> Self {
        Self::new(name, format!("unknown type '{}'", name))
    }
}

/// An expected value has a shape its declared type cannot interpret
///
/// This is distinct from "values differ": it means the wrong kind of value was
/// supplied for the column or variable type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid expected value ({expected_repr}) for variable of type {type_signature}, \
     the value was {actual_repr} for valid types see: {help}",
    help = COLUMN_TYPES_HELP
)]
pub struct TypeMismatch {
    /// Canonical serialization of the declared type
    pub type_signature: String,
    pub expected_repr: String,
    pub actual_repr: String,
}

/// Problems building a prime from a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimeError {
    #[error("Outcome {outcome} has {actual} variable matchers but {expected} variable types are declared")]
    ArityMismatch {
        outcome: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Prime request is missing a query")]
    MissingQuery,

    #[error("Invalid query pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid prime request: {0}")]
    InvalidRequest(String),
}

/// Configuration could not be loaded
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed config: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}

/// Umbrella error for callers that drive the whole stub
#[derive(Error, Debug)]
pub enum StubError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    #[error(transparent)]
    Prime(#[from] PrimeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ParseResult<T> = Result<T, ParseError>;
pub type MatchResult<T> = Result<T, TypeMismatch>;
pub type StubResult<T> = Result<T, StubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message_names_the_type() {
        let err = TypeMismatch {
            type_signature: "map<text,int>".to_string(),
            expected_repr: "hello".to_string(),
            actual_repr: "{}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("map<text,int>"));
        assert!(message.contains("hello"));
        assert!(message.contains("{}"));
    }

    #[test]
    fn test_stub_error_wraps_parse_error() {
        let err: StubError = ParseError::unknown_type("intt").into();
        assert!(err.to_string().contains("intt"));
    }
}
