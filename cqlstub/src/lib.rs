// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! cqlstub - typed value matching for a CQL stub server
//!
//! A stub server is primed with canned responses and records what clients
//! send it. This crate holds the part that needs care: the CQL type model,
//! its signature grammar, and an equality engine deciding whether a loosely
//! typed wire value equals a strongly typed value written by a test author.
//! The same engine picks which primed outcome answers an operation and
//! verifies afterwards that an expected operation was sent.
//!
//! # Features
//!
//! - **Type signatures**: `map<text,set<int>>`, `tuple<int,inet,date>` and the
//!   other CQL types parse into a [`CqlType`] tree and print back canonically
//! - **Type-aware equality**: per-type coercion rules, with a distinct
//!   [`TypeMismatch`] error when a test supplies the wrong kind of value
//! - **Outcome resolution**: ordered criteria, first match wins
//! - **Activity verification**: scan recorded operations, batches included,
//!   for an expected one
//!
//! # Usage
//!
//! ```ignore
//! use cqlstub::{parse_type, Value};
//! use serde_json::json;
//!
//! let ty = parse_type("set<int>")?;
//! assert!(ty.equals(&Value::set(vec![Value::Int(1), Value::Int(2)]), &json!([2, 1]))?);
//! ```

pub mod activity;
pub mod config;
pub mod consistency;
pub mod coordinator;
pub mod error;
pub mod prime;
pub mod types;
pub mod value;

pub use activity::{
    ActivityLog, BatchExecution, BatchQuery, BatchQueryKind, BatchType, Connection, ExpectedBatch,
    ExpectedBatchQuery, ExpectedExecution, ExpectedQuery, ExpectedStatement,
    PreparedStatementExecution, PreparedStatementPreparation, Query, RecordedStatement, Verifier,
};
pub use config::StubConfig;
pub use consistency::Consistency;
pub use coordinator::StubCoordinator;
pub use error::{
    ConfigError, MatchResult, ParseError, ParseResult, PrimeError, StubError, StubResult,
    TypeMismatch,
};
pub use prime::{
    resolve_outcome, Action, BatchPrime, BatchPrimeStore, BatchQueryPrime, BatchWhen, Criteria,
    Outcome, Prime, PrimeRequest, PrimeStore, QueryMatcher, ResolutionTable, ResultKind,
    VariableMatch, When,
};
pub use types::equality::equals;
pub use types::{
    parse_type, CqlType, EqualityEngine, PrimitiveFamily, PrimitiveType, SetMatching,
    MAX_TYPE_DEPTH,
};
pub use value::Value;

/// cqlstub version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// cqlstub crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
