// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Operations received by the stub

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::consistency::Consistency;
use crate::types::CqlType;

/// Common view over recorded operations, used by verification
pub trait RecordedStatement {
    fn text(&self) -> &str;
    fn consistency(&self) -> Consistency;
    fn variables(&self) -> &[JsonValue];
    fn variable_types(&self) -> &[CqlType];
}

/// A simple (unprepared) query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    pub query: String,
    #[serde(default)]
    pub consistency: Consistency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_consistency: Option<Consistency>,
    #[serde(default)]
    pub variables: Vec<JsonValue>,
    #[serde(default)]
    pub variable_types: Vec<CqlType>,
    /// Client-supplied timestamp in microseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    pub fn with_serial_consistency(mut self, consistency: Consistency) -> Self {
        self.serial_consistency = Some(consistency);
        self
    }

    pub fn with_variables(mut self, types: Vec<CqlType>, variables: Vec<JsonValue>) -> Self {
        self.variable_types = types;
        self.variables = variables;
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl RecordedStatement for Query {
    fn text(&self) -> &str {
        &self.query
    }

    fn consistency(&self) -> Consistency {
        self.consistency
    }

    fn variables(&self) -> &[JsonValue] {
        &self.variables
    }

    fn variable_types(&self) -> &[CqlType] {
        &self.variable_types
    }
}

/// Execution of a previously prepared statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PreparedStatementExecution {
    pub prepared_statement_text: String,
    #[serde(default)]
    pub consistency: Consistency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_consistency: Option<Consistency>,
    #[serde(default)]
    pub variables: Vec<JsonValue>,
    #[serde(default)]
    pub variable_types: Vec<CqlType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl PreparedStatementExecution {
    pub fn new(prepared_statement_text: impl Into<String>) -> Self {
        Self {
            prepared_statement_text: prepared_statement_text.into(),
            ..Self::default()
        }
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    pub fn with_serial_consistency(mut self, consistency: Consistency) -> Self {
        self.serial_consistency = Some(consistency);
        self
    }

    pub fn with_variables(mut self, types: Vec<CqlType>, variables: Vec<JsonValue>) -> Self {
        self.variable_types = types;
        self.variables = variables;
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl RecordedStatement for PreparedStatementExecution {
    fn text(&self) -> &str {
        &self.prepared_statement_text
    }

    fn consistency(&self) -> Consistency {
        self.consistency
    }

    fn variables(&self) -> &[JsonValue] {
        &self.variables
    }

    fn variable_types(&self) -> &[CqlType] {
        &self.variable_types
    }
}

/// Statement kind inside a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchQueryKind {
    #[default]
    Query,
    PreparedStatement,
}

/// Batch flavour chosen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchType {
    #[default]
    Logged,
    Unlogged,
    Counter,
}

impl fmt::Display for BatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchType::Logged => "LOGGED",
            BatchType::Unlogged => "UNLOGGED",
            BatchType::Counter => "COUNTER",
        };
        f.write_str(name)
    }
}

/// One statement of a batch, with its bound variables
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchQuery {
    pub query: String,
    #[serde(default)]
    pub kind: BatchQueryKind,
    #[serde(default)]
    pub variables: Vec<JsonValue>,
    #[serde(default)]
    pub variable_types: Vec<CqlType>,
}

impl BatchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn prepared(query: impl Into<String>) -> Self {
        Self::new(query).with_kind(BatchQueryKind::PreparedStatement)
    }

    pub fn with_kind(mut self, kind: BatchQueryKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_variables(mut self, types: Vec<CqlType>, variables: Vec<JsonValue>) -> Self {
        self.variable_types = types;
        self.variables = variables;
        self
    }
}

/// A batch of statements sent in one request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchExecution {
    pub batch_queries: Vec<BatchQuery>,
    #[serde(default)]
    pub consistency: Consistency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_consistency: Option<Consistency>,
    #[serde(default)]
    pub batch_type: BatchType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl BatchExecution {
    pub fn new(batch_queries: Vec<BatchQuery>) -> Self {
        Self {
            batch_queries,
            ..Self::default()
        }
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    pub fn with_batch_type(mut self, batch_type: BatchType) -> Self {
        self.batch_type = batch_type;
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A statement the client asked to prepare
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreparedStatementPreparation {
    pub prepared_statement_text: String,
}

impl PreparedStatementPreparation {
    pub fn new(prepared_statement_text: impl Into<String>) -> Self {
        Self {
            prepared_statement_text: prepared_statement_text.into(),
        }
    }
}

/// A client connection accepted by the stub
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Connection {
    pub host: String,
}

impl Connection {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}
