// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Responses a prime hands back when its criteria match

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::types::CqlType;

/// Kind of response sent to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    #[default]
    Success,
    ReadRequestTimeout,
    WriteRequestTimeout,
    Unavailable,
    ServerError,
    ProtocolError,
    BadCredentials,
    Overloaded,
    IsBootstrapping,
    TruncateError,
    SyntaxError,
    Unauthorized,
    Invalid,
    ConfigError,
    AlreadyExists,
    Unprepared,
    ClosedConnection,
    ReadFailure,
    WriteFailure,
    FunctionFailure,
}

impl ResultKind {
    pub fn is_error(self) -> bool {
        self != ResultKind::Success
    }
}

/// Rows, result kind and timing returned for a matched operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub rows: Vec<Map<String, JsonValue>>,

    #[serde(default)]
    pub result: ResultKind,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub column_types: BTreeMap<String, CqlType>,

    /// Delay before responding, in milliseconds
    #[serde(
        default,
        rename = "fixed_delay",
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_delay_ms: Option<u64>,

    /// Extra per-result settings, e.g. the replica counts of an unavailable error
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, JsonValue>,
}

impl Action {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn error(result: ResultKind) -> Self {
        Self {
            result,
            ..Self::default()
        }
    }

    pub fn with_rows(mut self, rows: Vec<Map<String, JsonValue>>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_column_type(mut self, column: impl Into<String>, ty: CqlType) -> Self {
        self.column_types.insert(column.into(), ty);
        self
    }

    pub fn with_fixed_delay(mut self, delay: Duration) -> Self {
        self.fixed_delay_ms = Some(delay.as_millis() as u64);
        self
    }

    pub fn fixed_delay(&self) -> Option<Duration> {
        self.fixed_delay_ms.map(Duration::from_millis)
    }
}
