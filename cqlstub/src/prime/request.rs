// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! JSON form of prime requests
//!
//! ```json
//! {
//!   "when": {"query": "select * from people where name = ?", "consistency": ["ONE"]},
//!   "then": {
//!     "variable_types": ["text"],
//!     "outcomes": [
//!       {"criteria": {"variable_matcher": [{"type": "exact", "matcher": "Chris"}]},
//!        "action": {"rows": [{"name": "Chris"}]}},
//!       {"criteria": {"variable_matcher": [{"type": "any"}]},
//!        "action": {"result": "read_request_timeout"}}
//!     ]
//!   }
//! }
//! ```
//!
//! A `then` without `outcomes` describes one action inline, answered for
//! every variable combination. `when` may give a `query_pattern` regular
//! expression instead of the exact `query` text.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{Action, Criteria, Outcome, Prime, ResolutionTable, VariableMatch, When};
use crate::consistency::Consistency;
use crate::error::PrimeError;
use crate::types::CqlType;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimeRequest {
    pub when: WhenRequest,
    #[serde(default)]
    pub then: ThenRequest,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhenRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consistency: Vec<Consistency>,
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThenRequest {
    #[serde(default)]
    pub variable_types: Vec<CqlType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<OutcomeRequest>,
    /// Single-action form, used when `outcomes` is empty
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRequest {
    #[serde(default)]
    pub criteria: CriteriaRequest,
    #[serde(default)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CriteriaRequest {
    #[serde(default)]
    pub variable_matcher: Vec<VariableMatchRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VariableMatchRequest {
    Exact { matcher: JsonValue },
    Any,
}

impl From<&VariableMatchRequest> for VariableMatch {
    fn from(request: &VariableMatchRequest) -> Self {
        match request {
            VariableMatchRequest::Exact { matcher } => VariableMatch::Exact(Value::from_json(matcher)),
            VariableMatchRequest::Any => VariableMatch::Any,
        }
    }
}

impl PrimeRequest {
    pub fn from_json(json: &str) -> Result<Self, PrimeError> {
        serde_json::from_str(json).map_err(|e| PrimeError::InvalidRequest(e.to_string()))
    }

    /// Validate and convert into an immutable [`Prime`]
    pub fn into_prime(self) -> Result<Prime, PrimeError> {
        let when = match (non_blank(self.when.query), non_blank(self.when.query_pattern)) {
            (Some(_), Some(_)) => {
                return Err(PrimeError::InvalidRequest(
                    "set either query or query_pattern, not both".to_string(),
                ))
            }
            (Some(query), None) => When::query(query),
            (None, Some(pattern)) => When::query_pattern(pattern)?,
            (None, None) => return Err(PrimeError::MissingQuery),
        };
        let when = when.with_consistency(self.when.consistency);

        let ThenRequest {
            variable_types,
            outcomes,
            action,
        } = self.then;

        if outcomes.is_empty() {
            return Ok(Prime::single(when, variable_types, action));
        }

        let outcomes = outcomes
            .into_iter()
            .map(|outcome| {
                let matchers = outcome
                    .criteria
                    .variable_matcher
                    .iter()
                    .map(VariableMatch::from)
                    .collect();
                Outcome::new(Criteria::new(matchers), outcome.action)
            })
            .collect();

        let then = ResolutionTable::new(variable_types, outcomes)?;
        Ok(Prime::new(when, then))
    }
}
