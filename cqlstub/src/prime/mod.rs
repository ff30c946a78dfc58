// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Primes: canned responses selected by matching incoming variables
//!
//! A prime pairs a `when` (query text or pattern, and accepted consistency
//! levels) with a
//! [`ResolutionTable`]: the declared variable types plus an ordered list of
//! outcomes. Each outcome carries criteria, one matcher per variable position.
//! Resolution scans outcomes in declaration order and returns the first whose
//! criteria accept every variable.
//!
//! Tables are immutable once built. Re-priming builds a new table and the
//! [`PrimeStore`] swaps the reference. Batches are primed separately, see
//! [`BatchPrime`].

pub mod action;
pub mod batch;
pub mod request;
pub mod store;

use regex::Regex;
use serde_json::Value as JsonValue;
use std::fmt;

pub use self::action::{Action, ResultKind};
pub use self::batch::{BatchPrime, BatchPrimeStore, BatchQueryPrime, BatchWhen};
pub use self::request::PrimeRequest;
pub use self::store::PrimeStore;

use crate::consistency::Consistency;
use crate::error::{MatchResult, PrimeError};
use crate::types::{CqlType, EqualityEngine};
use crate::value::Value;

/// Matcher for one variable position
#[derive(Debug, Clone, PartialEq)]
pub enum VariableMatch {
    /// Accepts any value
    Any,
    /// Accepts values equal to this one under the declared type
    Exact(Value),
}

impl VariableMatch {
    pub fn exact(value: impl Into<Value>) -> Self {
        VariableMatch::Exact(value.into())
    }

    pub fn accepts(
        &self,
        engine: &EqualityEngine,
        ty: &CqlType,
        actual: &JsonValue,
    ) -> MatchResult<bool> {
        match self {
            VariableMatch::Any => Ok(true),
            VariableMatch::Exact(expected) => engine.equals(ty, expected, actual),
        }
    }
}

/// Per-position matchers for one outcome
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Criteria {
    pub variable_matchers: Vec<VariableMatch>,
}

impl Criteria {
    pub fn new(variable_matchers: Vec<VariableMatch>) -> Self {
        Self { variable_matchers }
    }

    /// Criteria accepting anything, for `arity` variables
    pub fn any(arity: usize) -> Self {
        Self::new(vec![VariableMatch::Any; arity])
    }

    pub fn arity(&self) -> usize {
        self.variable_matchers.len()
    }

    /// Whether every position accepts its actual value
    pub fn accepts(
        &self,
        engine: &EqualityEngine,
        types: &[CqlType],
        actual: &[JsonValue],
    ) -> MatchResult<bool> {
        for ((matcher, ty), value) in self.variable_matchers.iter().zip(types).zip(actual) {
            if !matcher.accepts(engine, ty, value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Criteria paired with the payload returned when they match
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<A> {
    pub criteria: Criteria,
    pub action: A,
}

impl<A> Outcome<A> {
    pub fn new(criteria: Criteria, action: A) -> Self {
        Self { criteria, action }
    }
}

/// Declared variable types with outcomes in priority order
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionTable<A> {
    variable_types: Vec<CqlType>,
    outcomes: Vec<Outcome<A>>,
}

impl<A> ResolutionTable<A> {
    /// Build a table, checking every criterion has one matcher per declared type
    pub fn new(variable_types: Vec<CqlType>, outcomes: Vec<Outcome<A>>) -> Result<Self, PrimeError> {
        for (index, outcome) in outcomes.iter().enumerate() {
            if outcome.criteria.arity() != variable_types.len() {
                return Err(PrimeError::ArityMismatch {
                    outcome: index,
                    expected: variable_types.len(),
                    actual: outcome.criteria.arity(),
                });
            }
        }
        Ok(Self {
            variable_types,
            outcomes,
        })
    }

    pub fn variable_types(&self) -> &[CqlType] {
        &self.variable_types
    }

    pub fn outcomes(&self) -> &[Outcome<A>] {
        &self.outcomes
    }

    /// First outcome whose criteria accept `actual`, if any
    pub fn resolve(
        &self,
        engine: &EqualityEngine,
        actual: &[JsonValue],
    ) -> MatchResult<Option<&Outcome<A>>> {
        resolve_outcome(engine, &self.outcomes, &self.variable_types, actual)
    }
}

/// Scan `outcomes` in order and return the first that accepts `actual`
///
/// A variable count that differs from the declared types never matches.
pub fn resolve_outcome<'a, A>(
    engine: &EqualityEngine,
    outcomes: &'a [Outcome<A>],
    types: &[CqlType],
    actual: &[JsonValue],
) -> MatchResult<Option<&'a Outcome<A>>> {
    if actual.len() != types.len() {
        log::debug!(
            "Received {} variables but {} types are declared, no outcome selected",
            actual.len(),
            types.len()
        );
        return Ok(None);
    }

    for (index, outcome) in outcomes.iter().enumerate() {
        if outcome.criteria.accepts(engine, types, actual)? {
            log::debug!("Selected outcome {} of {}", index, outcomes.len());
            return Ok(Some(outcome));
        }
    }

    log::debug!("None of {} outcomes matched", outcomes.len());
    Ok(None)
}

/// How a prime selects incoming query text
#[derive(Debug, Clone)]
pub enum QueryMatcher {
    Text(String),
    /// Regular expression that must match the whole query text
    Pattern { source: String, regex: Regex },
}

impl QueryMatcher {
    pub fn pattern(source: impl Into<String>) -> Result<Self, PrimeError> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            PrimeError::InvalidPattern {
                pattern: source.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(QueryMatcher::Pattern { source, regex })
    }

    /// The query text, or the pattern as written
    pub fn as_str(&self) -> &str {
        match self {
            QueryMatcher::Text(text) => text,
            QueryMatcher::Pattern { source, .. } => source,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, QueryMatcher::Pattern { .. })
    }

    pub fn matches(&self, query: &str) -> bool {
        match self {
            QueryMatcher::Text(text) => text == query,
            QueryMatcher::Pattern { regex, .. } => regex.is_match(query),
        }
    }
}

impl PartialEq for QueryMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

impl Eq for QueryMatcher {}

impl fmt::Display for QueryMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMatcher::Text(text) => f.write_str(text),
            QueryMatcher::Pattern { source, .. } => write!(f, "/{}/", source),
        }
    }
}

/// Which operations a prime applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct When {
    pub query: QueryMatcher,
    /// Accepted levels; empty accepts every level
    pub consistency: Vec<Consistency>,
}

impl When {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: QueryMatcher::Text(query.into()),
            consistency: Vec::new(),
        }
    }

    /// Match every query text the regular expression accepts in full
    pub fn query_pattern(pattern: impl Into<String>) -> Result<Self, PrimeError> {
        Ok(Self {
            query: QueryMatcher::pattern(pattern)?,
            consistency: Vec::new(),
        })
    }

    pub fn with_consistency(mut self, consistency: Vec<Consistency>) -> Self {
        self.consistency = consistency;
        self
    }

    pub fn accepts_consistency(&self, consistency: Consistency) -> bool {
        self.consistency.is_empty() || self.consistency.contains(&consistency)
    }
}

/// A registered prime
#[derive(Debug, Clone, PartialEq)]
pub struct Prime {
    pub when: When,
    pub then: ResolutionTable<Action>,
}

impl Prime {
    pub fn new(when: When, then: ResolutionTable<Action>) -> Self {
        Self { when, then }
    }

    /// Prime that answers every variable combination with one action
    pub fn single(when: When, variable_types: Vec<CqlType>, action: Action) -> Self {
        let criteria = Criteria::any(variable_types.len());
        let then = ResolutionTable {
            variable_types,
            outcomes: vec![Outcome::new(criteria, action)],
        };
        Self { when, then }
    }
}
