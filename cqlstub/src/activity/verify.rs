// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! After-the-fact verification of recorded operations
//!
//! Candidates are scanned in recorded order. A `TypeMismatch` raised while
//! checking a candidate counts as "no match" for that candidate, except on the
//! last candidate where it is returned to the caller. A verification that only
//! had one plausible candidate therefore reports the wrong-type diagnostic
//! instead of a bare "nothing matched".
//!
//! Batches follow the same rule, one recorded batch per candidate. A batch
//! matches when every expected statement is found, in order, among its
//! statements.

use serde_json::Value as JsonValue;

use super::record::{BatchExecution, BatchQuery, BatchQueryKind, BatchType, RecordedStatement};
use crate::consistency::Consistency;
use crate::error::MatchResult;
use crate::types::{CqlType, EqualityEngine};
use crate::value::Value;

/// What a test expects to have been sent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpectedStatement {
    pub text: String,
    /// `None` means the verifier's default consistency
    pub consistency: Option<Consistency>,
    pub variables: Vec<Value>,
}

/// Expected prepared statement execution
pub type ExpectedExecution = ExpectedStatement;
/// Expected simple query
pub type ExpectedQuery = ExpectedStatement;

impl ExpectedStatement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    pub fn with_variables<I, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
        self
    }
}

/// One statement expected inside a batch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpectedBatchQuery {
    pub text: String,
    pub kind: BatchQueryKind,
    pub variables: Vec<Value>,
}

impl ExpectedBatchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn prepared(text: impl Into<String>) -> Self {
        Self::new(text).with_kind(BatchQueryKind::PreparedStatement)
    }

    pub fn with_kind(mut self, kind: BatchQueryKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_variables<I, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
        self
    }
}

/// What a test expects a batch to have contained
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpectedBatch {
    pub queries: Vec<ExpectedBatchQuery>,
    /// `None` accepts any batch type
    pub batch_type: Option<BatchType>,
    /// `None` means the verifier's default consistency
    pub consistency: Option<Consistency>,
}

impl ExpectedBatch {
    pub fn new(queries: Vec<ExpectedBatchQuery>) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    pub fn with_batch_type(mut self, batch_type: BatchType) -> Self {
        self.batch_type = Some(batch_type);
        self
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Verifier {
    engine: EqualityEngine,
    default_consistency: Consistency,
    log_mismatches: bool,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(EqualityEngine::default(), Consistency::default())
    }
}

impl Verifier {
    pub fn new(engine: EqualityEngine, default_consistency: Consistency) -> Self {
        Self {
            engine,
            default_consistency,
            log_mismatches: true,
        }
    }

    pub fn with_mismatch_logging(mut self, enabled: bool) -> Self {
        self.log_mismatches = enabled;
        self
    }

    /// Check one recorded operation against the expectation
    pub fn matches<R: RecordedStatement>(
        &self,
        expected: &ExpectedStatement,
        actual: &R,
    ) -> MatchResult<bool> {
        if expected.text != actual.text() {
            return Ok(false);
        }
        let consistency = expected.consistency.unwrap_or(self.default_consistency);
        if consistency != actual.consistency() {
            return Ok(false);
        }

        self.variables_match(
            actual.text(),
            &expected.variables,
            actual.variable_types(),
            actual.variables(),
        )
    }

    /// Check one recorded batch against the expectation
    pub fn batch_matches(
        &self,
        expected: &ExpectedBatch,
        actual: &BatchExecution,
    ) -> MatchResult<bool> {
        let consistency = expected.consistency.unwrap_or(self.default_consistency);
        if consistency != actual.consistency {
            return Ok(false);
        }
        if let Some(batch_type) = expected.batch_type {
            if batch_type != actual.batch_type {
                return Ok(false);
            }
        }

        let mut remaining = actual.batch_queries.iter();
        for wanted in &expected.queries {
            let mut found = false;
            for candidate in remaining.by_ref() {
                if self.batch_query_matches(wanted, candidate)? {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn batch_query_matches(
        &self,
        expected: &ExpectedBatchQuery,
        actual: &BatchQuery,
    ) -> MatchResult<bool> {
        if expected.text != actual.query || expected.kind != actual.kind {
            return Ok(false);
        }
        self.variables_match(
            &actual.query,
            &expected.variables,
            &actual.variable_types,
            &actual.variables,
        )
    }

    fn variables_match(
        &self,
        text: &str,
        expected: &[Value],
        types: &[CqlType],
        actual: &[JsonValue],
    ) -> MatchResult<bool> {
        if expected.len() != actual.len() {
            return Ok(false);
        }
        if types.len() != actual.len() {
            log::warn!(
                "Recorded '{}' has {} variables but {} variable types, treating as unmatched",
                text,
                actual.len(),
                types.len()
            );
            return Ok(false);
        }

        for ((value, ty), wire) in expected.iter().zip(types).zip(actual) {
            if !self.engine.equals(ty, value, wire)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// First candidate that matches, applying the mismatch-swallowing rule
    pub fn find_match<'a, R: RecordedStatement>(
        &self,
        expected: &ExpectedStatement,
        candidates: &'a [R],
    ) -> MatchResult<Option<&'a R>> {
        self.first_match(candidates, |candidate| self.matches(expected, candidate))
    }

    pub fn matches_any<R: RecordedStatement>(
        &self,
        expected: &ExpectedStatement,
        candidates: &[R],
    ) -> MatchResult<bool> {
        Ok(self.find_match(expected, candidates)?.is_some())
    }

    pub fn find_batch_match<'a>(
        &self,
        expected: &ExpectedBatch,
        candidates: &'a [BatchExecution],
    ) -> MatchResult<Option<&'a BatchExecution>> {
        self.first_match(candidates, |candidate| self.batch_matches(expected, candidate))
    }

    pub fn matches_any_batch(
        &self,
        expected: &ExpectedBatch,
        candidates: &[BatchExecution],
    ) -> MatchResult<bool> {
        Ok(self.find_batch_match(expected, candidates)?.is_some())
    }

    fn first_match<'a, T, F>(&self, candidates: &'a [T], mut check: F) -> MatchResult<Option<&'a T>>
    where
        F: FnMut(&T) -> MatchResult<bool>,
    {
        let last = candidates.len().saturating_sub(1);
        for (index, candidate) in candidates.iter().enumerate() {
            match check(candidate) {
                Ok(true) => return Ok(Some(candidate)),
                Ok(false) => continue,
                Err(mismatch) if index < last => {
                    if self.log_mismatches {
                        log::debug!("Ignoring candidate {}: {}", index, mismatch);
                    }
                }
                Err(mismatch) => return Err(mismatch),
            }
        }
        Ok(None)
    }
}
