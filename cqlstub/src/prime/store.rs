// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Registry of active primes keyed by query text
//!
//! Exact query text wins over patterns. Patterns are tried in the order they
//! were primed.

use parking_lot::RwLock;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Action, Prime, PrimeRequest, QueryMatcher};
use crate::consistency::Consistency;
use crate::error::{MatchResult, PrimeError};
use crate::types::EqualityEngine;

/// Thread-safe prime registry
///
/// Primes are never mutated in place; re-priming a query replaces its
/// `Arc<Prime>` so concurrent lookups see either the old or the new table.
pub struct PrimeStore {
    engine: EqualityEngine,
    primes: RwLock<PrimeTable>,
}

#[derive(Default)]
struct PrimeTable {
    exact: HashMap<String, Arc<Prime>>,
    patterns: Vec<Arc<Prime>>,
}

impl PrimeTable {
    fn insert(&mut self, prime: Prime) -> bool {
        if let QueryMatcher::Text(text) = &prime.when.query {
            let text = text.clone();
            return self.exact.insert(text, Arc::new(prime)).is_some();
        }
        let prime = Arc::new(prime);
        let existing = self
            .patterns
            .iter()
            .position(|existing| existing.when.query == prime.when.query);
        match existing {
            Some(index) => {
                self.patterns[index] = prime;
                true
            }
            None => {
                self.patterns.push(prime);
                false
            }
        }
    }

    fn find(&self, query: &str) -> Option<Arc<Prime>> {
        self.exact.get(query).cloned().or_else(|| {
            self.patterns
                .iter()
                .find(|prime| prime.when.query.matches(query))
                .cloned()
        })
    }
}

impl PrimeStore {
    pub fn new(engine: EqualityEngine) -> Self {
        Self {
            engine,
            primes: RwLock::new(PrimeTable::default()),
        }
    }

    pub fn engine(&self) -> &EqualityEngine {
        &self.engine
    }

    /// Register a prime, replacing any prime for the same query or pattern
    pub fn prime(&self, prime: Prime) {
        let query = prime.when.query.to_string();
        let replaced = self.primes.write().insert(prime);
        if replaced {
            log::info!("Replaced prime for query: {}", query);
        } else {
            log::info!("Primed query: {}", query);
        }
    }

    pub fn prime_request(&self, request: PrimeRequest) -> Result<(), PrimeError> {
        let prime = request.into_prime()?;
        self.prime(prime);
        Ok(())
    }

    /// Prime answering `query`, by exact text first and then by pattern
    pub fn get(&self, query: &str) -> Option<Arc<Prime>> {
        self.primes.read().find(query)
    }

    /// Remove the prime registered for this exact text or pattern source
    pub fn remove(&self, query: &str) -> Option<Arc<Prime>> {
        let mut table = self.primes.write();
        if let Some(prime) = table.exact.remove(query) {
            return Some(prime);
        }
        let index = table
            .patterns
            .iter()
            .position(|prime| prime.when.query.as_str() == query)?;
        Some(table.patterns.remove(index))
    }

    /// Snapshot of all registered primes
    pub fn primes(&self) -> Vec<Arc<Prime>> {
        let table = self.primes.read();
        table
            .exact
            .values()
            .chain(table.patterns.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        let table = self.primes.read();
        table.exact.len() + table.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        *self.primes.write() = PrimeTable::default();
        log::info!("Cleared all primes");
    }

    /// Action for an incoming operation, if a prime answers it
    ///
    /// The lock is released before matching so long resolutions never block
    /// re-priming.
    pub fn lookup(
        &self,
        query: &str,
        consistency: Consistency,
        actual: &[JsonValue],
    ) -> MatchResult<Option<Action>> {
        let prime = match self.get(query) {
            Some(prime) => prime,
            None => {
                log::debug!("No prime for query: {}", query);
                return Ok(None);
            }
        };

        if !prime.when.accepts_consistency(consistency) {
            log::debug!(
                "Prime for query '{}' does not accept consistency {}",
                query,
                consistency
            );
            return Ok(None);
        }

        let outcome = prime.then.resolve(&self.engine, actual)?;
        Ok(outcome.map(|outcome| outcome.action.clone()))
    }
}

impl Default for PrimeStore {
    fn default() -> Self {
        Self::new(EqualityEngine::default())
    }
}
