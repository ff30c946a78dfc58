// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Primes for batches
//!
//! A batch prime names the statements of the batch in order, each with its
//! kind. It answers a batch whose statements have exactly those texts and
//! kinds, optionally restricted by consistency and batch type. Variables play
//! no part in selecting a batch prime.
//!
//! ```json
//! {
//!   "when": {
//!     "queries": [{"text": "insert into people (name) values (?)", "kind": "prepared_statement"}],
//!     "consistency": ["ONE"],
//!     "batch_type": "UNLOGGED"
//!   },
//!   "then": {"result": "write_request_timeout"}
//! }
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::Action;
use crate::activity::{BatchExecution, BatchQueryKind, BatchType};
use crate::consistency::Consistency;
use crate::error::PrimeError;

/// One statement a batch prime expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchQueryPrime {
    pub text: String,
    #[serde(default)]
    pub kind: BatchQueryKind,
}

impl BatchQueryPrime {
    pub fn new(text: impl Into<String>, kind: BatchQueryKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchWhen {
    pub queries: Vec<BatchQueryPrime>,
    /// Accepted levels; empty accepts every level
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consistency: Vec<Consistency>,
    /// `None` accepts every batch type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_type: Option<BatchType>,
}

impl BatchWhen {
    pub fn new(queries: Vec<BatchQueryPrime>) -> Self {
        Self {
            queries,
            ..Self::default()
        }
    }

    pub fn with_consistency(mut self, consistency: Vec<Consistency>) -> Self {
        self.consistency = consistency;
        self
    }

    pub fn with_batch_type(mut self, batch_type: BatchType) -> Self {
        self.batch_type = Some(batch_type);
        self
    }

    pub fn accepts(&self, batch: &BatchExecution) -> bool {
        if !self.consistency.is_empty() && !self.consistency.contains(&batch.consistency) {
            return false;
        }
        if self.batch_type.is_some_and(|wanted| wanted != batch.batch_type) {
            return false;
        }
        self.queries.len() == batch.batch_queries.len()
            && self
                .queries
                .iter()
                .zip(&batch.batch_queries)
                .all(|(wanted, actual)| wanted.text == actual.query && wanted.kind == actual.kind)
    }
}

/// A registered batch prime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPrime {
    pub when: BatchWhen,
    #[serde(default)]
    pub then: Action,
}

impl BatchPrime {
    pub fn new(when: BatchWhen, then: Action) -> Self {
        Self { when, then }
    }

    /// Parse and validate a JSON batch prime
    pub fn from_json(json: &str) -> Result<Self, PrimeError> {
        let prime: BatchPrime =
            serde_json::from_str(json).map_err(|e| PrimeError::InvalidRequest(e.to_string()))?;
        prime.validate()?;
        Ok(prime)
    }

    fn validate(&self) -> Result<(), PrimeError> {
        if self.when.queries.is_empty()
            || self.when.queries.iter().any(|q| q.text.trim().is_empty())
        {
            return Err(PrimeError::MissingQuery);
        }
        Ok(())
    }
}

/// Thread-safe batch prime registry
///
/// Batch primes are tried in the order they were registered. Priming the same
/// `when` again replaces the earlier prime in place.
#[derive(Default)]
pub struct BatchPrimeStore {
    primes: RwLock<Vec<Arc<BatchPrime>>>,
}

impl BatchPrimeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prime(&self, prime: BatchPrime) -> Result<(), PrimeError> {
        prime.validate()?;
        let mut primes = self.primes.write();
        let size = prime.when.queries.len();
        match primes.iter().position(|existing| existing.when == prime.when) {
            Some(index) => {
                primes[index] = Arc::new(prime);
                log::info!("Replaced batch prime of {} statements", size);
            }
            None => {
                primes.push(Arc::new(prime));
                log::info!("Primed batch of {} statements", size);
            }
        }
        Ok(())
    }

    pub fn primes(&self) -> Vec<Arc<BatchPrime>> {
        self.primes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.primes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.read().is_empty()
    }

    pub fn clear(&self) {
        self.primes.write().clear();
        log::info!("Cleared all batch primes");
    }

    /// Action for an incoming batch, if a prime answers it
    pub fn lookup(&self, batch: &BatchExecution) -> Option<Action> {
        let found = self
            .primes
            .read()
            .iter()
            .find(|prime| prime.when.accepts(batch))
            .map(|prime| prime.then.clone());
        if found.is_none() {
            log::debug!(
                "No prime for {} batch of {} statements",
                batch.batch_type,
                batch.batch_queries.len()
            );
        }
        found
    }
}
