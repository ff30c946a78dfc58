// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Entry point tying primes, activity and verification together
//!
//! The network front end hands each received operation to the matching
//! `handle_*` method; the operation is recorded and the matching prime's
//! action, if any, is returned. Queries, prepared statements and batches are
//! primed into separate stores, so a query prime never answers an execution of
//! the same text. Test code checks what was sent with the `verify_*` methods.

use crate::activity::{
    ActivityLog, BatchExecution, Connection, ExpectedBatch, ExpectedStatement,
    PreparedStatementExecution, PreparedStatementPreparation, Query, Verifier,
};
use crate::config::StubConfig;
use crate::error::{MatchResult, StubResult};
use crate::prime::{Action, BatchPrime, BatchPrimeStore, Prime, PrimeRequest, PrimeStore};
use crate::types::CqlType;

pub struct StubCoordinator {
    config: StubConfig,
    query_primes: PrimeStore,
    prepared_primes: PrimeStore,
    batch_primes: BatchPrimeStore,
    activity: ActivityLog,
    verifier: Verifier,
}

impl StubCoordinator {
    pub fn new(config: StubConfig) -> Self {
        log::debug!("Creating stub coordinator with {:?}", config);
        Self {
            query_primes: PrimeStore::new(config.engine()),
            prepared_primes: PrimeStore::new(config.engine()),
            batch_primes: BatchPrimeStore::new(),
            activity: config.activity_log(),
            verifier: config.verifier(),
            config,
        }
    }

    pub fn config(&self) -> &StubConfig {
        &self.config
    }

    pub fn query_primes(&self) -> &PrimeStore {
        &self.query_primes
    }

    pub fn prepared_primes(&self) -> &PrimeStore {
        &self.prepared_primes
    }

    pub fn batch_primes(&self) -> &BatchPrimeStore {
        &self.batch_primes
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn prime_query(&self, prime: Prime) {
        self.query_primes.prime(prime);
    }

    pub fn prime_prepared(&self, prime: Prime) {
        self.prepared_primes.prime(prime);
    }

    pub fn prime_batch(&self, prime: BatchPrime) -> StubResult<()> {
        self.batch_primes.prime(prime)?;
        Ok(())
    }

    /// Parse and register a JSON prime for simple queries
    pub fn prime_query_json(&self, json: &str) -> StubResult<()> {
        let request = PrimeRequest::from_json(json)?;
        self.query_primes.prime_request(request)?;
        Ok(())
    }

    /// Parse and register a JSON prime for prepared statements
    pub fn prime_prepared_json(&self, json: &str) -> StubResult<()> {
        let request = PrimeRequest::from_json(json)?;
        self.prepared_primes.prime_request(request)?;
        Ok(())
    }

    pub fn prime_batch_json(&self, json: &str) -> StubResult<()> {
        self.prime_batch(BatchPrime::from_json(json)?)
    }

    pub fn handle_connection(&self, connection: Connection) {
        self.activity.record_connection(connection);
    }

    /// Record a query and pick its response
    pub fn handle_query(&self, query: Query) -> StubResult<Option<Action>> {
        let action = self
            .query_primes
            .lookup(&query.query, query.consistency, &query.variables);
        self.activity.record_query(query);
        Ok(action?)
    }

    /// Record a preparation, returning the variable types its prime declares
    pub fn handle_preparation(
        &self,
        preparation: PreparedStatementPreparation,
    ) -> Option<Vec<CqlType>> {
        let types = self
            .prepared_primes
            .get(&preparation.prepared_statement_text)
            .map(|prime| prime.then.variable_types().to_vec());
        self.activity.record_preparation(preparation);
        types
    }

    /// Record a prepared statement execution and pick its response
    pub fn handle_execution(
        &self,
        execution: PreparedStatementExecution,
    ) -> StubResult<Option<Action>> {
        let action = self.prepared_primes.lookup(
            &execution.prepared_statement_text,
            execution.consistency,
            &execution.variables,
        );
        self.activity.record_execution(execution);
        Ok(action?)
    }

    /// Record a batch and pick its response
    pub fn handle_batch(&self, batch: BatchExecution) -> Option<Action> {
        let action = self.batch_primes.lookup(&batch);
        self.activity.record_batch(batch);
        action
    }

    pub fn verify_query(&self, expected: &ExpectedStatement) -> MatchResult<bool> {
        self.verifier.matches_any(expected, &self.activity.queries())
    }

    pub fn verify_execution(&self, expected: &ExpectedStatement) -> MatchResult<bool> {
        self.verifier.matches_any(expected, &self.activity.executions())
    }

    pub fn verify_batch(&self, expected: &ExpectedBatch) -> MatchResult<bool> {
        self.verifier.matches_any_batch(expected, &self.activity.batches())
    }

    pub fn clear_query_primes(&self) {
        self.query_primes.clear();
    }

    pub fn clear_prepared_primes(&self) {
        self.prepared_primes.clear();
    }

    pub fn clear_batch_primes(&self) {
        self.batch_primes.clear();
    }

    pub fn clear_all_primes(&self) {
        self.clear_query_primes();
        self.clear_prepared_primes();
        self.clear_batch_primes();
    }

    /// Forget all primes and recorded activity
    pub fn reset(&self) {
        self.clear_all_primes();
        self.activity.clear();
    }
}

impl Default for StubCoordinator {
    fn default() -> Self {
        Self::new(StubConfig::default())
    }
}
