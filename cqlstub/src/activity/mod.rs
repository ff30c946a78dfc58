// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Activity recording and verification

pub mod record;
pub mod verify;

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

pub use self::record::{
    BatchExecution, BatchQuery, BatchQueryKind, BatchType, Connection, PreparedStatementExecution,
    PreparedStatementPreparation, Query, RecordedStatement,
};
pub use self::verify::{
    ExpectedBatch, ExpectedBatchQuery, ExpectedExecution, ExpectedQuery, ExpectedStatement,
    Verifier,
};

/// Thread-safe log of received operations
///
/// With a capacity set, each kind keeps at most that many entries and drops
/// the oldest first. Reaching capacity is logged once until the next clear.
pub struct ActivityLog {
    capacity: Option<usize>,
    connections: RwLock<VecDeque<Connection>>,
    queries: RwLock<VecDeque<Query>>,
    preparations: RwLock<VecDeque<PreparedStatementPreparation>>,
    executions: RwLock<VecDeque<PreparedStatementExecution>>,
    batches: RwLock<VecDeque<BatchExecution>>,
    truncation_reported: AtomicBool,
}

impl ActivityLog {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            connections: RwLock::new(VecDeque::new()),
            queries: RwLock::new(VecDeque::new()),
            preparations: RwLock::new(VecDeque::new()),
            executions: RwLock::new(VecDeque::new()),
            batches: RwLock::new(VecDeque::new()),
            truncation_reported: AtomicBool::new(false),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn record_connection(&self, connection: Connection) {
        log::debug!("Recorded connection from {}", connection.host);
        let mut connections = self.connections.write();
        self.push_bounded(&mut connections, connection);
    }

    pub fn record_query(&self, query: Query) {
        log::debug!("Recorded query: {}", query.query);
        let mut queries = self.queries.write();
        self.push_bounded(&mut queries, query);
    }

    pub fn record_preparation(&self, preparation: PreparedStatementPreparation) {
        log::debug!(
            "Recorded prepared statement preparation: {}",
            preparation.prepared_statement_text
        );
        let mut preparations = self.preparations.write();
        self.push_bounded(&mut preparations, preparation);
    }

    pub fn record_execution(&self, execution: PreparedStatementExecution) {
        log::debug!(
            "Recorded prepared statement execution: {}",
            execution.prepared_statement_text
        );
        let mut executions = self.executions.write();
        self.push_bounded(&mut executions, execution);
    }

    pub fn record_batch(&self, batch: BatchExecution) {
        log::debug!(
            "Recorded {} batch of {} statements",
            batch.batch_type,
            batch.batch_queries.len()
        );
        let mut batches = self.batches.write();
        self.push_bounded(&mut batches, batch);
    }

    pub fn connections(&self) -> Vec<Connection> {
        self.connections.read().iter().cloned().collect()
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.read().iter().cloned().collect()
    }

    pub fn preparations(&self) -> Vec<PreparedStatementPreparation> {
        self.preparations.read().iter().cloned().collect()
    }

    pub fn executions(&self) -> Vec<PreparedStatementExecution> {
        self.executions.read().iter().cloned().collect()
    }

    pub fn batches(&self) -> Vec<BatchExecution> {
        self.batches.read().iter().cloned().collect()
    }

    pub fn clear_connections(&self) {
        self.connections.write().clear();
        self.rearm_truncation_warning();
    }

    pub fn clear_queries(&self) {
        self.queries.write().clear();
        self.rearm_truncation_warning();
    }

    pub fn clear_preparations(&self) {
        self.preparations.write().clear();
        self.rearm_truncation_warning();
    }

    pub fn clear_executions(&self) {
        self.executions.write().clear();
        self.rearm_truncation_warning();
    }

    pub fn clear_batches(&self) {
        self.batches.write().clear();
        self.rearm_truncation_warning();
    }

    pub fn clear(&self) {
        self.clear_connections();
        self.clear_queries();
        self.clear_preparations();
        self.clear_executions();
        self.clear_batches();
    }

    fn rearm_truncation_warning(&self) {
        self.truncation_reported.store(false, Ordering::Relaxed);
    }

    fn push_bounded<T>(&self, entries: &mut VecDeque<T>, entry: T) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while entries.len() >= capacity {
                entries.pop_front();
                if !self.truncation_reported.swap(true, Ordering::Relaxed) {
                    log::warn!(
                        "Activity log reached its capacity of {} entries, dropping oldest entries",
                        capacity
                    );
                }
            }
        }
        entries.push_back(entry);
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::unbounded()
    }
}
