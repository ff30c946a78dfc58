//! Stub fixture with a scratch directory
//!
//! Uses only the public `StubCoordinator` API.

use cqlstub::{StubConfig, StubCoordinator};
use std::path::PathBuf;

pub struct StubFixture {
    stub: StubCoordinator,
    temp_dir: tempfile::TempDir,
}

impl StubFixture {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(StubConfig::default())
    }

    pub fn with_config(config: StubConfig) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            stub: StubCoordinator::new(config),
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn stub(&self) -> &StubCoordinator {
        &self.stub
    }

    /// Write `contents` to a file in the scratch directory
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
        path
    }

    /// Prime simple queries from JSON, panicking with the error on failure
    pub fn prime_query(&self, json: &str) {
        self.stub
            .prime_query_json(json)
            .unwrap_or_else(|e| panic!("priming failed: {}", e));
    }

    pub fn prime_prepared(&self, json: &str) {
        self.stub
            .prime_prepared_json(json)
            .unwrap_or_else(|e| panic!("priming failed: {}", e));
    }

    pub fn prime_batch(&self, json: &str) {
        self.stub
            .prime_batch_json(json)
            .unwrap_or_else(|e| panic!("batch priming failed: {}", e));
    }
}
