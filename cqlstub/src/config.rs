// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Stub configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::activity::{ActivityLog, Verifier};
use crate::consistency::Consistency;
use crate::error::ConfigError;
use crate::types::{EqualityEngine, SetMatching};

/// Activity capacity used by the strict preset
pub const STRICT_ACTIVITY_CAPACITY: usize = 10_000;

/// Matching and recording behaviour of the stub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubConfig {
    /// How expected and actual set elements are paired
    pub set_matching: SetMatching,

    /// Consistency assumed for expectations that do not name one
    pub default_consistency: Consistency,

    /// Maximum entries kept per activity kind, unbounded when absent
    pub activity_capacity: Option<usize>,

    /// Whether mismatches skipped during verification are logged
    pub log_type_mismatches: bool,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            set_matching: SetMatching::Bijective,
            default_consistency: Consistency::One,
            activity_capacity: None,
            log_type_mismatches: true,
        }
    }
}

impl StubConfig {
    /// Bijective set matching with a bounded activity log
    pub fn strict() -> Self {
        Self {
            set_matching: SetMatching::Bijective,
            default_consistency: Consistency::One,
            activity_capacity: Some(STRICT_ACTIVITY_CAPACITY),
            log_type_mismatches: true,
        }
    }

    /// One-sided set matching, as older stub releases behaved
    pub fn legacy() -> Self {
        Self {
            set_matching: SetMatching::Existence,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&contents)?;
        log::debug!("Loaded stub config from {}", path.display());
        Ok(config)
    }

    pub fn engine(&self) -> EqualityEngine {
        EqualityEngine::new(self.set_matching)
    }

    pub fn verifier(&self) -> Verifier {
        Verifier::new(self.engine(), self.default_consistency)
            .with_mismatch_logging(self.log_type_mismatches)
    }

    pub fn activity_log(&self) -> ActivityLog {
        ActivityLog::new(self.activity_capacity)
    }
}
