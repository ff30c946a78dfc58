// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for cqlstub
//!
//! Offline access to the matching core: parse type signatures, compare an
//! expected value with a wire value, and resolve a prime file against a set
//! of variables.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_match, handle_parse, handle_resolve, load_config};
