// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments

use clap::{Parser, Subcommand};
use cqlstub::Consistency;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cqlstub", version, about = "CQL stub server type matching tools")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<log::Level>,

    /// Stub configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a type signature and print its canonical form
    Parse {
        /// Signature such as "map<text,set<int>>"
        signature: String,
    },

    /// Compare an expected value with a wire value under a type
    Match {
        /// Declared type signature
        #[arg(long = "type", value_name = "SIGNATURE")]
        type_signature: String,

        /// Expected value as JSON
        #[arg(long, value_name = "JSON")]
        expected: String,

        /// Actual (wire) value as JSON
        #[arg(long, value_name = "JSON")]
        actual: String,
    },

    /// Resolve a prime request file against incoming variables
    Resolve {
        /// Prime request file (JSON)
        #[arg(long, value_name = "FILE")]
        prime: PathBuf,

        /// Incoming query text; defaults to the prime's own query
        #[arg(long, value_name = "TEXT")]
        query: Option<String>,

        /// Variables as a JSON array
        #[arg(long, value_name = "JSON", default_value = "[]")]
        variables: String,

        /// Consistency of the incoming operation
        #[arg(long, value_name = "LEVEL")]
        consistency: Option<Consistency>,
    },

    /// Show version information
    Version,
}
