// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! cqlstub CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Default to Warn (can still be overridden by RUST_LOG env var)
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Version => {
            println!("{} {}", "cqlstub".bold().green(), cqlstub::VERSION);
            println!("CQL stub server type matching");
            Ok(())
        }

        Commands::Parse { signature } => cli::handle_parse(&signature),

        Commands::Match {
            type_signature,
            expected,
            actual,
        } => cli::handle_match(&config, &type_signature, &expected, &actual),

        Commands::Resolve {
            prime,
            query,
            variables,
            consistency,
        } => cli::handle_resolve(&config, &prime, query.as_deref(), &variables, consistency),
    }
}
