// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers

use colored::Colorize;
use serde_json::Value as JsonValue;
use std::path::Path;

use super::output;
use cqlstub::{
    parse_type, Consistency, PrimeRequest, PrimeStore, QueryMatcher, StubConfig, Value,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config file if one was given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<StubConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(StubConfig::from_path(path)?),
        None => Ok(StubConfig::default()),
    }
}

pub fn handle_parse(signature: &str) -> CliResult {
    let ty = parse_type(signature)?;
    println!("{}", ty.signature().bold().green());
    print!("{}", output::type_tree(&ty));
    Ok(())
}

pub fn handle_match(config: &StubConfig, signature: &str, expected: &str, actual: &str) -> CliResult {
    let ty = parse_type(signature)?;
    let expected: JsonValue = serde_json::from_str(expected)
        .map_err(|e| format!("--expected is not valid JSON: {}", e))?;
    let actual: JsonValue = serde_json::from_str(actual)
        .map_err(|e| format!("--actual is not valid JSON: {}", e))?;

    let expected = Value::from_json(&expected);
    log::debug!("Comparing {} against {} as {}", expected, actual, ty);

    let matched = config.engine().equals(&ty, &expected, &actual)?;
    println!("{}", output::match_verdict(matched));
    Ok(())
}

pub fn handle_resolve(
    config: &StubConfig,
    prime_path: &Path,
    query: Option<&str>,
    variables: &str,
    consistency: Option<Consistency>,
) -> CliResult {
    let contents = std::fs::read_to_string(prime_path)
        .map_err(|e| format!("Failed to read {}: {}", prime_path.display(), e))?;
    let prime = PrimeRequest::from_json(&contents)?.into_prime()?;
    let query = match (query, &prime.when.query) {
        (Some(query), _) => query.to_string(),
        (None, QueryMatcher::Text(text)) => text.clone(),
        (None, QueryMatcher::Pattern { source, .. }) => {
            return Err(format!("prime matches the pattern '{}', pass --query", source).into())
        }
    };

    let variables = match serde_json::from_str::<JsonValue>(variables)? {
        JsonValue::Array(items) => items,
        other => return Err(format!("--variables must be a JSON array, got {}", other).into()),
    };

    let store = PrimeStore::new(config.engine());
    store.prime(prime);

    let consistency = consistency.unwrap_or(config.default_consistency);
    match store.lookup(&query, consistency, &variables)? {
        Some(action) => println!("{}", output::action_json(&action)?),
        None => println!("{}", "unmatched".yellow()),
    }
    Ok(())
}
