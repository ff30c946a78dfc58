//! Test utilities for cqlstub integration tests
//!
//! - assertions: one-line checks over the equality engine
//! - stub_fixture: a coordinator with a scratch directory for prime and config files

#![allow(dead_code)]

pub mod assertions;
pub mod stub_fixture;
