//! Test utilities and fixtures for p4conform integration tests.
//!
//! This crate provides fluent builder APIs and helper functions to reduce
//! boilerplate when writing tests for p4conform. It includes:
//!
//! - [`CaseBuilder`] - Fluent API for constructing test cases
//! - [`ConfigBuilder`] - Fluent API for constructing broker configs
//! - [`temp_dir`] - Create unique temporary directories
//! - [`write_fixture`] / [`write_config`] - Serialize fixture/config files
//! - [`fake_broker_script`] - Drop an executable stand-in broker script
//!
//! It also ships two fixture binaries that emulate the broker front end:
//! `p4conform-grant-broker` (prints grant announcements driven by an env var)
//! and `p4conform-reject-broker` (rejects the query with a nonzero exit).

// Test fixtures crate - relaxed lints for test utilities
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod builders;
pub mod helpers;

// Re-export commonly used items at crate root
pub use builders::{CaseBuilder, ConfigBuilder};
pub use helpers::{fake_broker_script, temp_dir, write_config, write_fixture};
