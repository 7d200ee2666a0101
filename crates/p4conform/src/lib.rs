//! p4conform: a conformance-test runner for a Perforce permission broker.
//!
//! The broker under test answers `p4 access` queries with free-form text that
//! announces which group granted which access level. This crate issues one query
//! per fixture row, scrapes the ordered grant announcements out of the captured
//! output, and verifies them against a compact string-encoded expectation.

#![forbid(unsafe_code)]
// Library documentation is in progress. Public API types have docs;
// internal types will be documented in future releases.
#![allow(missing_docs)]

pub mod broker;
pub mod extract;
pub mod fixture;
pub mod model;
pub mod runner;
pub mod verify;

pub use crate::model::*;
