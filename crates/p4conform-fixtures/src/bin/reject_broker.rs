//! Broker fixture: rejects the query with a nonzero exit.
//!
//! Used for testing the `ERROR` expectation path. The exit code can be
//! overridden with `P4CONFORM_FIXTURE_EXIT` (default 1).

// Test fixtures require special allowances - they are not production code
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]
#![allow(clippy::exit)]

use std::env;

fn main() {
    let code: i32 = env::var("P4CONFORM_FIXTURE_EXIT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(1);

    println!("action: REJECT");
    eprintln!("message: Failed to get protections, please contact support");

    std::process::exit(code);
}
