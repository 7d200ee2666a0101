//! Broker fixture: answers an access query with grant announcements.
//!
//! Emulates the front end of the real broker: accepts the standard flag
//! arguments (`-p`, `-u`, `-c`) followed by `access <level> <path>`, and
//! prints one announcement line per group named in the
//! `P4CONFORM_FIXTURE_GROUPS` env var (`&&`-separated; `NONE` or unset means
//! no grants). Non-announcement banner text is printed around the grants so
//! tests exercise noise-skipping.

// Test fixtures require special allowances - they are not production code
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]
#![allow(clippy::exit)]

use std::env;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-p" | "-u" | "-c" => {
                let _ = iter.next();
            }
            other => rest.push(other.to_string()),
        }
    }

    if rest.first().map(String::as_str) != Some("access") {
        eprintln!("usage: [-p port] [-u user] [-c client] access <level> <path>");
        std::process::exit(2);
    }
    let level = rest.get(1).cloned().unwrap_or_default();
    let path = rest.get(2).cloned().unwrap_or_default();

    let groups = env::var("P4CONFORM_FIXTURE_GROUPS").unwrap_or_default();

    println!("Access advice for path {path}:");
    println!();
    if !groups.is_empty() && groups != "NONE" {
        for group in groups.split("&&") {
            println!("Group {group} grants {level} access to the path {path}");
        }
    }
    println!("Contact the owners above to request membership.");
}
