//! Custom Pair Example
//!
//! Registers a user-defined pair next to the demonstration set and hands the
//! registry to the pairbench CLI.
//!
//! Run with:
//!   cargo run --example custom_pair -- list
//!   cargo run --example custom_pair -- bench --pair strings --repeats 3
//!   cargo run --example custom_pair -- hot --pair strings --variant slow --loops 1000

use pairbench::prelude::*;
use std::fmt::Write;
use std::process::ExitCode;

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

/// Joining numbers: repeated `String` concatenation vs a pre-sized buffer
struct Strings;

impl Pair for Strings {
    type Input = Vec<u32>;
    type Output = String;

    fn id(&self) -> &'static str {
        "strings"
    }

    fn title(&self) -> &'static str {
        "Strings: concatenation vs pre-sized buffer"
    }

    fn make_input(&self, seed: u64) -> Vec<u32> {
        (0..2_000).map(|i| i * (seed as u32 + 1)).collect()
    }

    fn slow(&self, input: &Vec<u32>) -> String {
        let mut out = String::new();
        for (i, n) in input.iter().enumerate() {
            if i > 0 {
                out = out + ",";
            }
            out = out + &n.to_string();
        }
        out
    }

    fn fast(&self, input: &Vec<u32>) -> String {
        let mut out = String::with_capacity(input.len() * 8);
        for (i, n) in input.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{n}");
        }
        out
    }
}

fn main() -> ExitCode {
    let registry = match pairbench::pairs::registry().and_then(|r| r.with(Strings)) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match pairbench::run(&registry) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
