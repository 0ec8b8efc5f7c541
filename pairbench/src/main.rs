//! `pairbench` binary: the demonstration pairs behind the CLI.

use pairbench::TrackingAllocator;
use std::process::ExitCode;

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

fn main() -> ExitCode {
    let registry = match pairbench::pairs::registry() {
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
