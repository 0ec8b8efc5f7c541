//! Environment Metadata Collection
//!
//! Collects the environment description stored in every report.
//!
//! ## Collected Data
//!
//! - **Harness**: crate version, build profile and compiler version
//! - **Target**: architecture, OS and family compiled for
//! - **CPU**: Model name and available parallelism
//! - **Heap**: Tracking allocator counters
//!
//! Linux-specific data (CPU model) gracefully degrades on other platforms,
//! returning "Unknown".

use pairbench_core::heap_statistics;
use pairbench_report::{EnvInfo, TargetInfo};

/// Describe the environment this process is measuring in
pub fn collect_env() -> EnvInfo {
    let build_profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };

    EnvInfo {
        harness_version: env!("CARGO_PKG_VERSION").to_string(),
        build_profile: build_profile.to_string(),
        rustc_version: option_env!("VERGEN_RUSTC_SEMVER")
            .unwrap_or("unknown")
            .to_string(),
        rustc_target: TargetInfo {
            arch: std::env::consts::ARCH.to_string(),
            os: std::env::consts::OS.to_string(),
            family: std::env::consts::FAMILY.to_string(),
        },
        arch: std::env::consts::ARCH.to_string(),
        platform: std::env::consts::OS.to_string(),
        cpu: cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: std::thread::available_parallelism().map_or(1, |n| n.get() as u32),
        heap_statistics: heap_statistics(),
    }
}

#[cfg(target_os = "linux")]
fn cpu_model() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    model_name(&cpuinfo)
}

#[cfg(not(target_os = "linux"))]
fn cpu_model() -> Option<String> {
    None
}

/// First non-empty `model name` entry of a cpuinfo listing
fn model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .filter_map(|line| line.split_once(':'))
        .filter(|(key, _)| key.trim() == "model name")
        .map(|(_, value)| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
