//! Configuration loading from pairbench.toml
//!
//! Defaults for the command surface can be set in a `pairbench.toml` file in
//! the project root. The file is discovered by walking up from the current
//! directory. Command-line flags always win over file values.

use pairbench_core::{
    BenchOptions, DEFAULT_MEASURE_ITERATIONS, DEFAULT_REPEATS, DEFAULT_SEED,
    DEFAULT_WARMUP_ITERATIONS,
};
use pairbench_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for by [`PairbenchConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "pairbench.toml";

/// Pairbench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PairbenchConfig {
    /// Measurement protocol defaults
    #[serde(default)]
    pub bench: BenchConfig,
    /// Runner behaviour
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Measurement protocol defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Unmeasured calls per variant before the first trial
    #[serde(default = "default_warmup")]
    pub warmup: u64,
    /// Calls per trial
    #[serde(default = "default_iters")]
    pub iters: u64,
    /// Trials per variant
    #[serde(default = "default_repeats")]
    pub repeats: u64,
    /// Input seed
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Calls made by the `hot` command
    #[serde(default = "default_loops")]
    pub loops: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warmup: default_warmup(),
            iters: default_iters(),
            repeats: default_repeats(),
            seed: default_seed(),
            loops: default_loops(),
        }
    }
}

impl BenchConfig {
    /// Runner options described by this section
    pub fn options(&self) -> BenchOptions {
        BenchOptions {
            warmup_iterations: self.warmup,
            measure_iterations: self.iters,
            repeats: self.repeats,
            seed: self.seed,
        }
    }
}

fn default_warmup() -> u64 {
    DEFAULT_WARMUP_ITERATIONS
}
fn default_iters() -> u64 {
    DEFAULT_MEASURE_ITERATIONS
}
fn default_repeats() -> u64 {
    DEFAULT_REPEATS
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_loops() -> u64 {
    200_000
}

/// Runner behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunnerConfig {
    /// Ask the allocator to return free memory before every trial
    #[serde(default)]
    pub compact: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "table" or "json"
    #[serde(default)]
    pub format: OutputFormat,
    /// Also write the JSON report into `artifacts_dir`
    #[serde(default)]
    pub write_artifacts: bool,
    /// Directory for report artifacts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            write_artifacts: false,
            artifacts_dir: default_artifacts_dir(),
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts/bench")
}

impl PairbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the nearest `pairbench.toml` at or above `start`
    pub fn find_from(start: impl Into<PathBuf>) -> Option<PathBuf> {
        let mut dir = start.into();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Try to discover and load configuration by walking up from current directory.
    ///
    /// A file that exists but fails to parse is an error rather than silently
    /// ignored.
    pub fn discover() -> anyhow::Result<Option<(PathBuf, Self)>> {
        let cwd = std::env::current_dir()?;
        match Self::find_from(cwd) {
            Some(path) => {
                let config = Self::load(&path)
                    .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))?;
                Ok(Some((path, config)))
            }
            None => Ok(None),
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# pairbench configuration

[bench]
# Unmeasured calls per variant before measuring
warmup = 1500
# Calls per trial
iters = 2500
# Trials per variant
repeats = 5
# Input seed
seed = 1
# Calls made by `pairbench hot`
loops = 200000

[runner]
# Return free heap to the OS before every trial (glibc only)
compact = false

[output]
# Default output format: table or json
format = "table"
# Also write the JSON report to artifacts_dir/bench.json
write_artifacts = false
artifacts_dir = "artifacts/bench"
"#
        .to_string()
    }
}
