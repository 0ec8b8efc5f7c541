#![warn(missing_docs)]
//! Pairbench CLI Library
//!
//! Command-line surface for pair benchmark binaries. Build a registry and
//! hand it to [`run`] from `main`:
//!
//! ```ignore
//! fn main() -> std::process::ExitCode {
//!     let registry = pairbench_pairs::registry().expect("pair ids are unique");
//!     pairbench_cli::run(&registry).unwrap_or(std::process::ExitCode::FAILURE)
//! }
//! ```
//!
//! Logs go to stderr so stdout carries only the report (or the hot-loop
//! line) and can be piped.

mod config;
mod executor;

pub use config::*;
pub use executor::{ComparisonDriver, HotOutcome, collect_env, run_hot, system_compaction};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pairbench_core::{
    BenchOptions, PairRegistry, PairSelector, Runner, VariantSelector,
};
use pairbench_report::{OutputFormat, Report, RunConfig, generate_json_report};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Name of the JSON artifact written by `--write-artifacts`
pub const ARTIFACT_FILE_NAME: &str = "bench.json";

/// Pairbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "pairbench")]
#[command(author, version, about = "Measure slow/fast implementation pairs side by side")]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Measure pairs and report statistics
    Bench(BenchArgs),
    /// Call one variant repeatedly with no measurement, for external profilers
    Hot(HotArgs),
    /// List registered pairs
    List,
    /// Write a default pairbench.toml into the current directory
    Init(InitArgs),
}

/// Arguments of `pairbench bench`
#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// Pair to run: `all` or a pair id
    #[arg(long, default_value = "all")]
    pub pair: PairSelector,

    /// Variants to run: `both`, `slow` or `fast`
    #[arg(long, default_value = "both")]
    pub variant: VariantSelector,

    /// Unmeasured calls per variant [default: 1500]
    #[arg(long)]
    pub warmup: Option<u64>,

    /// Calls per trial [default: 2500]
    #[arg(long)]
    pub iters: Option<u64>,

    /// Trials per variant [default: 5]
    #[arg(long)]
    pub repeats: Option<u64>,

    /// Input seed [default: 1]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format: table or json [default: table]
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Also write the JSON report to the artifacts directory
    #[arg(long)]
    pub write_artifacts: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Return free heap to the OS before every trial (glibc only)
    #[arg(long)]
    pub compact: bool,
}

/// Arguments of `pairbench hot`
#[derive(Args, Debug, Clone)]
pub struct HotArgs {
    /// Pair id
    #[arg(long)]
    pub pair: PairSelector,

    /// `slow` or `fast`
    #[arg(long)]
    pub variant: VariantSelector,

    /// Number of calls [default: 200000]
    #[arg(long)]
    pub loops: Option<u64>,

    /// Input seed [default: 1]
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments of `pairbench init`
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite an existing pairbench.toml
    #[arg(long)]
    pub force: bool,
}

/// Run the pairbench CLI over `registry` with the process arguments.
/// This is the main entry point for benchmark binaries.
///
/// # Returns
/// The exit code to terminate with: failure when any correctness violation
/// was found. Configuration and I/O problems are returned as errors.
pub fn run(registry: &PairRegistry) -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    run_with_cli(cli, registry)
}

/// Run the pairbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, registry: &PairRegistry) -> anyhow::Result<ExitCode> {
    init_logging(cli.verbose);

    // init must work even when an existing file fails to parse
    if let Commands::Init(ref args) = cli.command {
        let cwd = std::env::current_dir()?;
        let path = write_default_config(&cwd, args.force)?;
        eprintln!("wrote: {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    // Discover pairbench.toml configuration (CLI flags override)
    let config = match PairbenchConfig::discover()? {
        Some((path, config)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            config
        }
        None => PairbenchConfig::default(),
    };

    match cli.command {
        Commands::List => {
            list_pairs(registry);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Bench(ref args) => run_bench(args, &config, registry),
        Commands::Hot(ref args) => run_hot_command(args, &config, registry),
        Commands::Init(_) => Ok(ExitCode::SUCCESS),
    }
}

/// Initialise stderr logging. `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "pairbench=debug"
    } else {
        "pairbench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second initialisation (e.g. repeated runs in one test binary) keeps
    // the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn list_pairs(registry: &PairRegistry) {
    for pair in registry.iter() {
        println!("{}\t{}", pair.id(), pair.title());
    }
    println!("{} pairs registered.", registry.len());
}

/// Layer options: built-in defaults → pairbench.toml → CLI flags.
fn build_bench_options(args: &BenchArgs, config: &BenchConfig) -> BenchOptions {
    let file = config.options();
    BenchOptions {
        warmup_iterations: args.warmup.unwrap_or(file.warmup_iterations),
        measure_iterations: args.iters.unwrap_or(file.measure_iterations),
        repeats: args.repeats.unwrap_or(file.repeats),
        seed: args.seed.unwrap_or(file.seed),
    }
}

fn run_bench(
    args: &BenchArgs,
    config: &PairbenchConfig,
    registry: &PairRegistry,
) -> anyhow::Result<ExitCode> {
    let options = build_bench_options(args, &config.bench);
    let format = args.format.unwrap_or(config.output.format);
    let write_artifacts = args.write_artifacts || config.output.write_artifacts;
    let compact = args.compact || config.runner.compact;

    let run_config = RunConfig {
        command: "bench".to_string(),
        pair: args.pair.to_string(),
        variant: args.variant,
        warmup: options.warmup_iterations,
        iters: options.measure_iterations,
        repeats: options.repeats,
        seed: options.seed,
        format,
        write_artifacts,
        compact,
    };

    let mut runner = Runner::new(options);
    if compact {
        match system_compaction() {
            Some(hook) => runner = runner.with_compaction(hook),
            None => tracing::warn!("--compact requested but this platform has no compaction hook"),
        }
    }

    let driver = ComparisonDriver::new(registry, runner).with_progress(true);
    let report = driver.compare(&args.pair, args.variant, &run_config)?;

    let output = format.render(&report).context("failed to render report")?;
    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        }
        None => print!("{}", output),
    }

    if write_artifacts {
        let path = write_artifact(&report, &config.output.artifacts_dir)?;
        eprintln!("wrote: {}", path.display());
    }

    if !report.is_clean() {
        eprintln!("\n{} correctness failure(s)", report.failures.len());
        for failure in &report.failures {
            eprintln!("  {}", failure.message);
        }
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Write the JSON report as `<dir>/bench.json`, creating `dir` if needed.
pub fn write_artifact(report: &Report, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create artifacts directory {}", dir.display()))?;
    let path = dir.join(ARTIFACT_FILE_NAME);
    let json = generate_json_report(report)?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Write [`PairbenchConfig::default_toml`] to `<dir>/pairbench.toml`.
///
/// An existing file is left untouched unless `force` is set.
pub fn write_default_config(dir: &Path, force: bool) -> anyhow::Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::write(&path, PairbenchConfig::default_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn run_hot_command(
    args: &HotArgs,
    config: &PairbenchConfig,
    registry: &PairRegistry,
) -> anyhow::Result<ExitCode> {
    let loops = args.loops.unwrap_or(config.bench.loops);
    let seed = args.seed.unwrap_or(config.bench.seed);

    let outcome = run_hot(registry, &args.pair, args.variant, loops, seed)?;
    println!("{}", serde_json::to_string(&outcome)?);

    if let Some(ref problem) = outcome.problem {
        eprintln!("malformed output from {}/{}: {}", outcome.pair, outcome.variant, problem);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pairbench").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_bench_defaults() {
        let cli = parse(&["bench"]);
        let Commands::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.pair, PairSelector::All);
        assert_eq!(args.variant, VariantSelector::Both);
        assert!(args.format.is_none());
        assert_eq!(
            build_bench_options(&args, &BenchConfig::default()),
            BenchOptions::default()
        );
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "bench", "--pair", "shape", "--variant", "fast", "--iters", "7", "--format", "json",
        ]);
        let Commands::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        let file = BenchConfig {
            iters: 100,
            repeats: 9,
            ..BenchConfig::default()
        };
        let options = build_bench_options(&args, &file);
        assert_eq!(options.measure_iterations, 7);
        assert_eq!(options.repeats, 9);
        assert_eq!(args.pair, PairSelector::Id("shape".into()));
        assert_eq!(args.variant, VariantSelector::Fast);
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_config_file_values_apply_without_flags() {
        let Commands::Bench(args) = parse(&["bench"]).command else {
            panic!("expected bench");
        };
        let file = BenchConfig {
            warmup: 3,
            iters: 4,
            repeats: 5,
            seed: 6,
            loops: 7,
        };
        assert_eq!(build_bench_options(&args, &file), file.options());
    }

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = std::env::temp_dir().join(format!("pairbench-init-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = write_default_config(&dir, false).unwrap();
        assert_eq!(path, dir.join(CONFIG_FILE_NAME));
        assert_eq!(PairbenchConfig::load(&path).unwrap(), PairbenchConfig::default());

        std::fs::write(&path, "[bench]\nrepeats = 2\n").unwrap();
        let err = write_default_config(&dir, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(PairbenchConfig::load(&path).unwrap().bench.repeats, 2);

        write_default_config(&dir, true).unwrap();
        assert_eq!(PairbenchConfig::load(&path).unwrap().bench.repeats, 5);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_init_parses_force() {
        let Commands::Init(args) = parse(&["init", "--force"]).command else {
            panic!("expected init");
        };
        assert!(args.force);
    }

    #[test]
    fn test_invalid_selectors_rejected_by_parser() {
        let bad_variant = ["pairbench", "bench", "--variant", "medium"];
        assert!(Cli::try_parse_from(bad_variant).is_err());
        let bad_format = ["pairbench", "bench", "--format", "html"];
        assert!(Cli::try_parse_from(bad_format).is_err());
    }

    #[test]
    fn test_hot_args_and_global_verbose() {
        let cli = parse(&["hot", "--pair", "arrays", "--variant", "slow", "--loops", "10", "-v"]);
        assert!(cli.verbose);
        let Commands::Hot(args) = cli.command else {
            panic!("expected hot");
        };
        assert_eq!(args.loops, Some(10));
        assert_eq!(args.variant, VariantSelector::Slow);
    }

    #[test]
    fn test_bench_writes_output_and_artifact() {
        let dir = std::env::temp_dir().join(format!("pairbench-cli-{}", std::process::id()));
        let out = dir.join("report.json");
        let artifacts = dir.join("artifacts");
        std::fs::create_dir_all(&dir).unwrap();

        let registry = pairbench_pairs::registry().unwrap();
        let args = BenchArgs {
            pair: PairSelector::Id("closures".into()),
            variant: VariantSelector::Both,
            warmup: Some(0),
            iters: Some(1),
            repeats: Some(2),
            seed: Some(1),
            format: Some(OutputFormat::Json),
            write_artifacts: true,
            output: Some(out.clone()),
            compact: true,
        };
        let mut config = PairbenchConfig::default();
        config.output.artifacts_dir = artifacts.clone();

        let code = run_bench(&args, &config, &registry).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["args"]["pair"], "closures");
        assert_eq!(written["args"]["repeats"], 2);
        assert_eq!(written["results"].as_array().unwrap().len(), 2);
        assert!(artifacts.join(ARTIFACT_FILE_NAME).exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bench_unknown_pair_is_error() {
        let registry = pairbench_pairs::registry().unwrap();
        let cli = parse(&["bench", "--pair", "pairZ"]);
        let Commands::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        let err = run_bench(&args, &PairbenchConfig::default(), &registry).unwrap_err();
        assert!(err.to_string().contains("Unknown pair: pairZ"));
    }
}
