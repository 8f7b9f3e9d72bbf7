//! benc: run the built-in benchmark suites.
//!
//! Settings come from `BENCH_*` environment variables first and are then
//! overridden by command-line flags.
//!
//! ```text
//! benc                          # run everything with a 1s budget
//! benc --time-ms 200            # shorter budget per measurement
//! benc --filter 'vec*'          # only matching measurements
//! benc --output-dir target/benc # also write JSON results
//! ```

use anyhow::{bail, ensure, Result};
use benc::{register_benchmarks, Bench, BenchConfig, GroupResult, OutputTarget};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(
    name = "benc",
    version,
    about = "Adaptive-time microbenchmarks with grouped comparisons"
)]
struct Args {
    /// Suite name printed in the root header
    #[arg(long, default_value = "bench")]
    name: String,

    /// Sampling budget per measurement, in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Only run measurements whose name matches (glob with `*`, else substring)
    #[arg(long)]
    filter: Option<String>,

    /// Directory for JSON results
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the report to stderr instead of stdout
    #[arg(long)]
    stderr: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args, BenchConfig::from_env())?;

    let mut bench = Bench::with_config(&args.name, config);
    register_benchmarks(&mut bench);
    let result = bench.finish();

    if count_measurements(&result.root) == 0 {
        bail!("no measurements matched the filter");
    }
    Ok(())
}

fn build_config(args: &Args, mut config: BenchConfig) -> Result<BenchConfig> {
    if let Some(ms) = args.time_ms {
        ensure!(ms > 0, "--time-ms must be greater than zero");
        config = config.target_time(Duration::from_millis(ms));
    }
    if let Some(pattern) = &args.filter {
        config = config.filter(pattern.clone());
    }
    if let Some(dir) = &args.output_dir {
        config = config.output_dir(dir.clone());
    }
    if args.stderr {
        config = config.output(OutputTarget::Stderr);
    }
    Ok(config)
}

fn count_measurements(group: &GroupResult) -> usize {
    group.measurements.len() + group.groups.iter().map(count_measurements).sum::<usize>()
}
