//! Configuration for a benchmark suite.

use std::path::PathBuf;
use std::time::Duration;

/// Where group output is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Configuration for a benchmark suite.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Cumulative sampled time after which a measurement stops.
    pub target_time: Duration,
    /// Stream the human-readable report goes to.
    pub output: OutputTarget,
    /// Directory for JSON results. Nothing is written when unset.
    pub output_dir: Option<PathBuf>,
    /// Only run measurements whose name matches this pattern.
    pub filter: Option<String>,
    /// Git SHA to include in results (for regression tracking).
    pub git_sha: Option<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            target_time: Duration::from_secs(1),
            output: OutputTarget::Stdout,
            output_dir: None,
            filter: None,
            git_sha: None,
        }
    }
}

impl BenchConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from environment variables.
    ///
    /// Supported variables:
    /// - `BENCH_TARGET_MS`: sampling budget per measurement (default: 1000)
    /// - `BENCH_OUTPUT_DIR`: directory for JSON results
    /// - `BENCH_FILTER`: filter measurements by name
    /// - `BENCH_GIT_SHA`: git commit hash
    /// - `BENCH_STDERR`: print the report to stderr instead of stdout
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("BENCH_TARGET_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                cfg.target_time = Duration::from_millis(ms);
            }
        }
        if let Ok(v) = std::env::var("BENCH_OUTPUT_DIR") {
            cfg.output_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("BENCH_FILTER") {
            cfg.filter = Some(v);
        }
        if let Ok(v) = std::env::var("BENCH_GIT_SHA") {
            cfg.git_sha = Some(v);
        }
        if let Ok(v) = std::env::var("BENCH_STDERR") {
            if v != "0" && !v.eq_ignore_ascii_case("false") {
                cfg.output = OutputTarget::Stderr;
            }
        }

        if cfg.git_sha.is_none() {
            cfg.git_sha = detect_git_sha();
        }

        cfg
    }

    /// Set the sampling budget per measurement.
    ///
    /// See [`crate::GroupSettings::target_time`] for how a zero budget behaves.
    pub fn target_time(mut self, duration: Duration) -> Self {
        self.target_time = duration;
        self
    }

    /// Set the output stream.
    pub fn output(mut self, target: OutputTarget) -> Self {
        self.output = target;
        self
    }

    /// Set the JSON output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set filter pattern.
    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Clear filter pattern.
    pub fn no_filter(mut self) -> Self {
        self.filter = None;
        self
    }

    /// Set git SHA.
    pub fn git_sha(mut self, sha: impl Into<String>) -> Self {
        self.git_sha = Some(sha.into());
        self
    }
}

fn detect_git_sha() -> Option<String> {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|o| {
            if o.status.success() {
                String::from_utf8(o.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
}
