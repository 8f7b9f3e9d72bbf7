//! Suite entry point.

use crate::clock::{MonotonicClock, TimeSource};
use crate::config::{BenchConfig, OutputTarget};
use crate::group::{Group, GroupSettings};
use crate::measurement::Measurement;
use crate::report::write_json_results;
use crate::result::{GroupResult, SuiteResult};
use crate::sink::Sink;
use std::rc::Rc;
use std::time::Instant;

/// A benchmark suite: the root group plus suite-level configuration.
///
/// # Example
///
/// ```rust,no_run
/// use benc::Bench;
///
/// fn fibo(n: u32) -> u64 {
///     if n < 2 { n as u64 } else { fibo(n - 1) + fibo(n - 2) }
/// }
///
/// let mut bench = Bench::new("bench");
///
/// bench.group("publish", |g| {
///     g.measure("fast", || { std::hint::black_box(fibo(5)); });
///     g.measure("slow", || { std::hint::black_box(fibo(10)); });
/// });
///
/// let results = bench.finish();
/// ```
pub struct Bench {
    root: Group,
    config: BenchConfig,
    suite_start: Instant,
    started_at: String,
}

impl Bench {
    /// Create a suite with config from the environment and a real clock.
    pub fn new(suite: &str) -> Self {
        Self::with_config(suite, BenchConfig::from_env())
    }

    /// Create a suite with explicit config and a real clock.
    pub fn with_config(suite: &str, config: BenchConfig) -> Self {
        let sink = match config.output {
            OutputTarget::Stdout => Sink::stdout(),
            OutputTarget::Stderr => Sink::stderr(),
        };
        Self::with_parts(suite, config, sink, Rc::new(MonotonicClock::new()))
    }

    /// Create a suite writing to `sink` and timing with `clock`.
    ///
    /// `config.output` is ignored in favour of `sink`.
    pub fn with_parts(
        suite: &str,
        config: BenchConfig,
        sink: Sink,
        clock: Rc<dyn TimeSource>,
    ) -> Self {
        let mut settings = GroupSettings::new(sink, clock).target_time(config.target_time);
        if let Some(pattern) = &config.filter {
            settings = settings.filter(pattern.clone());
        }

        Self {
            started_at: unix_millis(),
            suite_start: Instant::now(),
            root: Group::new(suite, settings),
            config,
        }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// The root group.
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Measure a candidate directly in the root group.
    pub fn measure<F>(&mut self, name: &str, f: F) -> Option<&Measurement>
    where
        F: FnMut(),
    {
        self.root.measure(name, f)
    }

    pub fn measure_with<T, F>(&mut self, name: &str, data: &mut T, f: F) -> Option<&Measurement>
    where
        F: FnMut(&mut T),
    {
        self.root.measure_with(name, data, f)
    }

    /// Run a sub-group of the root group.
    pub fn group<F>(&mut self, name: &str, f: F) -> &GroupResult
    where
        F: FnOnce(&mut Group),
    {
        self.root.group(name, f)
    }

    pub fn group_with<T, F>(&mut self, name: &str, data: T, f: F) -> &GroupResult
    where
        F: FnOnce(&mut Group, T),
    {
        self.root.group_with(name, data, f)
    }

    /// Compare the root group and return the suite's results.
    ///
    /// Writes JSON when an output directory is configured; a failed write is
    /// reported as a warning and does not affect the returned results.
    pub fn finish(self) -> SuiteResult {
        let suite = self.root.name().to_string();
        let root = self.root.compare();

        let result = SuiteResult {
            suite,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: self.started_at,
            git_sha: self.config.git_sha.clone(),
            target_time: self.config.target_time,
            total_duration: self.suite_start.elapsed(),
            root,
        };

        if let Some(dir) = &self.config.output_dir {
            if let Err(e) = write_json_results(dir, &result) {
                eprintln!("Warning: failed to write JSON results: {}", e);
            }
        }

        result
    }
}

fn unix_millis() -> String {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", duration.as_millis())
}
