//! # benc
//!
//! An in-process microbenchmark runner for comparing a handful of competing
//! implementations of the same workload.
//!
//! Each candidate is invoked repeatedly until its cumulative run time reaches
//! the group's budget (one second by default), so fast and slow candidates
//! take about the same wall-clock time. Mean and variance are accumulated in
//! constant memory, and every group with more than one candidate ends with a
//! ranked comparison.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use benc::Bench;
//!
//! let mut bench = Bench::new("bench");
//!
//! bench.group("publish", |g| {
//!     g.measure("fast", || { std::hint::black_box(fibo(5)); });
//!     g.measure("slow", || { std::hint::black_box(fibo(10)); });
//! });
//!
//! bench.finish();
//!
//! fn fibo(n: u32) -> u64 { if n < 2 { n as u64 } else { fibo(n - 1) + fibo(n - 2) } }
//! ```
//!
//! ```text
//! benc v0.1.0
//! # bench
//!   # publish
//!   fast - 26.92m i/s (±49.87%) (34.11ns/i)
//!   slow - 3.53m i/s (±165.47%) (278.89ns/i)
//!   Comparing...
//!     - fast (fastest)
//!     - slow (717.62% slower)
//! ```

mod bench;
mod benches;
mod clock;
mod config;
mod filter;
mod format;
mod group;
mod measurement;
mod report;
mod result;
mod sink;
mod stats;

pub use bench::Bench;
pub use clock::{ManualClock, MonotonicClock, TimeSource, NANOS_PER_SEC};
pub use config::{BenchConfig, OutputTarget};
pub use format::format_human;
pub use group::{Group, GroupSettings, BANNER, INDENT_STEP};
pub use measurement::Measurement;
pub use result::{GroupResult, MeasurementResult, Ranking, SuiteResult};
pub use sink::{SharedBuffer, Sink};
pub use stats::StreamingStats;

// Re-export the built-in suites so the `benc` binary (or users) can run them
pub use benches::register_benchmarks;
