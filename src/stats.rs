//! Streaming statistics over duration samples.

use crate::clock::NANOS_PER_SEC;
use serde::{Deserialize, Serialize};

/// Constant-memory accumulator of nanosecond samples.
///
/// Uses Welford's online update so mean and variance never need the
/// individual samples, however many are pushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamingStats {
    count: u64,
    total: u64,
    mean: f64,
    d_squared: f64,
}

impl StreamingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample, in nanoseconds.
    pub fn push(&mut self, value: u64) {
        self.count += 1;
        self.total = self.total.saturating_add(value);

        let value = value as f64;
        let new_mean = self.mean + (value - self.mean) / self.count as f64;
        self.d_squared += (value - new_mean) * (value - self.mean);
        self.mean = new_mean;
    }

    /// Number of samples recorded.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of all samples, in nanoseconds.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Mean sample duration, in nanoseconds.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Running sum of squared deviations from the mean.
    pub fn d_squared(&self) -> f64 {
        self.d_squared
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Population variance. NaN when no samples were recorded.
    pub fn variance(&self) -> f64 {
        self.d_squared / self.count as f64
    }

    /// Population standard deviation, in nanoseconds.
    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard deviation as a percentage of the mean.
    pub fn relative_stddev(&self) -> f64 {
        if self.mean == 0.0 {
            return 0.0;
        }
        self.stddev() / self.mean * 100.0
    }

    /// Operations per second over the cumulative sampled time.
    pub fn throughput(&self) -> f64 {
        self.count as f64 * NANOS_PER_SEC as f64 / self.total as f64
    }
}
