//! Named measurements.

use crate::format::format_human;
use crate::stats::StreamingStats;

/// One candidate implementation and the statistics gathered for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    name: String,
    stats: StreamingStats,
}

impl Measurement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: StreamingStats::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &StreamingStats {
        &self.stats
    }

    pub(crate) fn record(&mut self, nanos: u64) {
        self.stats.push(nanos);
    }

    /// One-line result: `<throughput> i/s (±<stddev>%) (<mean>/i)`.
    ///
    /// The spread column is the raw standard deviation in nanoseconds.
    ///
    /// Only meaningful once at least one sample was recorded.
    pub fn summary(&self) -> String {
        format!(
            "{} i/s (±{:.2}%) ({}/i)",
            format_human(self.stats.throughput(), false),
            self.stats.stddev(),
            format_human(self.stats.mean(), true),
        )
    }
}
