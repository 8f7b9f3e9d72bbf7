//! Benchmark result types.

use crate::measurement::Measurement;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Snapshot of one measurement's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub name: String,
    /// Number of timed invocations
    pub samples: u64,
    /// Cumulative sampled time in nanoseconds
    pub total_ns: u64,
    /// Mean invocation time in nanoseconds
    pub mean_ns: f64,
    /// Population standard deviation in nanoseconds
    pub stddev_ns: f64,
    /// Standard deviation as a percentage of the mean
    pub relative_stddev_pct: f64,
    /// Invocations per second of sampled time
    pub ops_per_sec: f64,
}

impl From<&Measurement> for MeasurementResult {
    fn from(m: &Measurement) -> Self {
        let stats = m.stats();
        Self {
            name: m.name().to_string(),
            samples: stats.count(),
            total_ns: stats.total(),
            mean_ns: stats.mean(),
            stddev_ns: stats.stddev(),
            relative_stddev_pct: stats.relative_stddev(),
            ops_per_sec: stats.throughput(),
        }
    }
}

/// One line of a group's comparison, in ranked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub name: String,
    /// How much slower than the fastest, in percent. `None` for the fastest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slower_pct: Option<f64>,
}

/// Results of a group and, recursively, its sub-groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupResult {
    pub name: String,
    /// Measurements registered directly in this group
    pub measurements: Vec<MeasurementResult>,
    /// Ranked comparison (empty when fewer than two measurements)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comparison: Vec<Ranking>,
    /// Sub-groups, in the order they ran
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupResult>,
}

impl GroupResult {
    /// Look up a measurement registered directly in this group.
    pub fn measurement(&self, name: &str) -> Option<&MeasurementResult> {
        self.measurements.iter().find(|m| m.name == name)
    }

    /// Look up a nested group by a `/`-separated path of group names.
    pub fn find(&self, path: &str) -> Option<&GroupResult> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |group, segment| {
                group.groups.iter().find(|g| g.name == segment)
            })
    }
}

/// Results for an entire benchmark suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    /// Suite (root group) name
    pub suite: String,
    /// Version of the tool that produced the results
    pub version: String,
    /// Timestamp when suite started (unix millis)
    pub started_at: String,
    /// Git commit hash (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_sha: Option<String>,
    /// Sampling budget per measurement
    #[serde(with = "duration_serde")]
    pub target_time: Duration,
    /// Wall-clock duration of the whole suite
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    pub root: GroupResult,
}

impl SuiteResult {
    /// Load a suite result from JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Look up a group by path relative to the root; empty path is the root.
    pub fn find(&self, path: &str) -> Option<&GroupResult> {
        self.root.find(path)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_nanos().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let nanos = u128::deserialize(d)?;
        Ok(Duration::from_nanos(nanos as u64))
    }
}
