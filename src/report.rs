//! Ranked comparisons and result persistence.
//!
//! Measurements are ordered by throughput, fastest first. The slowdown shown
//! next to each one is computed from mean sample durations relative to the
//! fastest entry: `mean / fastest_mean * 100 - 100`.

use crate::format::format_percent;
use crate::measurement::Measurement;
use crate::result::{Ranking, SuiteResult};
use std::cmp::Ordering;
use std::path::Path;

/// Sort `measurements` fastest first and compute each one's slowdown.
///
/// The sort is stable: measurements with equal throughput keep their
/// registration order.
pub fn rank(measurements: &mut [Measurement]) -> Vec<Ranking> {
    measurements.sort_by(by_throughput_desc);

    let Some(fastest_mean) = measurements.first().map(|m| m.stats().mean()) else {
        return Vec::new();
    };

    measurements
        .iter()
        .enumerate()
        .map(|(i, m)| Ranking {
            name: m.name().to_string(),
            slower_pct: (i > 0).then(|| slowdown_pct(m.stats().mean(), fastest_mean)),
        })
        .collect()
}

/// Percent by which `mean` is slower than `fastest_mean`.
pub fn slowdown_pct(mean: f64, fastest_mean: f64) -> f64 {
    (mean / fastest_mean) * 100.0 - 100.0
}

fn by_throughput_desc(a: &Measurement, b: &Measurement) -> Ordering {
    b.stats().throughput().total_cmp(&a.stats().throughput())
}

/// Render one comparison line (without indentation).
pub fn comparison_line(ranking: &Ranking) -> String {
    match ranking.slower_pct {
        None => format!("  - {} (fastest)", ranking.name),
        Some(pct) => format!("  - {} ({}% slower)", ranking.name, format_percent(pct)),
    }
}

/// Write `result` as pretty JSON to `<output_dir>/<suite>.json`.
pub fn write_json_results(output_dir: &Path, result: &SuiteResult) -> std::io::Result<()> {
    std::fs::create_dir_all(output_dir)?;

    let filename = format!("{}.json", result.suite.replace('/', "_"));
    let path = output_dir.join(&filename);

    let json = serde_json::to_string_pretty(result).map_err(std::io::Error::other)?;

    std::fs::write(&path, json)?;
    eprintln!("  Results written to: {}", path.display());

    Ok(())
}
