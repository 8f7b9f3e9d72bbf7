//! Human-scaled number rendering.

const THRESHOLD: f64 = 1000.0;
const DURATION_UNITS: [&str; 4] = ["ns", "us", "ms", "s"];
const COUNT_UNITS: [&str; 5] = ["", "k", "m", "b", "t"];

/// Render `value` with two decimals and the largest unit that keeps it under 1000.
///
/// Durations are taken as nanoseconds and stop scaling at seconds. Counts stop
/// at trillions (`t`), so anything larger is printed as a big number of them.
pub fn format_human(value: f64, is_duration: bool) -> String {
    let units: &[&str] = if is_duration {
        &DURATION_UNITS
    } else {
        &COUNT_UNITS
    };
    let cap = units.len() - 1;

    let mut value = value;
    let mut level = 0;
    while value >= THRESHOLD && level < cap {
        value /= THRESHOLD;
        level += 1;
    }

    format!("{:.2}{}", value, units[level])
}

/// Render a percentage value with two decimals (no `%` sign).
pub fn format_percent(value: f64) -> String {
    format!("{:.2}", value)
}
