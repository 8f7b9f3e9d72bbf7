//! Groups of measurements and the adaptive sampling loop.
//!
//! A [`Group`] prints a `# <name>` header when created, samples each
//! registered candidate until its cumulative sampled time reaches the group's
//! budget, and prints a ranked comparison when it is consumed by
//! [`Group::compare`]. Sub-groups are independent groups indented two spaces
//! deeper; they are compared and dropped as soon as their entry closure
//! returns, so a group's comparison only covers its own measurements.

use crate::clock::TimeSource;
use crate::filter;
use crate::measurement::Measurement;
use crate::report;
use crate::result::{GroupResult, MeasurementResult};
use crate::sink::Sink;
use std::rc::Rc;
use std::time::Duration;

/// First line printed by a root group.
pub const BANNER: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// Indentation added per nesting level.
pub const INDENT_STEP: usize = 2;

/// Everything a group needs besides its name. Fixed once the group exists.
#[derive(Clone)]
pub struct GroupSettings {
    sink: Sink,
    indent: usize,
    target_time: Duration,
    clock: Rc<dyn TimeSource>,
    filter: Option<String>,
}

impl GroupSettings {
    /// Root settings: no indentation, one second budget, no filter.
    pub fn new(sink: Sink, clock: Rc<dyn TimeSource>) -> Self {
        Self {
            sink,
            indent: 0,
            target_time: Duration::from_secs(1),
            clock,
            filter: None,
        }
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Cumulative sampled time after which a measurement stops.
    ///
    /// A zero budget samples each candidate exactly once. A candidate that
    /// finishes within one clock tick then records 0ns in total, which reports
    /// infinite throughput and an infinite slowdown for the others.
    pub fn target_time(mut self, duration: Duration) -> Self {
        self.target_time = duration;
        self
    }

    pub fn filter(mut self, pattern: impl Into<String>) -> Self {
        self.filter = Some(pattern.into());
        self
    }

    /// Settings for a sub-group: same sink, clock, budget and filter.
    fn nested(&self) -> Self {
        Self {
            indent: self.indent + INDENT_STEP,
            ..self.clone()
        }
    }
}

/// A named scope owning measurements, printed as an indented block.
pub struct Group {
    name: String,
    settings: GroupSettings,
    measurements: Vec<Measurement>,
    groups: Vec<GroupResult>,
}

impl Group {
    /// Create a group and print its header (preceded by [`BANNER`] at indent 0).
    pub fn new(name: impl Into<String>, settings: GroupSettings) -> Self {
        let group = Self {
            name: name.into(),
            settings,
            measurements: Vec::new(),
            groups: Vec::new(),
        };

        if group.settings.indent == 0 {
            group.settings.sink.write_line(BANNER);
        }
        group.line(&format!("# {}", group.name));

        group
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn indent(&self) -> usize {
        self.settings.indent
    }

    pub fn target_time(&self) -> Duration {
        self.settings.target_time
    }

    /// Measurements registered so far, in registration order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Results of the sub-groups that already ran.
    pub fn groups(&self) -> &[GroupResult] {
        &self.groups
    }

    /// Sample `f` until its cumulative run time reaches the group's budget.
    ///
    /// `f` always runs at least once. Panics in `f` are not caught. Returns
    /// `None` when the name is excluded by the group's filter.
    pub fn measure<F>(&mut self, name: &str, mut f: F) -> Option<&Measurement>
    where
        F: FnMut(),
    {
        if let Some(pattern) = &self.settings.filter {
            if !filter::matches(name, pattern) {
                return None;
            }
        }

        self.settings
            .sink
            .write_flushed(&format!("{}{} - ", self.padding(), name));

        let budget = u64::try_from(self.settings.target_time.as_nanos()).unwrap_or(u64::MAX);
        let clock = Rc::clone(&self.settings.clock);

        self.measurements.push(Measurement::new(name));
        let idx = self.measurements.len() - 1;
        let m = &mut self.measurements[idx];

        loop {
            let start = clock.now_ns();
            f();
            let end = clock.now_ns();
            m.record(end.saturating_sub(start));

            if m.stats().total() >= budget {
                break;
            }
        }

        let summary = m.summary();
        self.settings.sink.write_line(&summary);

        self.measurements.last()
    }

    /// Like [`Group::measure`], handing `data` to every invocation.
    pub fn measure_with<T, F>(&mut self, name: &str, data: &mut T, mut f: F) -> Option<&Measurement>
    where
        F: FnMut(&mut T),
    {
        self.measure(name, || f(&mut *data))
    }

    /// Run a sub-group, print its comparison, and keep only its results.
    pub fn group<F>(&mut self, name: &str, f: F) -> &GroupResult
    where
        F: FnOnce(&mut Group),
    {
        let mut child = Group::new(name, self.settings.nested());
        f(&mut child);
        self.groups.push(child.compare());
        &self.groups[self.groups.len() - 1]
    }

    /// Like [`Group::group`], handing `data` to the entry closure.
    pub fn group_with<T, F>(&mut self, name: &str, data: T, f: F) -> &GroupResult
    where
        F: FnOnce(&mut Group, T),
    {
        self.group(name, |g| f(g, data))
    }

    /// Rank the measurements, print the comparison and release the group.
    ///
    /// Nothing is printed with fewer than two measurements.
    pub fn compare(mut self) -> GroupResult {
        let comparison = if self.measurements.len() > 1 {
            let ranking = report::rank(&mut self.measurements);
            self.line("Comparing...");
            for r in &ranking {
                self.line(&report::comparison_line(r));
            }
            ranking
        } else {
            Vec::new()
        };
        self.settings.sink.flush();

        GroupResult {
            measurements: self.measurements.iter().map(MeasurementResult::from).collect(),
            name: self.name,
            comparison,
            groups: self.groups,
        }
    }

    fn padding(&self) -> String {
        " ".repeat(self.settings.indent)
    }

    fn line(&self, text: &str) {
        self.settings
            .sink
            .write_line(&format!("{}{}", self.padding(), text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, MonotonicClock};
    use crate::sink::SharedBuffer;

    fn fixture(budget_ns: u64) -> (Rc<ManualClock>, SharedBuffer, GroupSettings) {
        let clock = Rc::new(ManualClock::new());
        let buf = SharedBuffer::new();
        let settings = GroupSettings::new(Sink::new(buf.clone()), clock.clone())
            .target_time(Duration::from_nanos(budget_ns));
        (clock, buf, settings)
    }

    #[test]
    fn should_print_banner_and_header_for_root() {
        let (_clock, buf, settings) = fixture(1_000);
        let _group = Group::new("bench", settings);
        assert_eq!(buf.contents(), format!("{}\n# bench\n", BANNER));
    }

    #[test]
    fn should_skip_banner_when_indented() {
        let (_clock, buf, settings) = fixture(1_000);
        let _group = Group::new("child", settings.indent(4));
        assert_eq!(buf.contents(), "    # child\n");
    }

    #[test]
    fn should_render_full_report_for_nested_comparison() {
        let (clock, buf, settings) = fixture(1_000);
        let mut root = Group::new("bench", settings);

        root.group("publish", |g| {
            g.measure("fast", || clock.advance(10));
            g.measure("slow", || clock.advance(100));
        });
        let result = root.compare();

        let expected = format!(
            "{}\n\
             # bench\n  \
             # publish\n  \
             fast - 100.00m i/s (±0.00%) (10.00ns/i)\n  \
             slow - 10.00m i/s (±0.00%) (100.00ns/i)\n  \
             Comparing...\n    \
             - fast (fastest)\n    \
             - slow (900.00% slower)\n",
            BANNER
        );
        assert_eq!(buf.contents(), expected);

        let publish = result.find("publish").unwrap();
        assert_eq!(publish.measurement("fast").unwrap().samples, 100);
        assert_eq!(publish.measurement("slow").unwrap().samples, 10);
        assert_eq!(publish.comparison[1].slower_pct, Some(900.0));
        assert!(result.comparison.is_empty());
    }

    #[test]
    fn should_sample_once_when_candidate_takes_whole_budget() {
        let (clock, _buf, settings) = fixture(1_000);
        let mut group = Group::new("bench", settings);

        let m = group.measure("sleepy", || clock.advance(1_000)).unwrap();
        assert_eq!(m.stats().count(), 1);
    }

    #[test]
    fn should_sample_once_when_candidate_exceeds_budget() {
        let (clock, _buf, settings) = fixture(1_000);
        let mut group = Group::new("bench", settings);

        let m = group.measure("glacial", || clock.advance(5_000)).unwrap();
        assert_eq!(m.stats().count(), 1);
        assert_eq!(m.stats().total(), 5_000);
    }

    #[test]
    fn should_sample_once_when_real_sleep_covers_budget() {
        let buf = SharedBuffer::new();
        let settings = GroupSettings::new(Sink::new(buf), Rc::new(MonotonicClock::new()))
            .target_time(Duration::from_millis(5));
        let mut group = Group::new("bench", settings);

        let m = group
            .measure("sleep", || std::thread::sleep(Duration::from_millis(5)))
            .unwrap();
        assert_eq!(m.stats().count(), 1);
    }

    #[test]
    fn should_sample_once_when_budget_is_zero() {
        let (clock, buf, settings) = fixture(0);
        let mut group = Group::new("bench", settings);

        group.measure("instant", || {});
        group.measure("slow", || clock.advance(10));
        let result = group.compare();

        assert!(result.measurements.iter().all(|m| m.samples == 1));
        assert!(result.measurement("instant").unwrap().ops_per_sec.is_infinite());
        assert_eq!(result.comparison[0].name, "instant");
        assert!(result.comparison[1].slower_pct.unwrap().is_infinite());
        assert!(buf.contents().contains("instant - inft i/s"));
    }

    #[test]
    fn should_stop_once_cumulative_time_reaches_budget() {
        let (clock, _buf, settings) = fixture(1_000);
        let mut group = Group::new("bench", settings);

        let m = group.measure("steady", || clock.advance(300)).unwrap();
        // 300, 600, 900 are under budget; the fourth sample crosses it
        assert_eq!(m.stats().count(), 4);
        assert_eq!(m.stats().total(), 1_200);
    }

    #[test]
    fn should_flush_label_before_sampling() {
        let (clock, buf, settings) = fixture(100);
        let mut group = Group::new("bench", settings.indent(2));
        buf.clear();

        let mut seen = String::new();
        group.measure("visible", || {
            if seen.is_empty() {
                seen = buf.contents();
            }
            clock.advance(100);
        });
        assert_eq!(seen, "  visible - ");
    }

    #[test]
    fn should_not_compare_when_single_measurement() {
        let (clock, buf, settings) = fixture(1_000);
        let mut group = Group::new("solo", settings);
        group.measure("only", || clock.advance(10));

        let result = group.compare();
        assert!(!buf.contents().contains("Comparing..."));
        assert!(result.comparison.is_empty());
        assert_eq!(result.measurements.len(), 1);
    }

    #[test]
    fn should_not_compare_when_empty() {
        let (_clock, buf, settings) = fixture(1_000);
        let result = Group::new("empty", settings).compare();
        assert!(!buf.contents().contains("Comparing..."));
        assert!(result.measurements.is_empty());
    }

    #[test]
    fn should_indent_nested_groups_and_compare_only_direct_measurements() {
        let (clock, buf, settings) = fixture(1_000);
        let mut root = Group::new("root", settings);

        root.group("outer", |outer| {
            assert_eq!(outer.indent(), 2);
            outer.measure("a", || clock.advance(10));
            outer.measure("b", || clock.advance(20));
            outer.group("inner", |inner| {
                assert_eq!(inner.indent(), 4);
                inner.measure("c", || clock.advance(5));
                inner.measure("d", || clock.advance(50));
            });
        });
        let result = root.compare();

        let outer = result.find("outer").unwrap();
        let outer_names: Vec<_> = outer.comparison.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(outer_names, ["a", "b"]);
        assert_eq!(outer.comparison[1].slower_pct, Some(100.0));

        let inner = result.find("outer/inner").unwrap();
        let inner_names: Vec<_> = inner.comparison.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(inner_names, ["c", "d"]);

        let out = buf.contents();
        assert!(out.contains("\n    # inner\n"));
        assert!(out.contains("\n      - d (900.00% slower)\n"));
        assert!(out.ends_with("  Comparing...\n    - a (fastest)\n    - b (100.00% slower)\n"));
    }

    #[test]
    fn should_inherit_budget_by_value_in_sub_groups() {
        let (_clock, _buf, settings) = fixture(1_234);
        let mut root = Group::new("root", settings);

        let mut seen = Duration::ZERO;
        root.group("child", |g| seen = g.target_time());
        assert_eq!(seen, Duration::from_nanos(1_234));
    }

    #[test]
    fn should_thread_user_data_to_candidate() {
        let (clock, _buf, settings) = fixture(1_000);
        let mut group = Group::new("bench", settings);

        let mut calls = 0u32;
        group.measure_with("counted", &mut calls, |n| {
            *n += 1;
            clock.advance(100);
        });
        assert_eq!(calls, 10);
    }

    #[test]
    fn should_thread_user_data_to_sub_group() {
        let (clock, _buf, settings) = fixture(1_000);
        let mut root = Group::new("root", settings);

        let result = root.group_with("stepped", 40u64, |g, step| {
            g.measure("x", || clock.advance(step));
        });
        assert_eq!(result.measurement("x").unwrap().samples, 25);
    }

    #[test]
    fn should_skip_measurement_when_filtered_out() {
        let (clock, buf, settings) = fixture(1_000);
        let mut group = Group::new("bench", settings.filter("fib*"));

        assert!(group.measure("vec_push", || clock.advance(10)).is_none());
        assert!(group.measure("fib_fast", || clock.advance(10)).is_some());

        assert_eq!(group.measurements().len(), 1);
        assert!(!buf.contents().contains("vec_push"));
    }

    #[test]
    fn should_keep_registration_order_before_compare() {
        let (clock, _buf, settings) = fixture(100);
        let mut group = Group::new("bench", settings);
        group.measure("slow", || clock.advance(50));
        group.measure("fast", || clock.advance(5));

        let names: Vec<_> = group.measurements().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["slow", "fast"]);
    }

    #[test]
    #[should_panic(expected = "candidate failed")]
    fn should_propagate_candidate_panic() {
        let (_clock, _buf, settings) = fixture(1_000);
        let mut group = Group::new("bench", settings);
        group.measure("broken", || panic!("candidate failed"));
    }
}
