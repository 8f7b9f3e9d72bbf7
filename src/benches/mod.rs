use crate::{Bench, Group};
use std::hint::black_box;

/// Register the built-in demonstration suites on `bench`.
///
/// Projects consuming this crate can model their own suites on these.
pub fn register_benchmarks(bench: &mut Bench) {
    bench.group_with("publish", (5u32, 10u32), |g, (fast, slow)| {
        g.measure("fast", || {
            black_box(fibo(black_box(fast)));
        });
        g.measure("slow", || {
            black_box(fibo(black_box(slow)));
        });
    });

    bench.group("collections", collections);
}

fn collections(g: &mut Group) {
    const LEN: usize = 1024;

    g.measure("vec_push", || {
        let mut v = Vec::new();
        for i in 0..LEN {
            v.push(i);
        }
        black_box(v);
    });
    g.measure("vec_with_capacity", || {
        let mut v = Vec::with_capacity(LEN);
        for i in 0..LEN {
            v.push(i);
        }
        black_box(v);
    });

    let mut scratch: Vec<usize> = Vec::with_capacity(LEN);
    g.measure_with("vec_reuse", &mut scratch, |v| {
        v.clear();
        for i in 0..LEN {
            v.push(i);
        }
        black_box(&v);
    });
}

fn fibo(n: u32) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibo(n - 1) + fibo(n - 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BenchConfig, MonotonicClock, SharedBuffer, Sink};
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn should_compute_fibonacci() {
        assert_eq!(fibo(5), 5);
        assert_eq!(fibo(10), 55);
    }

    #[test]
    fn should_register_publish_and_collections_groups() {
        // A zero budget samples every candidate exactly once.
        let config = BenchConfig::new().target_time(Duration::ZERO);
        let buf = SharedBuffer::new();
        let mut bench = Bench::with_parts(
            "builtin",
            config,
            Sink::new(buf.clone()),
            Rc::new(MonotonicClock::new()),
        );

        register_benchmarks(&mut bench);
        let result = bench.finish();

        let publish = result.find("publish").unwrap();
        assert_eq!(publish.measurements.len(), 2);
        let collections = result.find("collections").unwrap();
        assert_eq!(collections.measurements.len(), 3);
        assert!(collections.measurements.iter().all(|m| m.samples == 1));
        assert!(buf.contents().contains("  # collections\n"));
    }
}
