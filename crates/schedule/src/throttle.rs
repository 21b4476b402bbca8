/// Frame budget for the ocean surface: 30 updates per second.
pub const WAVE_INTERVAL_MS: f64 = 33.0;

/// Frame budget for hover animation loops: 60 updates per second.
pub const HOVER_INTERVAL_MS: f64 = 16.0;

/// Decide whether a throttled update may run at `now_ms`.
///
/// `last_run_ms` of `None` means the update has never run, which always
/// passes. On `true` the caller records `now_ms` as its new last run. There is
/// no backlog: a skipped frame only defers work to the next tick.
pub fn should_run(last_run_ms: Option<f64>, interval_ms: f64, now_ms: f64) -> bool {
    match last_run_ms {
        None => true,
        Some(last) => now_ms - last >= interval_ms,
    }
}

/// A single minimum-interval gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    last_run_ms: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_run_ms: None,
        }
    }

    /// Returns `true` and records the run if the interval has elapsed.
    pub fn try_run(&mut self, now_ms: f64) -> bool {
        if should_run(self.last_run_ms, self.interval_ms, now_ms) {
            self.last_run_ms = Some(now_ms);
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn last_run_ms(&self) -> Option<f64> {
        self.last_run_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_always_runs() {
        assert!(should_run(None, WAVE_INTERVAL_MS, 0.0));
    }

    #[test]
    fn calls_10ms_apart_run_once() {
        let mut t = Throttle::new(WAVE_INTERVAL_MS);
        let runs = [1000.0, 1010.0].iter().filter(|&&now| t.try_run(now)).count();
        assert_eq!(runs, 1);
    }

    #[test]
    fn calls_40ms_apart_run_twice() {
        let mut t = Throttle::new(WAVE_INTERVAL_MS);
        let runs = [1000.0, 1040.0].iter().filter(|&&now| t.try_run(now)).count();
        assert_eq!(runs, 2);
    }

    #[test]
    fn exact_interval_boundary_runs() {
        assert!(should_run(Some(100.0), 33.0, 133.0));
        assert!(!should_run(Some(100.0), 33.0, 132.9));
    }

    #[test]
    fn skipped_frames_do_not_accumulate() {
        let mut t = Throttle::new(HOVER_INTERVAL_MS);
        assert!(t.try_run(0.0));
        // A long stall runs exactly once, not once per missed interval.
        assert!(t.try_run(500.0));
        assert!(!t.try_run(505.0));
        assert_eq!(t.last_run_ms(), Some(500.0));
    }

    #[test]
    fn zero_interval_runs_every_call() {
        let mut t = Throttle::new(0.0);
        assert!(t.try_run(1.0));
        assert!(t.try_run(1.0));
    }
}
