use std::collections::VecDeque;
use std::time::Duration;

/// Rolling window of per-frame tick costs for instrumentation.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: VecDeque<Duration>,
    capacity: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record one frame; the oldest sample falls out once the window is full.
    pub fn record(&mut self, cost: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(cost);
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Number of recorded frames whose cost exceeded `budget`.
    pub fn over_budget(&self, budget: Duration) -> usize {
        self.samples.iter().filter(|d| **d > budget).count()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timer_reports_zero() {
        let t = FrameTimer::new(4);
        assert_eq!(t.count(), 0);
        assert_eq!(t.average(), Duration::ZERO);
        assert_eq!(t.max(), Duration::ZERO);
    }

    #[test]
    fn tracks_window_stats() {
        let mut t = FrameTimer::new(3);
        t.record(Duration::from_millis(10));
        t.record(Duration::from_millis(20));
        t.record(Duration::from_millis(30));
        assert_eq!(t.average(), Duration::from_millis(20));
        assert_eq!(t.max(), Duration::from_millis(30));
        assert_eq!(t.min(), Duration::from_millis(10));
        assert_eq!(t.over_budget(Duration::from_millis(16)), 2);
    }

    #[test]
    fn window_drops_oldest() {
        let mut t = FrameTimer::new(2);
        t.record(Duration::from_millis(10));
        t.record(Duration::from_millis(20));
        t.record(Duration::from_millis(30));
        assert_eq!(t.count(), 2);
        assert_eq!(t.average(), Duration::from_millis(25));
    }
}
