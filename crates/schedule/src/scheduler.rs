use isleworld_common::Tick;

use crate::throttle::Throttle;

/// Handle returned by [`FrameScheduler::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u32);

#[derive(Debug, Clone)]
struct Subscription {
    id: SubscriptionId,
    priority: i32,
    throttle: Throttle,
}

/// Explicit per-frame subscription registry.
///
/// Subsystems register `(priority, interval_ms)` and get a handle back. Once
/// per frame the owner calls [`FrameScheduler::due`] and dispatches the
/// returned handles to the subsystems it owns. The scheduler never holds
/// callbacks, so it never aliases subsystem state.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subsystem. Lower priority values run first; equal
    /// priorities run in registration order.
    pub fn subscribe(&mut self, priority: i32, interval_ms: f64) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            priority,
            throttle: Throttle::new(interval_ms),
        });
        // Stable sort keeps registration order within a priority.
        self.subscriptions.sort_by_key(|s| s.priority);
        tracing::trace!(?id, priority, interval_ms, "subscribed");
        id
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        let removed = self.subscriptions.len() != before;
        if removed {
            tracing::trace!(?id, "unsubscribed");
        }
        removed
    }

    /// Drop every subscription. Used on scene teardown.
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Handles whose throttle allows a run at this tick, in dispatch order.
    /// Each returned handle has its last-run timestamp set to this tick.
    pub fn due(&mut self, tick: &Tick) -> Vec<SubscriptionId> {
        let now = tick.now_ms();
        self.subscriptions
            .iter_mut()
            .filter_map(|s| s.throttle.try_run(now).then_some(s.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_at_ms(ms: f64) -> Tick {
        Tick::new(0.0, ms / 1000.0)
    }

    #[test]
    fn due_respects_interval() {
        let mut s = FrameScheduler::new();
        let wave = s.subscribe(0, 33.0);
        let every = s.subscribe(0, 0.0);

        assert_eq!(s.due(&tick_at_ms(0.0)), vec![wave, every]);
        assert_eq!(s.due(&tick_at_ms(10.0)), vec![every]);
        assert_eq!(s.due(&tick_at_ms(40.0)), vec![wave, every]);
    }

    #[test]
    fn priority_orders_dispatch() {
        let mut s = FrameScheduler::new();
        let late = s.subscribe(10, 0.0);
        let early = s.subscribe(-1, 0.0);
        let mid_a = s.subscribe(5, 0.0);
        let mid_b = s.subscribe(5, 0.0);
        assert_eq!(s.due(&tick_at_ms(0.0)), vec![early, mid_a, mid_b, late]);
    }

    #[test]
    fn unsubscribed_never_runs() {
        let mut s = FrameScheduler::new();
        let a = s.subscribe(0, 0.0);
        let b = s.subscribe(0, 0.0);
        assert!(s.unsubscribe(a));
        assert!(!s.unsubscribe(a));
        assert_eq!(s.due(&tick_at_ms(0.0)), vec![b]);
        assert!(!s.is_subscribed(a));
    }

    #[test]
    fn clear_removes_everything() {
        let mut s = FrameScheduler::new();
        s.subscribe(0, 0.0);
        s.subscribe(1, 16.0);
        s.clear();
        assert!(s.is_empty());
        assert!(s.due(&tick_at_ms(100.0)).is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut s = FrameScheduler::new();
        let a = s.subscribe(0, 0.0);
        s.unsubscribe(a);
        let b = s.subscribe(0, 0.0);
        assert_ne!(a, b);
    }
}
