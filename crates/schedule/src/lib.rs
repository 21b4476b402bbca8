//! Frame scheduling: per-subsystem throttles driven by one shared tick.
//!
//! # Invariants
//! - Motion is wall-clock driven; a missed frame defers work, it never queues
//!   a catch-up run.
//! - The scheduler hands out handles, never holds subsystem state.

mod scheduler;
mod throttle;
mod timer;

pub use scheduler::{FrameScheduler, SubscriptionId};
pub use throttle::{HOVER_INTERVAL_MS, Throttle, WAVE_INTERVAL_MS, should_run};
pub use timer::FrameTimer;
