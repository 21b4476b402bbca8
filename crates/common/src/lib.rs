//! Shared types for the isleworld scene.
//!
//! # Invariants
//! - The scene clock is monotonic and read-only to subsystems.
//! - All randomness flows through an explicitly seeded [`SceneRng`].

mod rng;
mod types;

pub use rng::SceneRng;
pub use types::{SceneClock, Tick, Transform};
