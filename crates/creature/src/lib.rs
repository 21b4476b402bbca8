//! The creature that swims beneath the islands.
//!
//! It idles in the water, jumps along a bounded roam axis at random
//! intervals, and can only be clicked while high enough out of the water.

mod animator;
mod config;

pub use animator::{CreatureAnimator, CreatureEvent, CreatureState};
pub use config::{CreatureConfig, CreatureError};
