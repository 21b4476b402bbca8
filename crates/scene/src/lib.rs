//! Scene orchestration: the one owner of every island-world subsystem.
//!
//! # Invariants
//! - Subsystems never reference each other; the orchestrator routes
//!   scheduler handles to the subsystem that owns them.
//! - Simulated state is a pure function of the seed, the frame deltas and
//!   the pointer actions, so [`SceneOrchestrator::state_hash`] can compare
//!   two runs.
//! - After unmount no subsystem is ticked and no event is emitted.

mod bloom;
mod camera;
mod config;
mod error;
mod lighting;
mod orchestrator;

pub use bloom::BloomConfig;
pub use camera::CameraConfig;
pub use config::{FrameBudgets, SceneConfig};
pub use error::SceneError;
pub use lighting::LightingPreset;
pub use orchestrator::{PickTarget, SceneEvent, SceneOrchestrator, SceneProps};
