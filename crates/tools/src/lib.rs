//! Developer tooling: read-only scene inspection.
//!
//! # Invariants
//! - Tools never mutate the scene they inspect.

mod inspector;

pub use inspector::{CreatureInfo, IslandInfo, SceneInspector, SceneSummary};
