//! Floating islands: one composer per navigable category.
//!
//! # Invariants
//! - Island paths are unique within a scene.
//! - Unknown object kinds are skipped; they never block composition.
//! - Only a double-click raises a navigation event.

mod composer;
mod config;

pub use composer::{IslandComposer, IslandEvent, PlacedObject};
pub use config::{
    FALLBACK_POSITIONS, IslandConfig, IslandError, IslandObject, ObjectKind, layout_islands,
    predefined_island, validate_unique_paths,
};
