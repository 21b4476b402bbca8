//! Pointer input: actions from the platform layer and ray hit tests.
//!
//! # Invariants
//! - Scene objects consume [`PointerAction`]s, never raw window events.
//! - Hit tests are pure geometry; what a hit means is decided by the owner.

mod pointer;
mod ray;

pub use pointer::{HoverState, PointerAction, pixel_to_ndc};
pub use ray::{BoundingBox, BoundingSphere, Hit, Ray};
