//! Celestial backdrop: gradient sky and a star field that loses its
//! below-horizon stars during the day.
//!
//! # Invariants
//! - Star positions, colors, and sizes are re-sliced from one index set.
//! - Day/night flips debounce the star rebuild; they never race it.

mod backdrop;
mod gradient;
mod stars;

pub use backdrop::CelestialBackdrop;
pub use gradient::{ColorStop, SkyGradient, SkyTheme};
pub use stars::{SkyError, StarField, StarFieldConfig};
