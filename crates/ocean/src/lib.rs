//! Ocean surface: a segmented plane deformed by a closed-form wave.
//!
//! # Invariants
//! - Live heights are recomputed from the rest cache, never accumulated.
//! - Height at a vertex is a pure function of `(x, y, time)`.
//! - A mesh with no vertices is a valid, inert surface.

mod surface;
mod wave;

pub use surface::{MAX_GRID_VERTICES, OceanGrid, VertexCache, WaveSurface, WaveVertex};
pub use wave::{OceanError, WaveConfig, wave_height};
