//! Rendering adapter: a renderer-agnostic frame description.
//!
//! # Invariants
//! - A renderer cannot mutate scene state.
//! - A frame is derived from scene state and the camera, nothing else.
//!
//! The scene only ever produces a [`RenderFrame`]. A GPU backend implements
//! [`Renderer`] without changing the scene; [`DebugTextRenderer`] is the
//! text backend used headless.

mod frame;
mod renderer;

pub use frame::{
    BloomPass, DrawItem, DrawShape, Light, LightKind, OceanStats, RenderFrame, RenderView,
    StarStats,
};
pub use renderer::{DebugTextRenderer, Renderer};
