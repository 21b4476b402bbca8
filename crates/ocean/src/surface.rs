use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::wave::{OceanError, WaveConfig, wave_height};

/// Plane dimensions and tessellation of the ocean mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanGrid {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for OceanGrid {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            width_segments: 100,
            height_segments: 100,
        }
    }
}

/// Largest vertex count a `u32` index buffer can address.
pub const MAX_GRID_VERTICES: u64 = u32::MAX as u64;

impl OceanGrid {
    pub fn vertex_count(&self) -> usize {
        usize::try_from(self.vertex_count_u64()).unwrap_or(usize::MAX)
    }

    fn vertex_count_u64(&self) -> u64 {
        (u64::from(self.width_segments) + 1).saturating_mul(u64::from(self.height_segments) + 1)
    }

    pub fn validate(&self) -> Result<(), OceanError> {
        if !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0) {
            return Err(OceanError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if self.vertex_count_u64() > MAX_GRID_VERTICES {
            return Err(OceanError::TooManyVertices {
                width_segments: self.width_segments,
                height_segments: self.height_segments,
            });
        }
        Ok(())
    }
}

/// Live vertex layout handed to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct WaveVertex {
    pub position: [f32; 3],
}

/// Rest-state `(x, y)` positions, row by row.
///
/// Built once with the mesh and never written afterwards. Every deformation
/// reads from here, so the surface cannot drift however long it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexCache {
    rest: Vec<[f32; 2]>,
}

impl VertexCache {
    /// Lay out a centered plane the same way a segmented plane geometry does:
    /// rows from +y to -y, columns from -x to +x.
    pub fn from_grid(grid: &OceanGrid) -> Self {
        let cols = grid.width_segments as usize + 1;
        let rows = grid.height_segments as usize + 1;
        let seg_w = grid.width / grid.width_segments.max(1) as f32;
        let seg_h = grid.height / grid.height_segments.max(1) as f32;
        let half_w = grid.width / 2.0;
        let half_h = grid.height / 2.0;

        let mut rest = Vec::with_capacity(cols * rows);
        for iy in 0..rows {
            let y = half_h - iy as f32 * seg_h;
            for ix in 0..cols {
                rest.push([ix as f32 * seg_w - half_w, y]);
            }
        }
        Self { rest }
    }

    pub fn empty() -> Self {
        Self { rest: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 2]] {
        &self.rest
    }
}

/// Deformable ocean mesh.
///
/// Owns its rest cache and the live vertex buffer. Updating writes heights
/// computed from the cache and flags the buffer for upload.
#[derive(Debug, Clone)]
pub struct WaveSurface {
    config: WaveConfig,
    cache: VertexCache,
    live: Vec<WaveVertex>,
    indices: Vec<u32>,
    dirty: bool,
    updates: u64,
}

impl WaveSurface {
    pub fn new(config: WaveConfig, grid: OceanGrid) -> Result<Self, OceanError> {
        config.validate()?;
        grid.validate()?;
        let cache = VertexCache::from_grid(&grid);
        let indices = grid_indices(grid.width_segments, grid.height_segments);
        Ok(Self::from_cache(config, cache, indices))
    }

    /// Build a surface over an arbitrary cache. An empty cache is valid and
    /// every update on it is a no-op.
    pub fn from_cache(config: WaveConfig, cache: VertexCache, indices: Vec<u32>) -> Self {
        let live = cache
            .positions()
            .iter()
            .map(|&[x, y]| WaveVertex {
                position: [x, y, 0.0],
            })
            .collect();
        tracing::debug!(vertices = cache.len(), "ocean surface built");
        Self {
            config,
            cache,
            live,
            indices,
            dirty: true,
            updates: 0,
        }
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn cache(&self) -> &VertexCache {
        &self.cache
    }

    pub fn vertices(&self) -> &[WaveVertex] {
        &self.live
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.live.len()
    }

    /// Number of deformation passes applied so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Recompute every live vertex for the wave clock at `elapsed_seconds`.
    pub fn update(&mut self, elapsed_seconds: f64) {
        self.displace(self.config.time_at(elapsed_seconds));
    }

    /// Recompute every live vertex for wave clock `time`.
    pub fn displace(&mut self, time: f32) {
        if self.cache.is_empty() {
            return;
        }
        let config = self.config;
        for (vertex, &[x, y]) in self.live.iter_mut().zip(self.cache.positions()) {
            vertex.position = [x, y, wave_height(x, y, time, &config)];
        }
        self.dirty = true;
        self.updates += 1;
        tracing::trace!(time, vertices = self.live.len(), "ocean displaced");
    }

    pub fn height_at_vertex(&self, index: usize) -> Option<f32> {
        self.live.get(index).map(|v| v.position[2])
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bytes of the live buffer if it changed since the last upload, clearing
    /// the dirty flag.
    pub fn take_upload(&mut self) -> Option<&[u8]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(bytemuck::cast_slice(&self.live))
    }
}

/// Two triangles per grid cell, counter-clockwise. The grid must have passed
/// [`OceanGrid::validate`], so every index fits in `u32`.
fn grid_indices(width_segments: u32, height_segments: u32) -> Vec<u32> {
    let cols = width_segments + 1;
    let cells = width_segments as usize * height_segments as usize;
    let mut indices = Vec::with_capacity(cells.saturating_mul(6));
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * cols + ix;
            let b = (iy + 1) * cols + ix;
            let c = (iy + 1) * cols + ix + 1;
            let d = iy * cols + ix + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}
