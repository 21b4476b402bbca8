use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
}

/// One invocation of the per-frame update.
///
/// `elapsed_seconds` is the monotonic scene clock. It is never reset while a
/// scene is mounted, so everything derived from it is wall-clock driven.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    pub delta_seconds: f32,
    pub elapsed_seconds: f64,
}

impl Tick {
    pub fn new(delta_seconds: f32, elapsed_seconds: f64) -> Self {
        Self {
            delta_seconds,
            elapsed_seconds,
        }
    }

    /// Clock value in milliseconds, the unit frame budgets are expressed in.
    pub fn now_ms(&self) -> f64 {
        self.elapsed_seconds * 1000.0
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed_seconds as f32
    }
}

/// Accumulates frame deltas into the monotonic scene clock.
#[derive(Debug, Clone, Default)]
pub struct SceneClock {
    elapsed_seconds: f64,
    frames: u64,
}

impl SceneClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta_seconds` and return the tick for this frame.
    /// Negative or non-finite deltas are treated as zero.
    pub fn advance(&mut self, delta_seconds: f32) -> Tick {
        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        self.elapsed_seconds += delta as f64;
        self.frames += 1;
        Tick::new(delta, self.elapsed_seconds)
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn transform_builders() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_scale(2.0);
        assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.scale, Vec3::splat(2.0));
    }

    #[test]
    fn clock_is_monotonic() {
        let mut clock = SceneClock::new();
        let a = clock.advance(0.016);
        let b = clock.advance(-1.0);
        let c = clock.advance(f32::NAN);
        let d = clock.advance(0.016);
        assert!(b.elapsed_seconds >= a.elapsed_seconds);
        assert_eq!(c.delta_seconds, 0.0);
        assert!(d.elapsed_seconds > a.elapsed_seconds);
        assert_eq!(clock.frames(), 4);
    }

    #[test]
    fn tick_now_ms() {
        let t = Tick::new(0.0, 1.5);
        assert_eq!(t.now_ms(), 1500.0);
    }
}
