use glam::Vec3;

use isleworld_render::{Light, LightKind};

/// Ambient plus one directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingPreset {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    pub sun_color: [f32; 3],
    pub sun_intensity: f32,
    /// Direction the light travels.
    pub sun_direction: Vec3,
}

impl LightingPreset {
    pub fn day() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.6,
            sun_color: [1.0, 0.96, 0.88],
            sun_intensity: 1.0,
            sun_direction: Vec3::new(-0.5, -1.0, -0.3).normalize(),
        }
    }

    /// Dimmer blue-tinted moonlight.
    pub fn night() -> Self {
        Self {
            ambient_color: [0.55, 0.6, 0.9],
            ambient_intensity: 0.25,
            sun_color: [0.7, 0.75, 1.0],
            sun_intensity: 0.4,
            sun_direction: Vec3::new(0.4, -1.0, 0.2).normalize(),
        }
    }

    pub fn for_time_of_day(is_day: bool) -> Self {
        if is_day { Self::day() } else { Self::night() }
    }

    pub fn lights(&self) -> Vec<Light> {
        vec![
            Light {
                kind: LightKind::Ambient,
                color: self.ambient_color,
                intensity: self.ambient_intensity,
            },
            Light {
                kind: LightKind::Directional {
                    direction: self.sun_direction,
                },
                color: self.sun_color,
                intensity: self.sun_intensity,
            },
        ]
    }
}
