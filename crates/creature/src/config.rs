use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from validating a creature configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreatureError {
    #[error("max roam distance must exceed the turn margin of {margin}, got {value}")]
    RoamTooShort { value: f32, margin: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("resting body reaches y = {top}, at or above the clickable floor {floor}")]
    CatchableAtRest { top: f32, floor: f32 },
}

/// Static creature parameters, read-only after mount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub rest_position: Vec3,
    pub max_roam_distance: f32,
    /// Lowest intersection height that counts as a click.
    pub clickable_min_y: f32,
    /// Farthest an intersection may be from the creature origin.
    pub click_radius: f32,
    /// Model-space half extents of the body box that rays are tested
    /// against. Also the size of the fallback box.
    pub body_half_extents: Vec3,
    pub scale: f32,
    pub day_glow: f32,
    pub night_glow: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            rest_position: Vec3::new(0.0, -3.0, -40.0),
            max_roam_distance: 150.0,
            clickable_min_y: 5.0,
            click_radius: 12.0,
            body_half_extents: Vec3::new(1.5, 1.0, 2.5),
            scale: 2.0,
            day_glow: 0.3,
            night_glow: 1.5,
        }
    }
}

impl CreatureConfig {
    pub fn validate(&self) -> Result<(), CreatureError> {
        for (name, value) in [
            ("click_radius", self.click_radius),
            ("body_half_extents.x", self.body_half_extents.x),
            ("body_half_extents.y", self.body_half_extents.y),
            ("body_half_extents.z", self.body_half_extents.z),
            ("scale", self.scale),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(CreatureError::NonPositive { name, value });
            }
        }
        if self.max_roam_distance.is_nan() || self.max_roam_distance <= crate::animator::TURN_MARGIN {
            return Err(CreatureError::RoamTooShort {
                value: self.max_roam_distance,
                margin: crate::animator::TURN_MARGIN,
            });
        }
        let top = self.resting_top();
        if top.is_nan() || top >= self.clickable_min_y {
            return Err(CreatureError::CatchableAtRest {
                top,
                floor: self.clickable_min_y,
            });
        }
        Ok(())
    }

    /// Highest point the body box can reach while not jumping, whatever its
    /// orientation.
    pub fn resting_top(&self) -> f32 {
        self.rest_position.y + crate::animator::IDLE_BOB_AMPLITUDE + self.body_half_extents.length() * self.scale
    }
}
