use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use isleworld_creature::CreatureConfig;
use isleworld_ocean::{OceanGrid, WaveConfig};
use isleworld_schedule::{HOVER_INTERVAL_MS, WAVE_INTERVAL_MS};
use isleworld_sky::StarFieldConfig;

use crate::bloom::BloomConfig;
use crate::camera::CameraConfig;
use crate::error::SceneError;

/// Per-subsystem update intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameBudgets {
    pub wave_interval_ms: f64,
    pub hover_interval_ms: f64,
    /// Target cost of a whole tick; slower ticks are counted by the timer.
    pub frame_budget_ms: f64,
}

impl Default for FrameBudgets {
    fn default() -> Self {
        Self {
            wave_interval_ms: WAVE_INTERVAL_MS,
            hover_interval_ms: HOVER_INTERVAL_MS,
            frame_budget_ms: 16.7,
        }
    }
}

impl FrameBudgets {
    pub fn validate(&self) -> Result<(), SceneError> {
        for (name, value) in [
            ("wave_interval_ms", self.wave_interval_ms),
            ("hover_interval_ms", self.hover_interval_ms),
            ("frame_budget_ms", self.frame_budget_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::Budget { name, value });
            }
        }
        Ok(())
    }
}

/// Scene configuration. Every section falls back to its defaults, so a
/// partial YAML file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub bloom: BloomConfig,
    pub wave: WaveConfig,
    pub ocean: OceanGrid,
    pub stars: StarFieldConfig,
    pub creature: CreatureConfig,
    pub budgets: FrameBudgets,
    /// Directory holding `<key>.gltf` models. Without one every object is
    /// drawn with its fallback primitive.
    pub model_dir: Option<PathBuf>,
}

impl SceneConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, SceneError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, SceneError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        self.wave.validate()?;
        self.ocean.validate()?;
        self.creature.validate()?;
        self.budgets.validate()?;
        Ok(())
    }

    /// Replace every invalid section with its defaults, logging each one.
    pub fn sanitized(mut self) -> Self {
        if let Err(err) = self.wave.validate() {
            tracing::warn!(%err, "invalid wave config, using defaults");
            self.wave = WaveConfig::default();
        }
        if let Err(err) = self.creature.validate() {
            tracing::warn!(%err, "invalid creature config, using defaults");
            self.creature = CreatureConfig::default();
        }
        if let Err(err) = self.ocean.validate() {
            tracing::warn!(%err, "invalid ocean grid, using defaults");
            self.ocean = OceanGrid::default();
        }
        if let Err(err) = self.budgets.validate() {
            tracing::warn!(%err, "invalid frame budgets, using defaults");
            self.budgets = FrameBudgets::default();
        }
        self
    }
}
