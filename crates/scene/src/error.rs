use std::path::PathBuf;

use isleworld_creature::CreatureError;
use isleworld_ocean::OceanError;

/// Construction-time errors. The running scene recovers from all of them.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("ocean: {0}")]
    Ocean(#[from] OceanError),
    #[error("creature: {0}")]
    Creature(#[from] CreatureError),
    #[error("budget {name} must be finite and non-negative, got {value}")]
    Budget { name: &'static str, value: f64 },
    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
