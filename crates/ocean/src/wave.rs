use serde::{Deserialize, Serialize};

/// Errors from constructing ocean parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OceanError {
    #[error("wave {name} must be non-negative and finite, got {value}")]
    NegativeParameter { name: &'static str, value: f32 },
    #[error("grid size must be positive, got {width}x{height}")]
    EmptyGrid { width: f32, height: f32 },
    #[error("grid of {width_segments}x{height_segments} segments exceeds the 32-bit index range")]
    TooManyVertices { width_segments: u32, height_segments: u32 },
}

/// Wave parameters, constant for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub frequency: f32,
    pub amplitude: f32,
    pub speed: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            frequency: 0.02,
            amplitude: 2.0,
            speed: 0.8,
        }
    }
}

impl WaveConfig {
    pub fn new(frequency: f32, amplitude: f32, speed: f32) -> Result<Self, OceanError> {
        let config = Self {
            frequency,
            amplitude,
            speed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Amplitude and frequency must be non-negative.
    pub fn validate(&self) -> Result<(), OceanError> {
        for (name, value) in [("frequency", self.frequency), ("amplitude", self.amplitude)] {
            if !value.is_finite() || value < 0.0 {
                return Err(OceanError::NegativeParameter { name, value });
            }
        }
        Ok(())
    }

    /// Wave clock for a given scene time.
    pub fn time_at(&self, elapsed_seconds: f64) -> f32 {
        (elapsed_seconds * self.speed as f64) as f32
    }
}

/// Surface height at rest position `(x, y)` for wave clock `time`.
///
/// A pure function of its inputs: the same `(x, y, time)` always yields the
/// same height regardless of what was computed before.
#[inline]
pub fn wave_height(x: f32, y: f32, time: f32, config: &WaveConfig) -> f32 {
    let phase = (x + y) * config.frequency + time;
    config.amplitude * (phase.sin() + (phase * 0.8).cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_matches_closed_form() {
        let cfg = WaveConfig::new(0.1, 1.5, 1.0).unwrap();
        let (x, y, t) = (3.0_f32, -7.5_f32, 2.25_f32);
        let phase = (x + y) * 0.1 + t;
        let expected = 1.5 * (phase.sin() + (phase * 0.8).cos());
        assert_eq!(wave_height(x, y, t, &cfg), expected);
    }

    #[test]
    fn zero_amplitude_is_flat() {
        let cfg = WaveConfig::new(0.3, 0.0, 1.0).unwrap();
        assert_eq!(wave_height(10.0, 4.0, 99.0, &cfg), 0.0);
    }

    #[test]
    fn rejects_negative_amplitude() {
        let err = WaveConfig::new(0.1, -1.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            OceanError::NegativeParameter {
                name: "amplitude",
                value: -1.0
            }
        );
    }

    #[test]
    fn rejects_negative_frequency() {
        assert!(WaveConfig::new(-0.1, 1.0, 1.0).is_err());
        assert!(WaveConfig::new(f32::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn time_scales_with_speed() {
        let cfg = WaveConfig::new(0.1, 1.0, 2.0).unwrap();
        assert_eq!(cfg.time_at(1.5), 3.0);
    }
}
