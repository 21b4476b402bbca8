use isleworld_common::SceneRng;
use serde::{Deserialize, Serialize};

/// Errors from assembling a star buffer by hand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkyError {
    #[error(
        "star arrays out of step: {positions} position floats, {colors} color floats, {sizes} sizes"
    )]
    MismatchedArrays {
        positions: usize,
        colors: usize,
        sizes: usize,
    },
}

/// Star field generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    pub count: usize,
    /// Inner radius of the spherical shell stars are scattered in.
    pub radius: f32,
    /// Shell thickness beyond `radius`.
    pub depth: f32,
    pub size_factor: f32,
    /// Delay before a day transition filters the buffer.
    pub rebuild_delay_ms: f64,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            radius: 400.0,
            depth: 80.0,
            size_factor: 4.0,
            rebuild_delay_ms: 150.0,
        }
    }
}

/// Point-cloud buffers for the stars, stored flat the way they are uploaded.
///
/// `positions` and `colors` hold three floats per star, `sizes` one. The
/// three arrays are only ever rebuilt together from one index set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarField {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
}

impl StarField {
    pub fn generate(config: &StarFieldConfig, rng: &mut SceneRng) -> Self {
        let mut positions = Vec::with_capacity(config.count * 3);
        let mut colors = Vec::with_capacity(config.count * 3);
        let mut sizes = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            let r = config.radius + config.depth * rng.unit();
            let cos_theta = 1.0 - 2.0 * rng.unit();
            let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
            let phi = std::f32::consts::TAU * rng.unit();
            positions.extend_from_slice(&[
                r * sin_theta * phi.cos(),
                r * cos_theta,
                r * sin_theta * phi.sin(),
            ]);

            // Mostly white with a faint warm or cool cast.
            let warmth = rng.range(-0.15, 0.15);
            let brightness = rng.range(0.7, 1.0);
            colors.extend_from_slice(&[
                (brightness + warmth).clamp(0.0, 1.0),
                brightness,
                (brightness - warmth).clamp(0.0, 1.0),
            ]);

            sizes.push((0.5 + 0.5 * rng.unit()) * config.size_factor);
        }

        Self {
            positions,
            colors,
            sizes,
        }
    }

    pub fn from_parts(positions: Vec<f32>, colors: Vec<f32>, sizes: Vec<f32>) -> Result<Self, SkyError> {
        if positions.len() != sizes.len() * 3 || colors.len() != sizes.len() * 3 {
            return Err(SkyError::MismatchedArrays {
                positions: positions.len(),
                colors: colors.len(),
                sizes: sizes.len(),
            });
        }
        Ok(Self {
            positions,
            colors,
            sizes,
        })
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(index * 3..index * 3 + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Drop every star below the horizon (`y < 0`). Returns how many were
    /// removed.
    pub fn retain_above_horizon(&mut self) -> usize {
        let keep: Vec<usize> = (0..self.len())
            .filter(|&i| self.positions[i * 3 + 1] >= 0.0)
            .collect();
        let removed = self.len() - keep.len();

        let mut positions = Vec::with_capacity(keep.len() * 3);
        let mut colors = Vec::with_capacity(keep.len() * 3);
        let mut sizes = Vec::with_capacity(keep.len());
        for &i in &keep {
            positions.extend_from_slice(&self.positions[i * 3..i * 3 + 3]);
            colors.extend_from_slice(&self.colors[i * 3..i * 3 + 3]);
            sizes.push(self.sizes[i]);
        }

        self.positions = positions;
        self.colors = colors;
        self.sizes = sizes;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Each star carries its own index in every channel so a misaligned
    /// rebuild shows up as a mismatch.
    fn tagged_field(ys: &[f32]) -> StarField {
        let mut positions = Vec::new();
        let mut colors = Vec::new();
        let mut sizes = Vec::new();
        for (i, &y) in ys.iter().enumerate() {
            let tag = i as f32;
            positions.extend_from_slice(&[tag, y, tag]);
            colors.extend_from_slice(&[tag, tag, tag]);
            sizes.push(tag);
        }
        StarField::from_parts(positions, colors, sizes).unwrap()
    }

    #[test]
    fn generate_fills_all_arrays() {
        let mut rng = SceneRng::seeded(3);
        let cfg = StarFieldConfig {
            count: 250,
            ..StarFieldConfig::default()
        };
        let field = StarField::generate(&cfg, &mut rng);
        assert_eq!(field.len(), 250);
        assert_eq!(field.positions().len(), 750);
        assert_eq!(field.colors().len(), 750);
    }

    #[test]
    fn generated_stars_sit_in_shell() {
        let mut rng = SceneRng::seeded(11);
        let cfg = StarFieldConfig::default();
        let field = StarField::generate(&cfg, &mut rng);
        for i in 0..field.len() {
            let [x, y, z] = field.position(i).unwrap();
            let r = (x * x + y * y + z * z).sqrt();
            assert!(r >= cfg.radius - 0.01 && r <= cfg.radius + cfg.depth + 0.01);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let cfg = StarFieldConfig::default();
        let a = StarField::generate(&cfg, &mut SceneRng::seeded(5));
        let b = StarField::generate(&cfg, &mut SceneRng::seeded(5));
        assert_eq!(a, b);
    }

    #[test]
    fn horizon_filter_keeps_arrays_in_step() {
        let mut field = tagged_field(&[5.0, -1.0, 0.0, -0.5, 12.0, -30.0]);
        let removed = field.retain_above_horizon();

        assert_eq!(removed, 3);
        assert_eq!(field.positions().len() / 3, field.len());
        assert_eq!(field.colors().len() / 3, field.len());
        for i in 0..field.len() {
            let [tag, y, _] = field.position(i).unwrap();
            assert!(y >= 0.0);
            assert_eq!(field.colors()[i * 3], tag);
            assert_eq!(field.sizes()[i], tag);
        }
        let kept: Vec<f32> = field.sizes().to_vec();
        assert_eq!(kept, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn horizon_filter_on_generated_field() {
        let mut field = StarField::generate(&StarFieldConfig::default(), &mut SceneRng::seeded(9));
        let before = field.len();
        let removed = field.retain_above_horizon();
        assert!(removed > 0);
        assert_eq!(field.len(), before - removed);
        assert!((0..field.len()).all(|i| field.position(i).unwrap()[1] >= 0.0));
    }

    #[test]
    fn empty_field_filters_to_empty() {
        let mut field = StarField::default();
        assert_eq!(field.retain_above_horizon(), 0);
        assert!(field.is_empty());
    }

    #[test]
    fn from_parts_rejects_mismatch() {
        let err = StarField::from_parts(vec![0.0; 6], vec![0.0; 3], vec![1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            SkyError::MismatchedArrays {
                positions: 6,
                colors: 3,
                sizes: 2
            }
        );
    }
}
