use serde::{Deserialize, Serialize};

use isleworld_render::BloomPass;

/// Bloom settings plus the viewport width it needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
    /// Narrower viewports skip the pass.
    pub min_viewport_width: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            strength: 1.0,
            radius: 0.4,
            threshold: 0.85,
            min_viewport_width: 768.0,
        }
    }
}

impl BloomConfig {
    pub fn enabled_for(&self, viewport_width: f32) -> bool {
        viewport_width >= self.min_viewport_width
    }

    pub fn pass_for(&self, viewport_width: f32) -> Option<BloomPass> {
        self.enabled_for(viewport_width).then_some(BloomPass {
            strength: self.strength,
            radius: self.radius,
            threshold: self.threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_by_viewport_width() {
        let bloom = BloomConfig::default();
        assert!(!bloom.enabled_for(767.0));
        assert!(bloom.enabled_for(768.0));
        assert!(bloom.pass_for(375.0).is_none());
        assert_eq!(bloom.pass_for(1920.0).map(|p| p.threshold), Some(0.85));
    }
}
