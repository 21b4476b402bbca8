use isleworld_common::SceneRng;

use crate::gradient::{SkyGradient, SkyTheme};
use crate::stars::{StarField, StarFieldConfig};

/// Star brightness multiplier by time of day.
const NIGHT_STAR_OPACITY: f32 = 1.0;
const DAY_STAR_OPACITY: f32 = 0.2;

/// Gradient sky plus star field, switched between day and night.
///
/// Going to day does not touch the star buffer immediately: the horizon
/// filter is scheduled `rebuild_delay_ms` later and every further toggle
/// cancels and reschedules it, so rapid flips never race a rebuild.
#[derive(Debug, Clone)]
pub struct CelestialBackdrop {
    theme: SkyTheme,
    config: StarFieldConfig,
    rng: SceneRng,
    is_day: bool,
    gradient: SkyGradient,
    stars: StarField,
    /// Stars were filtered since the last full generation.
    filtered: bool,
    pending_filter_at_ms: Option<f64>,
    rebuilds: u32,
}

impl CelestialBackdrop {
    pub fn new(theme: SkyTheme, config: StarFieldConfig, is_day: bool, mut rng: SceneRng) -> Self {
        let mut stars = StarField::generate(&config, &mut rng);
        // Nothing to debounce at mount time.
        if is_day {
            stars.retain_above_horizon();
        }
        Self {
            gradient: theme.gradient(is_day),
            theme,
            config,
            rng,
            is_day,
            stars,
            filtered: is_day,
            pending_filter_at_ms: None,
            rebuilds: 0,
        }
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn gradient(&self) -> &SkyGradient {
        &self.gradient
    }

    pub fn theme(&self) -> &SkyTheme {
        &self.theme
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn star_opacity(&self) -> f32 {
        if self.is_day {
            DAY_STAR_OPACITY
        } else {
            NIGHT_STAR_OPACITY
        }
    }

    pub fn has_pending_rebuild(&self) -> bool {
        self.pending_filter_at_ms.is_some()
    }

    /// Number of star buffer rebuilds (filters and regenerations) since mount.
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds
    }

    /// Swap theme colors. The star buffer is unaffected.
    pub fn set_theme(&mut self, theme: SkyTheme) {
        self.gradient = theme.gradient(self.is_day);
        self.theme = theme;
    }

    pub fn set_day(&mut self, is_day: bool, now_ms: f64) {
        if is_day == self.is_day {
            return;
        }
        self.is_day = is_day;
        self.gradient = self.theme.gradient(is_day);

        if is_day {
            let at = now_ms + self.config.rebuild_delay_ms;
            if self.pending_filter_at_ms.replace(at).is_some() {
                tracing::debug!(at, "star filter rescheduled");
            }
        } else {
            if self.pending_filter_at_ms.take().is_some() {
                tracing::debug!("pending star filter cancelled");
            }
            if self.filtered {
                self.stars = StarField::generate(&self.config, &mut self.rng);
                self.filtered = false;
                self.rebuilds += 1;
                tracing::debug!(stars = self.stars.len(), "star field regenerated");
            }
        }
    }

    /// Run the deferred horizon filter once its deadline has passed.
    pub fn tick(&mut self, now_ms: f64) {
        let Some(at) = self.pending_filter_at_ms else {
            return;
        };
        if now_ms < at {
            return;
        }
        self.pending_filter_at_ms = None;
        if self.is_day && !self.filtered {
            let removed = self.stars.retain_above_horizon();
            self.filtered = true;
            self.rebuilds += 1;
            tracing::debug!(removed, kept = self.stars.len(), "stars below horizon removed");
        }
    }
}
