use serde::{Deserialize, Serialize};

/// One color stop of a vertical sky gradient. `offset` runs 0 (top) to 1
/// (horizon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: [f32; 3],
}

impl ColorStop {
    pub const fn new(offset: f32, color: [f32; 3]) -> Self {
        Self { offset, color }
    }
}

/// Ordered list of color stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyGradient {
    stops: Vec<ColorStop>,
}

impl SkyGradient {
    /// Stops are sorted by offset; offsets are clamped into `[0, 1]`.
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        for s in &mut stops {
            s.offset = if s.offset.is_finite() {
                s.offset.clamp(0.0, 1.0)
            } else {
                0.0
            };
        }
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { stops }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Interpolated color at `t`. An empty gradient is black.
    pub fn sample(&self, t: f32) -> [f32; 3] {
        let t = t.clamp(0.0, 1.0);
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return [0.0; 3],
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let span = b.offset - a.offset;
                let k = if span > 0.0 { (t - a.offset) / span } else { 0.0 };
                return [
                    a.color[0] + (b.color[0] - a.color[0]) * k,
                    a.color[1] + (b.color[1] - a.color[1]) * k,
                    a.color[2] + (b.color[2] - a.color[2]) * k,
                ];
            }
        }
        last.color
    }
}

/// Theme colors supplied by the application's theme layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyTheme {
    pub day: Vec<ColorStop>,
    pub night: Vec<ColorStop>,
    pub sea_day: [f32; 3],
    pub sea_night: [f32; 3],
}

impl Default for SkyTheme {
    fn default() -> Self {
        Self {
            day: vec![
                ColorStop::new(0.0, [0.35, 0.62, 0.92]),
                ColorStop::new(0.55, [0.60, 0.80, 0.96]),
                ColorStop::new(1.0, [0.96, 0.93, 0.86]),
            ],
            night: vec![
                ColorStop::new(0.0, [0.01, 0.01, 0.05]),
                ColorStop::new(0.6, [0.04, 0.06, 0.18]),
                ColorStop::new(1.0, [0.10, 0.10, 0.28]),
            ],
            sea_day: [0.12, 0.48, 0.70],
            sea_night: [0.02, 0.08, 0.20],
        }
    }
}

impl SkyTheme {
    pub fn gradient(&self, is_day: bool) -> SkyGradient {
        SkyGradient::new(if is_day {
            self.day.clone()
        } else {
            self.night.clone()
        })
    }

    pub fn sea_color(&self, is_day: bool) -> [f32; 3] {
        if is_day { self.sea_day } else { self.sea_night }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_endpoints_and_midpoint() {
        let g = SkyGradient::new(vec![
            ColorStop::new(1.0, [1.0, 1.0, 1.0]),
            ColorStop::new(0.0, [0.0, 0.0, 0.0]),
        ]);
        assert_eq!(g.stops()[0].offset, 0.0);
        assert_eq!(g.sample(-2.0), [0.0, 0.0, 0.0]);
        assert_eq!(g.sample(2.0), [1.0, 1.0, 1.0]);
        assert_eq!(g.sample(0.5), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn empty_gradient_is_black() {
        assert_eq!(SkyGradient::new(Vec::new()).sample(0.3), [0.0; 3]);
    }

    #[test]
    fn single_stop_is_flat() {
        let g = SkyGradient::new(vec![ColorStop::new(0.4, [0.2, 0.3, 0.4])]);
        assert_eq!(g.sample(0.0), [0.2, 0.3, 0.4]);
        assert_eq!(g.sample(1.0), [0.2, 0.3, 0.4]);
    }

    #[test]
    fn theme_switches_gradients() {
        let theme = SkyTheme::default();
        assert_ne!(theme.gradient(true), theme.gradient(false));
        assert_eq!(theme.sea_color(false), theme.sea_night);
    }
}
