use glam::Vec2;

use crate::ray::Ray;

/// A pointer action delivered by the platform layer.
///
/// The scene consumes actions, never raw window events. The platform is
/// responsible for turning button presses into clicks and double-clicks;
/// a double-click arrives as its own action after the clicks that formed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Pointer moved; drives hover enter/leave.
    Move(Ray),
    /// Single click.
    Click(Ray),
    /// Double click.
    DoubleClick(Ray),
    /// Pointer left the canvas; everything hovered is released.
    Leave,
}

impl PointerAction {
    pub fn ray(&self) -> Option<&Ray> {
        match self {
            Self::Move(r) | Self::Click(r) | Self::DoubleClick(r) => Some(r),
            Self::Leave => None,
        }
    }
}

/// Transient hover flag plus the time it last changed, owned by whichever
/// scene object produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    hovered: bool,
    since_ms: f64,
}

impl HoverState {
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Time of the last enter or leave.
    pub fn since_ms(&self) -> f64 {
        self.since_ms
    }

    /// Returns `true` if this was a transition into hover.
    pub fn enter(&mut self, now_ms: f64) -> bool {
        self.set(true, now_ms)
    }

    /// Returns `true` if this was a transition out of hover.
    pub fn leave(&mut self, now_ms: f64) -> bool {
        self.set(false, now_ms)
    }

    fn set(&mut self, hovered: bool, now_ms: f64) -> bool {
        if self.hovered == hovered {
            return false;
        }
        self.hovered = hovered;
        self.since_ms = now_ms;
        true
    }
}

/// Convert a pixel position to normalized device coordinates (`-1..1`, +y up).
/// Returns `None` for an empty viewport.
pub fn pixel_to_ndc(pixel: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        pixel.x / viewport.x * 2.0 - 1.0,
        1.0 - pixel.y / viewport.y * 2.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn leave_has_no_ray() {
        assert!(PointerAction::Leave.ray().is_none());
        let r = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        assert_eq!(PointerAction::DoubleClick(r).ray(), Some(&r));
    }

    #[test]
    fn hover_reports_transitions_only() {
        let mut h = HoverState::default();
        assert!(h.enter(10.0));
        assert!(!h.enter(20.0));
        assert_eq!(h.since_ms(), 10.0);
        assert!(h.leave(30.0));
        assert!(!h.is_hovered());
        assert!(!h.leave(40.0));
    }

    #[test]
    fn ndc_corners() {
        let vp = Vec2::new(800.0, 600.0);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, vp), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pixel_to_ndc(vp, vp), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pixel_to_ndc(vp / 2.0, vp), Some(Vec2::ZERO));
    }

    #[test]
    fn empty_viewport_has_no_ndc() {
        assert!(pixel_to_ndc(Vec2::ONE, Vec2::ZERO).is_none());
    }
}
