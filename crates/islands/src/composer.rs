use glam::{Quat, Vec3};

use isleworld_assets::{ModelLibrary, ModelSlot, Primitive};
use isleworld_common::{Tick, Transform};
use isleworld_input::{BoundingSphere, HoverState};

use crate::config::{IslandConfig, ObjectKind};

const BOB_FREQUENCY: f32 = 0.9;
const BOB_AMPLITUDE: f32 = 0.7;
const BOB_OFFSET: f32 = -1.5;
const SPIN_RATE: f32 = 5.0;

/// Model key and footprint of the floating base every island stands on.
const BASE_MODEL_KEY: &str = "islandBase";
const BASE_HALF_EXTENTS: [f32; 3] = [6.0, 1.0, 6.0];

/// Navigation intent raised by an island.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IslandEvent {
    Clicked { path: String },
}

/// An object that made it onto the island.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub kind: ObjectKind,
    /// Transform relative to the island base.
    pub local: Transform,
    pub slot: ModelSlot,
}

/// One floating island.
///
/// Owns the transform of its base group. Objects ride on the base, so the
/// bob and hover spin move them with it.
#[derive(Debug, Clone)]
pub struct IslandComposer {
    path: String,
    anchor: Vec3,
    base: Transform,
    base_slot: ModelSlot,
    objects: Vec<PlacedObject>,
    skipped: usize,
    hover: HoverState,
}

impl IslandComposer {
    pub fn new(config: &IslandConfig, library: &mut ModelLibrary) -> Self {
        let mut objects = Vec::with_capacity(config.objects.len());
        let mut skipped = 0;
        for (index, object) in config.objects.iter().enumerate() {
            if !object.kind.is_known() {
                tracing::debug!(path = %config.path, index, kind = object.kind.name(), "unknown object kind skipped");
                skipped += 1;
                continue;
            }
            if object.scale.is_nan() || object.scale <= 0.0 {
                tracing::warn!(path = %config.path, index, scale = object.scale, "object with invalid scale skipped");
                skipped += 1;
                continue;
            }
            let slot = library.resolve(object.kind.name(), object.kind.fallback_primitive());
            objects.push(PlacedObject {
                kind: object.kind.clone(),
                local: Transform::from_position(object.position).with_scale(object.scale),
                slot,
            });
        }

        let base_slot = library.resolve(
            BASE_MODEL_KEY,
            Primitive::Box {
                half_extents: BASE_HALF_EXTENTS,
            },
        );

        let mut island = Self {
            path: config.path.clone(),
            anchor: config.position,
            base: Transform::from_position(config.position),
            base_slot,
            objects,
            skipped,
            hover: HoverState::default(),
        };
        island.animate(0.0);
        tracing::debug!(path = %island.path, objects = island.objects.len(), skipped, "island composed");
        island
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Configured position, before bobbing.
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn base(&self) -> &Transform {
        &self.base
    }

    pub fn base_slot(&self) -> ModelSlot {
        self.base_slot
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    /// Objects left out because their kind was unknown or their scale invalid.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    pub fn tooltip_visible(&self) -> bool {
        self.hover.is_hovered()
    }

    /// Floating label shown while hovered.
    pub fn label(&self) -> Option<String> {
        self.hover
            .is_hovered()
            .then(|| format!("[GET] {}", self.path))
    }

    /// World transform of a placed object on the current frame.
    pub fn object_transform(&self, object: &PlacedObject) -> Transform {
        Transform {
            position: self.base.position + self.base.rotation * object.local.position,
            rotation: self.base.rotation * object.local.rotation,
            scale: object.local.scale,
        }
    }

    /// Pointer-pickable volume around the base and everything on it.
    pub fn bounds(&self) -> BoundingSphere {
        let base_radius = Vec3::from_array(BASE_HALF_EXTENTS).length();
        let radius = self
            .objects
            .iter()
            .map(|o| o.local.position.length() + object_radius(o))
            .fold(base_radius, f32::max);
        BoundingSphere::new(self.base.position, radius)
    }

    pub fn tick(&mut self, tick: &Tick) {
        self.animate(tick.elapsed());
    }

    fn animate(&mut self, elapsed: f32) {
        self.base.position.y = self.anchor.y + (elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE + BOB_OFFSET;
        self.base.rotation = if self.hover.is_hovered() {
            Quat::from_rotation_y(elapsed * SPIN_RATE)
        } else {
            Quat::IDENTITY
        };
    }

    /// Returns `true` on a transition into hover.
    pub fn pointer_enter(&mut self, now_ms: f64) -> bool {
        let entered = self.hover.enter(now_ms);
        if entered {
            tracing::trace!(path = %self.path, "island hover enter");
        }
        entered
    }

    /// Returns `true` on a transition out of hover. The spin snaps back to
    /// rest immediately.
    pub fn pointer_leave(&mut self, now_ms: f64) -> bool {
        let left = self.hover.leave(now_ms);
        if left {
            self.base.rotation = Quat::IDENTITY;
            tracing::trace!(path = %self.path, "island hover leave");
        }
        left
    }

    /// Single clicks never navigate, so orbiting the camera cannot trigger a
    /// page change by accident.
    pub fn click(&mut self) -> Option<IslandEvent> {
        None
    }

    pub fn double_click(&mut self) -> Option<IslandEvent> {
        tracing::debug!(path = %self.path, "island double-clicked");
        Some(IslandEvent::Clicked {
            path: self.path.clone(),
        })
    }
}

fn object_radius(object: &PlacedObject) -> f32 {
    let unit = match object.slot {
        ModelSlot::Fallback(primitive) => primitive.bounding_radius(),
        ModelSlot::Loaded(_) => object.kind.fallback_primitive().bounding_radius(),
    };
    unit * object.local.scale.max_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IslandObject, predefined_island};

    fn compose(config: &IslandConfig) -> IslandComposer {
        IslandComposer::new(config, &mut ModelLibrary::new())
    }

    fn at(elapsed: f64) -> Tick {
        Tick::new(0.016, elapsed)
    }

    #[test]
    fn places_every_known_object() {
        let config = predefined_island("tech").unwrap();
        let island = compose(&config);
        assert_eq!(island.objects().len(), config.objects.len());
        assert_eq!(island.skipped(), 0);
        assert!(island.objects().iter().all(|o| o.slot.is_fallback()));
    }

    #[test]
    fn unknown_kinds_are_skipped_not_fatal() {
        let config = IslandConfig::new(
            "mixed",
            [0.0; 3],
            vec![
                IslandObject::new("rocket", [0.0; 3], 1.0),
                IslandObject::new(ObjectKind::Donut, [1.0, 1.0, 0.0], 1.0),
                IslandObject::new(ObjectKind::Book, [0.0; 3], -2.0),
            ],
        );
        let island = compose(&config);
        assert_eq!(island.objects().len(), 1);
        assert_eq!(island.objects()[0].kind, ObjectKind::Donut);
        assert_eq!(island.skipped(), 2);
    }

    #[test]
    fn empty_island_is_valid() {
        let island = compose(&IslandConfig::new("bare", [5.0, 0.0, 5.0], Vec::new()));
        assert!(island.objects().is_empty());
        assert!(island.bounds().radius > 0.0);
    }

    #[test]
    fn bob_follows_closed_form() {
        let mut island = compose(&IslandConfig::fallback("x", 0));
        for t in [0.0, 0.5, 3.25, 100.0] {
            island.tick(&at(t));
            let expected = (t as f32 * 0.9).sin() * 0.7 - 1.5;
            assert!((island.base().position.y - expected).abs() < 1e-6);
        }
        assert_eq!(island.base().position.x, -18.0);
    }

    #[test]
    fn spins_only_while_hovered() {
        let mut island = compose(&IslandConfig::fallback("x", 0));
        island.tick(&at(1.0));
        assert_eq!(island.base().rotation, Quat::IDENTITY);

        island.pointer_enter(1000.0);
        island.tick(&at(1.2));
        let expected = Quat::from_rotation_y(1.2 * 5.0);
        assert!(island.base().rotation.abs_diff_eq(expected, 1e-5));

        island.pointer_leave(1300.0);
        assert_eq!(island.base().rotation, Quat::IDENTITY);
        island.tick(&at(1.4));
        assert_eq!(island.base().rotation, Quat::IDENTITY);
    }

    #[test]
    fn label_tracks_hover() {
        let mut island = compose(&predefined_island("life").unwrap());
        assert_eq!(island.label(), None);
        assert!(island.pointer_enter(0.0));
        assert!(!island.pointer_enter(5.0));
        assert!(island.tooltip_visible());
        assert_eq!(island.label().as_deref(), Some("[GET] life"));
        assert!(island.pointer_leave(10.0));
        assert_eq!(island.label(), None);
    }

    #[test]
    fn single_click_never_navigates() {
        let mut island = compose(&predefined_island("tech").unwrap());
        for _ in 0..5 {
            assert_eq!(island.click(), None);
        }
    }

    #[test]
    fn double_click_navigates_once() {
        let mut island = compose(&predefined_island("tech").unwrap());
        assert_eq!(
            island.double_click(),
            Some(IslandEvent::Clicked {
                path: "tech".into()
            })
        );
    }

    #[test]
    fn objects_ride_the_base() {
        let mut island = compose(&IslandConfig::fallback("x", 1));
        island.tick(&at(2.0));
        let palm = &island.objects()[0];
        let world = island.object_transform(palm);
        assert!((world.position - (island.base().position + Vec3::new(0.0, 1.5, 0.0))).length() < 1e-5);
    }

    #[test]
    fn bounds_cover_objects() {
        let island = compose(&predefined_island("tech").unwrap());
        let bounds = island.bounds();
        for object in island.objects() {
            assert!(bounds.contains(island.object_transform(object).position));
        }
    }
}
