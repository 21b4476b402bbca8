use glam::Vec3;
use serde::Serialize;

use isleworld_assets::{AssetId, ModelSlot, Primitive};
use isleworld_common::Transform;

/// Camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 25.0, 60.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LightKind {
    Ambient,
    Directional { direction: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Light {
    pub kind: LightKind,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Post-processing bloom. Absent from the frame when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BloomPass {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OceanStats {
    pub vertex_count: usize,
    /// The live buffer changed since the last upload.
    pub dirty: bool,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StarStats {
    pub count: usize,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawShape {
    Model(AssetId),
    Primitive(Primitive),
}

impl From<ModelSlot> for DrawShape {
    fn from(slot: ModelSlot) -> Self {
        match slot {
            ModelSlot::Loaded(id) => Self::Model(id),
            ModelSlot::Fallback(primitive) => Self::Primitive(primitive),
        }
    }
}

/// One object in the draw list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    pub label: String,
    pub transform: Transform,
    pub shape: DrawShape,
    pub emissive: f32,
}

/// Everything a renderer needs to draw one frame.
///
/// Built from scene state by value; a renderer cannot reach back into the
/// scene through it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderFrame {
    pub frame_index: u64,
    pub elapsed_seconds: f64,
    pub is_day: bool,
    /// Background gradient as `(offset, color)` stops, top to bottom.
    pub background: Vec<(f32, [f32; 3])>,
    pub lights: Vec<Light>,
    pub bloom: Option<BloomPass>,
    pub view: RenderView,
    pub ocean: OceanStats,
    pub stars: StarStats,
    pub items: Vec<DrawItem>,
    /// Screen-space labels, such as the hover caption of an island.
    pub overlay: Vec<String>,
}

impl RenderFrame {
    pub fn item(&self, label: &str) -> Option<&DrawItem> {
        self.items.iter().find(|i| i.label == label)
    }

    pub fn fallback_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.shape, DrawShape::Primitive(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_maps_to_shape() {
        let id = AssetId(7);
        assert_eq!(DrawShape::from(ModelSlot::Loaded(id)), DrawShape::Model(id));
        let cube = Primitive::cube(1.0);
        assert_eq!(
            DrawShape::from(ModelSlot::Fallback(cube)),
            DrawShape::Primitive(cube)
        );
    }

    #[test]
    fn counts_fallback_items() {
        let frame = RenderFrame {
            items: vec![
                DrawItem {
                    label: "a".into(),
                    transform: Transform::default(),
                    shape: DrawShape::Model(AssetId(1)),
                    emissive: 0.0,
                },
                DrawItem {
                    label: "b".into(),
                    transform: Transform::default(),
                    shape: DrawShape::Primitive(Primitive::cube(0.5)),
                    emissive: 0.0,
                },
            ],
            ..RenderFrame::default()
        };
        assert_eq!(frame.fallback_count(), 1);
        assert!(frame.item("b").is_some());
        assert!(frame.item("c").is_none());
    }

    #[test]
    fn frame_serializes() {
        let frame = RenderFrame {
            bloom: Some(BloomPass {
                strength: 1.0,
                radius: 0.4,
                threshold: 0.85,
            }),
            ..RenderFrame::default()
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"bloom\""));
        assert!(json.contains("\"threshold\":0.85"));
    }
}
