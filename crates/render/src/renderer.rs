use std::fmt::Write as _;

use crate::frame::{DrawShape, LightKind, RenderFrame};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a frame description and produces output. It never
/// mutates scene state.
pub trait Renderer {
    type Output;

    fn render(&self, frame: &RenderFrame) -> Self::Output;
}

/// Text renderer used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// List every draw item, not just the totals.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &RenderFrame) -> String {
        // Writing into a String cannot fail.
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} (t={:.3}s, {}) ===",
            frame.frame_index,
            frame.elapsed_seconds,
            if frame.is_day { "day" } else { "night" }
        );
        let v = &frame.view;
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            v.eye.x, v.eye.y, v.eye.z, v.target.x, v.target.y, v.target.z, v.fov_degrees
        );
        let stops: Vec<String> = frame
            .background
            .iter()
            .map(|(offset, [r, g, b])| format!("{offset:.2}:({r:.2},{g:.2},{b:.2})"))
            .collect();
        let _ = writeln!(out, "Sky: {}", stops.join(" "));
        for light in &frame.lights {
            let kind = match light.kind {
                LightKind::Ambient => "ambient".to_string(),
                LightKind::Directional { direction: d } => {
                    format!("directional ({:.2}, {:.2}, {:.2})", d.x, d.y, d.z)
                }
            };
            let _ = writeln!(out, "Light: {kind} intensity={:.2}", light.intensity);
        }
        match frame.bloom {
            Some(b) => {
                let _ = writeln!(
                    out,
                    "Bloom: strength={:.2} radius={:.2} threshold={:.2}",
                    b.strength, b.radius, b.threshold
                );
            }
            None => out.push_str("Bloom: off\n"),
        }
        let _ = writeln!(
            out,
            "Ocean: {} vertices{}",
            frame.ocean.vertex_count,
            if frame.ocean.dirty { " (dirty)" } else { "" }
        );
        let _ = writeln!(
            out,
            "Stars: {} opacity={:.2}",
            frame.stars.count, frame.stars.opacity
        );
        let _ = writeln!(
            out,
            "Items: {} ({} fallback)",
            frame.items.len(),
            frame.fallback_count()
        );

        if self.verbose {
            for item in &frame.items {
                let p = item.transform.position;
                let shape = match item.shape {
                    DrawShape::Model(id) => format!("model {:016x}", id.0),
                    DrawShape::Primitive(_) => "box".to_string(),
                };
                let _ = writeln!(
                    out,
                    "  [{}] {shape} pos=({:.2}, {:.2}, {:.2})",
                    item.label, p.x, p.y, p.z
                );
            }
        }
        for label in &frame.overlay {
            let _ = writeln!(out, "Label: {label}");
        }

        tracing::trace!(frame = frame.frame_index, bytes = out.len(), "debug frame rendered");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{BloomPass, DrawItem};
    use isleworld_assets::Primitive;
    use isleworld_common::Transform;

    #[test]
    fn empty_frame() {
        let output = DebugTextRenderer::new().render(&RenderFrame::default());
        assert!(output.contains("Frame 0"));
        assert!(output.contains("night"));
        assert!(output.contains("Bloom: off"));
        assert!(output.contains("Items: 0 (0 fallback)"));
    }

    #[test]
    fn verbose_lists_items_and_labels() {
        let frame = RenderFrame {
            is_day: true,
            bloom: Some(BloomPass {
                strength: 1.2,
                radius: 0.4,
                threshold: 0.8,
            }),
            items: vec![DrawItem {
                label: "tech/book".into(),
                transform: Transform::default(),
                shape: DrawShape::Primitive(Primitive::cube(1.0)),
                emissive: 0.0,
            }],
            overlay: vec!["[GET] tech".into()],
            ..RenderFrame::default()
        };
        let output = DebugTextRenderer::verbose().render(&frame);
        assert!(output.contains("day"));
        assert!(output.contains("strength=1.20"));
        assert!(output.contains("[tech/book] box"));
        assert!(output.contains("Label: [GET] tech"));

        let terse = DebugTextRenderer::new().render(&frame);
        assert!(!terse.contains("[tech/book]"));
    }
}
