//! Draw-list primitives
//!
//! Effect state renders into a flat list of primitive shapes; the host
//! translates those into whatever drawing calls its surface supports.
//! Keeping this declarative means the lifecycle and physics logic stays
//! testable without a live rendering surface.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Linear RGBA
pub type Color = [f32; 4];

/// Convert HSLA (hue in degrees) to RGBA
pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Color {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m, a]
}

/// Colors for effect elements
pub mod colors {
    use super::Color;

    pub const STRAND_PRIMARY: Color = [0.388, 0.400, 0.945, 1.0];
    pub const STRAND_SECONDARY: Color = [0.925, 0.282, 0.600, 1.0];
    pub const NODE_PRIMARY_HOVER: Color = [0.506, 0.549, 0.973, 1.0];
    pub const NODE_SECONDARY_HOVER: Color = [0.957, 0.447, 0.714, 1.0];
    pub const CROSSBAR: Color = [0.655, 0.545, 0.980, 1.0];
    pub const CROSSBAR_HOVER: Color = [0.133, 0.827, 0.933, 1.0];
    pub const LABEL: Color = [1.0, 1.0, 1.0, 1.0];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// One primitive drawing command
#[derive(Debug, Clone)]
pub enum Shape {
    /// Filled circle
    Circle { center: Vec2, radius: f32, color: Color },
    /// Stroked ring; dashed rings are scroll-up ripples
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        dashed: bool,
        color: Color,
    },
    /// Radial gradient fading to transparent at the rim
    Glow { center: Vec2, radius: f32, color: Color },
    /// Stroked line segment
    Segment { a: Vec2, b: Vec2, width: f32, color: Color },
    /// Connected stroked path (helix backbones)
    Polyline { points: Vec<Vec2>, width: f32, color: Color },
    /// A single glyph (emoji particle, meteor)
    Glyph {
        pos: Vec2,
        ch: char,
        size: f32,
        opacity: f32,
    },
    /// Text label
    Label {
        pos: Vec2,
        text: String,
        size: f32,
        align: TextAlign,
        bold: bool,
    },
}

/// Ordered list of draw commands for one frame
#[derive(Debug, Default)]
pub struct DrawList {
    shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.shapes.push(Shape::Circle { center, radius, color });
    }

    pub fn ring(&mut self, center: Vec2, radius: f32, width: f32, dashed: bool, color: Color) {
        self.shapes.push(Shape::Ring {
            center,
            radius,
            width,
            dashed,
            color,
        });
    }

    pub fn glow(&mut self, center: Vec2, radius: f32, color: Color) {
        self.shapes.push(Shape::Glow { center, radius, color });
    }

    pub fn segment(&mut self, a: Vec2, b: Vec2, width: f32, color: Color) {
        self.shapes.push(Shape::Segment { a, b, width, color });
    }

    pub fn polyline(&mut self, points: Vec<Vec2>, width: f32, color: Color) {
        self.shapes.push(Shape::Polyline { points, width, color });
    }

    pub fn glyph(&mut self, pos: Vec2, ch: char, size: f32, opacity: f32) {
        self.shapes.push(Shape::Glyph { pos, ch, size, opacity });
    }

    pub fn label(&mut self, pos: Vec2, text: String, size: f32, align: TextAlign, bold: bool) {
        self.shapes.push(Shape::Label {
            pos,
            text,
            size,
            align,
            bold,
        });
    }

    /// Flatten circle and glow commands into a Pod instance batch for
    /// hosts that upload to a GPU
    pub fn circle_instances(&self) -> Vec<CircleInstance> {
        self.shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Circle { center, radius, color } | Shape::Glow { center, radius, color } => {
                    Some(CircleInstance {
                        center: [center.x, center.y],
                        radius: *radius,
                        _pad: 0.0,
                        color: *color,
                    })
                }
                _ => None,
            })
            .collect()
    }
}

/// Flat per-circle instance data
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub _pad: f32,
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsla_primaries() {
        let red = hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red[0] - 1.0).abs() < 1e-6 && red[1].abs() < 1e-6);
        let blue = hsla(240.0, 1.0, 0.5, 0.5);
        assert!((blue[2] - 1.0).abs() < 1e-6);
        assert_eq!(blue[3], 0.5);
    }

    #[test]
    fn circle_instances_skip_non_circles() {
        let mut list = DrawList::new();
        list.circle(Vec2::ZERO, 5.0, colors::LABEL);
        list.segment(Vec2::ZERO, Vec2::ONE, 1.0, colors::LABEL);
        list.glow(Vec2::ONE, 8.0, colors::CROSSBAR);
        assert_eq!(list.circle_instances().len(), 2);
    }
}
