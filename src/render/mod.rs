//! Declarative render adapter
//!
//! Translates particle-registry and helix state into a `DrawList`. No GPU
//! or canvas handle in sight; the host walks the shape list each frame.

pub mod shapes;

pub use shapes::{Color, DrawList, Shape, TextAlign};

use glam::Vec2;

use crate::consts::*;
use crate::fx::particles::{ParticleKind, Registry};
use crate::fx::{CursorFx, StatHelix};
use shapes::{colors, hsla};

/// Translate every live particle (and the mesh edges) into shapes
pub fn draw_particles(registry: &Registry, cursor: &CursorFx, out: &mut DrawList) {
    // edges go under their nodes
    for (a, b) in cursor.connections() {
        if let (Some(pa), Some(pb)) = (registry.get(*a), registry.get(*b)) {
            out.segment(pa.pos, pb.pos, 1.0, hsla(270.0, 1.0, 0.7, 0.35));
        }
    }

    for p in registry.iter() {
        let alpha = p.alpha();
        match p.kind {
            ParticleKind::TrailDot => {
                out.circle(p.pos, p.size, hsla(p.hue, 1.0, 0.7, alpha));
            }
            ParticleKind::Shockwave => {
                // expanding, dimming glow over the particle lifetime
                let progress = (p.age / SHOCKWAVE_TTL).min(1.0);
                let radius = p.size + progress * 40.0;
                out.glow(p.pos, radius, hsla(p.hue, 1.0, 0.5, 0.3 * (1.0 - progress) * alpha));
            }
            ParticleKind::ScrollRipple | ParticleKind::GroundRipple => {
                let progress = (p.age / RIPPLE_EXPAND_SECS).min(1.0);
                let radius = (p.size / 2.0) * progress.max(0.1);
                out.ring(p.pos, radius, 2.0, p.dashed, hsla(p.hue, 1.0, 0.7, 0.5 * alpha));
            }
            ParticleKind::MeshNode => {
                out.glow(p.pos, p.size * 2.5, hsla(p.hue, 1.0, 0.6, 0.4 * alpha));
                out.circle(p.pos, p.size, hsla(p.hue, 1.0, 0.7, alpha));
            }
            ParticleKind::RainDrop => {
                let tail = p.pos + Vec2::new(0.0, -p.size * 8.0);
                out.segment(tail, p.pos, p.size, hsla(p.hue, 1.0, 0.7, 0.7 * alpha));
            }
            ParticleKind::Meteor => {
                // shot meteors pop outward instead of fading in place
                let size = if p.shot { p.size * (1.0 + (1.0 - alpha)) } else { p.size };
                if let Some(ch) = p.glyph {
                    out.glyph(p.pos, ch, size, alpha);
                }
            }
            ParticleKind::BurstGlyph => {
                if let Some(ch) = p.glyph {
                    out.glyph(p.pos, ch, p.size, alpha);
                }
            }
        }
    }
}

/// Draw the stat helix: backbones, crossbars, glows, nodes and labels.
/// An empty stat list draws nothing.
pub fn draw_helix(helix: &StatHelix, out: &mut DrawList) {
    if helix.stats().is_empty() {
        return;
    }

    let size = helix.size();
    for phase in [0.0, std::f32::consts::PI] {
        let mut points = Vec::new();
        let mut y = 0.0;
        while y < size.y {
            points.push(Vec2::new(helix.strand_x(y, phase), y));
            y += HELIX_SAMPLE_STEP;
        }
        let color = if phase == 0.0 {
            colors::STRAND_PRIMARY
        } else {
            colors::STRAND_SECONDARY
        };
        out.polyline(points, 2.0, color);
    }

    for (stat, pair) in helix.stats().iter().zip(helix.node_pairs()) {
        let glow = if pair.hovered { 10.0 } else { 5.0 };
        let n1 = Vec2::new(pair.x1, pair.y);
        let n2 = Vec2::new(pair.x2, pair.y);

        let (bar_color, bar_width) = if pair.hovered {
            (colors::CROSSBAR_HOVER, 3.0)
        } else {
            (colors::CROSSBAR, 1.0)
        };
        out.segment(n1, n2, bar_width, bar_color);

        out.glow(n1, pair.radius + glow, colors::STRAND_PRIMARY);
        out.circle(
            n1,
            pair.radius,
            if pair.hovered {
                colors::NODE_PRIMARY_HOVER
            } else {
                colors::STRAND_PRIMARY
            },
        );

        out.glow(n2, pair.radius + glow, colors::STRAND_SECONDARY);
        out.circle(
            n2,
            pair.radius,
            if pair.hovered {
                colors::NODE_SECONDARY_HOVER
            } else {
                colors::STRAND_SECONDARY
            },
        );

        let font = if pair.hovered { 14.0 } else { 12.0 };
        out.label(
            Vec2::new(pair.x1 - pair.radius - 10.0, pair.y + 4.0),
            stat.trait_name.clone(),
            font,
            TextAlign::Right,
            pair.hovered,
        );
        out.label(
            Vec2::new(pair.x2 + pair.radius + 10.0, pair.y + 4.0),
            format!("{}%", stat.value.round() as i32),
            font,
            TextAlign::Left,
            pair.hovered,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::HelixStat;

    #[test]
    fn empty_helix_draws_nothing() {
        let helix = StatHelix::new(400.0, 300.0);
        let mut list = DrawList::new();
        draw_helix(&helix, &mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn helix_emits_full_stack_per_stat() {
        let mut helix = StatHelix::new(400.0, 300.0);
        helix.set_stats(vec![
            HelixStat::new("Wit", 40.0),
            HelixStat::new("Charm", 90.0),
        ]);
        let mut list = DrawList::new();
        draw_helix(&helix, &mut list);
        // 2 backbones + per stat: crossbar, 2 glows, 2 circles, 2 labels
        assert_eq!(list.len(), 2 + 2 * 7);
    }

    #[test]
    fn shot_meteor_renders_bigger() {
        let mut registry = Registry::new();
        registry.mount(800.0, 600.0);
        let cursor = CursorFx::new(1);
        let id = registry
            .spawn(
                ParticleKind::Meteor,
                crate::fx::particles::SpawnAttrs {
                    glyph: Some('🚀'),
                    size: 30.0,
                    ..Default::default()
                },
            )
            .unwrap();
        registry.evict_shot(id);
        registry.tick(0.25);

        let mut list = DrawList::new();
        draw_particles(&registry, &cursor, &mut list);
        match &list.shapes()[0] {
            Shape::Glyph { size, opacity, .. } => {
                assert!(*size > 30.0);
                assert!(*opacity < 1.0);
            }
            other => panic!("expected glyph, got {other:?}"),
        }
    }
}
