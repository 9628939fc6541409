//! Dual-strand stat helix: geometry and hover hit-testing
//!
//! Maps an ordered list of `{trait, value}` stats onto two phase-shifted
//! sinusoidal strands. Geometry is recomputed from the surface size on
//! every query, so the draw pass and the hit test always agree.

use glam::Vec2;

use crate::consts::{HELIX_FREQUENCY, HELIX_HIT_TOLERANCE};

/// One stat row: a named trait with a value in [0, 100]
#[derive(Debug, Clone)]
pub struct HelixStat {
    pub trait_name: String,
    pub value: f32,
}

impl HelixStat {
    pub fn new(trait_name: impl Into<String>, value: f32) -> Self {
        Self {
            trait_name: trait_name.into(),
            value: value.clamp(0.0, 100.0),
        }
    }
}

/// Resolved per-stat geometry for one frame
#[derive(Debug, Clone, Copy)]
pub struct NodePair {
    pub y: f32,
    /// Strand-1 node center x
    pub x1: f32,
    /// Strand-2 node center x
    pub x2: f32,
    pub radius: f32,
    pub hovered: bool,
}

#[derive(Debug, Default)]
pub struct StatHelix {
    stats: Vec<HelixStat>,
    size: Vec2,
    hovered: Option<usize>,
}

impl StatHelix {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            stats: Vec::new(),
            size: Vec2::new(width, height),
            hovered: None,
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Replace the stat list. Hover state is recomputed on the next
    /// pointer event.
    pub fn set_stats(&mut self, stats: Vec<HelixStat>) {
        self.stats = stats;
        self.hovered = None;
    }

    pub fn stats(&self) -> &[HelixStat] {
        &self.stats
    }

    /// Node radius grows monotonically with the stat value:
    /// 0 -> 10 px, 100 -> 30 px
    pub fn node_radius(value: f32) -> f32 {
        value / 100.0 * 20.0 + 10.0
    }

    /// Strand x at height `y`; `phase` 0.0 for strand 1, PI for strand 2
    pub fn strand_x(&self, y: f32, phase: f32) -> f32 {
        let amplitude = self.size.x / 4.0;
        self.size.x / 2.0 + (y * HELIX_FREQUENCY + phase).sin() * amplitude
    }

    /// Evenly spaced vertical slot of stat `index`
    fn slot_y(&self, index: usize) -> f32 {
        self.size.y / (self.stats.len() as f32 + 1.0) * (index as f32 + 1.0)
    }

    /// Per-stat node geometry, in list order. Empty stats yield nothing.
    pub fn node_pairs(&self) -> Vec<NodePair> {
        self.stats
            .iter()
            .enumerate()
            .map(|(i, stat)| {
                let y = self.slot_y(i);
                NodePair {
                    y,
                    x1: self.strand_x(y, 0.0),
                    x2: self.strand_x(y, std::f32::consts::PI),
                    radius: Self::node_radius(stat.value),
                    hovered: self.hovered == Some(i),
                }
            })
            .collect()
    }

    /// Pointer-move hover test. Iterates stats in order and lets later
    /// matches overwrite earlier ones when nodes overlap; this mirrors the
    /// shipped behavior and is deliberately not nearest-distance.
    pub fn hit_test(&mut self, pointer: Vec2) -> Option<&str> {
        let mut hit = None;
        for (i, pair) in self.node_pairs().iter().enumerate() {
            let reach = pair.radius + HELIX_HIT_TOLERANCE;
            if node_hit(pointer, Vec2::new(pair.x1, pair.y), reach)
                || node_hit(pointer, Vec2::new(pair.x2, pair.y), reach)
            {
                hit = Some(i);
            }
        }
        self.hovered = hit;
        self.hovered_trait()
    }

    /// Currently hovered trait name, for external tooltip rendering
    pub fn hovered_trait(&self) -> Option<&str> {
        self.hovered
            .and_then(|i| self.stats.get(i))
            .map(|s| s.trait_name.as_str())
    }
}

/// A pointer exactly on the reach boundary still hits
fn node_hit(pointer: Vec2, center: Vec2, reach: f32) -> bool {
    crate::distance(pointer, center) <= reach
}
