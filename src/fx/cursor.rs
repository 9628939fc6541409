//! Cursor-reactive effects: shockwaves, pointer trail, scroll ripples and
//! the ambient synaptic mesh
//!
//! Pointer and wheel events arrive from the host; the mesh runs on its own
//! timer and never couples to pointer handling.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particles::{ParticleId, ParticleKind, Registry, SpawnAttrs};
use crate::consts::*;

/// Pointer-speed bucket, px per event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTier {
    /// Slow drift, < 5 px
    Drift,
    /// Cruising, 5..20 px
    Cruise,
    /// Fast flick, >= 20 px
    Supernova,
}

impl SpeedTier {
    pub fn from_speed(speed: f32) -> Self {
        if speed < 5.0 {
            SpeedTier::Drift
        } else if speed < 20.0 {
            SpeedTier::Cruise
        } else {
            SpeedTier::Supernova
        }
    }

    /// Fixed palette hue (degrees): #8f00ff / #b300ff / #ff00e1
    pub fn hue(self) -> f32 {
        match self {
            SpeedTier::Drift => 274.0,
            SpeedTier::Cruise => 282.0,
            SpeedTier::Supernova => 307.0,
        }
    }
}

/// Trail dots linger briefly when the pointer stops moving
const TRAIL_DOT_TTL: f32 = 2.0;

#[derive(Debug)]
pub struct CursorFx {
    rng: Pcg32,
    last_pointer: Option<Vec2>,
    /// Countdown to the next mesh regeneration roll
    mesh_roll: f32,
    /// Remaining display time of the current mesh, if one is up
    mesh_visible: Option<f32>,
    /// Edges between current mesh nodes (probabilistic, replaced with the
    /// node set as one unit)
    connections: Vec<(ParticleId, ParticleId)>,
}

impl CursorFx {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_pointer: None,
            mesh_roll: MESH_ROLL_SECS,
            mesh_visible: None,
            connections: Vec::new(),
        }
    }

    /// Handle a pointer-move: spawn a speed-tinted shockwave and push the
    /// position onto the bounded trail.
    pub fn pointer_move(&mut self, pos: Vec2, registry: &mut Registry) -> SpeedTier {
        let speed = self
            .last_pointer
            .map_or(0.0, |prev| (pos - prev).length());
        self.last_pointer = Some(pos);

        let tier = SpeedTier::from_speed(speed);
        registry.spawn(
            ParticleKind::Shockwave,
            SpawnAttrs {
                pos,
                size: 10.0,
                hue: tier.hue(),
                ttl: SHOCKWAVE_TTL,
                ..Default::default()
            },
        );

        // Trail hue in the blue/violet band, like the original cursor dust
        let hue = self.rng.random_range(240.0..300.0);
        registry.spawn(
            ParticleKind::TrailDot,
            SpawnAttrs {
                pos,
                size: self.rng.random_range(3.0..6.0),
                hue,
                ttl: TRAIL_DOT_TTL,
                ..Default::default()
            },
        );

        tier
    }

    /// Handle a wheel event: ring ripple sized by |delta_y|, solid when
    /// scrolling down, dashed when scrolling up.
    pub fn wheel(&mut self, pos: Vec2, delta_y: f32, registry: &mut Registry) {
        let growth = delta_y.abs().min(RIPPLE_MAX_GROWTH);
        registry.spawn(
            ParticleKind::ScrollRipple,
            SpawnAttrs {
                pos,
                size: RIPPLE_BASE_DIAMETER + growth,
                dashed: delta_y < 0.0,
                hue: self.rng.random_range(220.0..280.0),
                ttl: RIPPLE_EXPAND_SECS,
                ..Default::default()
            },
        );
    }

    /// Advance mesh timers. Independent of pointer events.
    pub fn tick(&mut self, dt: f32, registry: &mut Registry) {
        if let Some(remaining) = &mut self.mesh_visible {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.mesh_visible = None;
                self.connections.clear();
                registry.clear_kind(ParticleKind::MeshNode);
            }
        }

        self.mesh_roll -= dt;
        if self.mesh_roll <= 0.0 {
            self.mesh_roll += MESH_ROLL_SECS;
            if self.rng.random::<f32>() < MESH_REGEN_CHANCE {
                self.regenerate_mesh(registry);
            }
        }
    }

    /// Atomically replace the whole mesh: old nodes and edges go first,
    /// then the full new set is placed. No partial mesh is ever visible.
    fn regenerate_mesh(&mut self, registry: &mut Registry) {
        registry.clear_kind(ParticleKind::MeshNode);
        self.connections.clear();
        self.mesh_visible = None;

        let Some(surface) = registry.surface() else {
            return;
        };

        let mut nodes = Vec::with_capacity(MESH_NODE_COUNT);
        for _ in 0..MESH_NODE_COUNT {
            let pos = Vec2::new(
                self.rng.random_range(0.0..surface.x),
                self.rng.random_range(0.0..surface.y),
            );
            let attrs = SpawnAttrs {
                pos,
                size: self.rng.random_range(2.0..6.0),
                hue: self.rng.random_range(240.0..320.0),
                ttl: MESH_VISIBLE_SECS + 1.0,
                ..Default::default()
            };
            if let Some(id) = registry.spawn(ParticleKind::MeshNode, attrs) {
                nodes.push(id);
            }
        }

        // Probabilistic edges between every unordered pair of placed nodes
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                if self.rng.random::<f32>() < MESH_EDGE_CHANCE {
                    self.connections.push((nodes[i], nodes[j]));
                }
            }
        }

        self.mesh_visible = Some(MESH_VISIBLE_SECS);
        log::debug!(
            "synaptic mesh regenerated: {} nodes, {} connections",
            nodes.len(),
            self.connections.len()
        );
    }

    pub fn connections(&self) -> &[(ParticleId, ParticleId)] {
        &self.connections
    }

    pub fn mesh_visible(&self) -> bool {
        self.mesh_visible.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup(seed: u64) -> (CursorFx, Registry) {
        let mut registry = Registry::new();
        registry.mount(800.0, 600.0);
        (CursorFx::new(seed), registry)
    }

    #[test]
    fn speed_tier_boundaries() {
        assert_eq!(SpeedTier::from_speed(4.9), SpeedTier::Drift);
        assert_eq!(SpeedTier::from_speed(5.0), SpeedTier::Cruise);
        assert_eq!(SpeedTier::from_speed(19.9), SpeedTier::Cruise);
        assert_eq!(SpeedTier::from_speed(20.0), SpeedTier::Supernova);
        assert_eq!(SpeedTier::from_speed(20.1), SpeedTier::Supernova);
    }

    #[test]
    fn pointer_move_reports_tier_from_frame_delta() {
        let (mut fx, mut registry) = setup(7);
        // first event has no previous position, so zero speed
        assert_eq!(
            fx.pointer_move(Vec2::new(100.0, 100.0), &mut registry),
            SpeedTier::Drift
        );
        assert_eq!(
            fx.pointer_move(Vec2::new(110.0, 100.0), &mut registry),
            SpeedTier::Cruise
        );
        assert_eq!(
            fx.pointer_move(Vec2::new(160.0, 100.0), &mut registry),
            SpeedTier::Supernova
        );
    }

    #[test]
    fn ripple_direction_styles() {
        let (mut fx, mut registry) = setup(7);
        fx.wheel(Vec2::new(50.0, 50.0), 40.0, &mut registry);
        fx.wheel(Vec2::new(50.0, 50.0), -40.0, &mut registry);
        let ripples: Vec<_> = registry.iter_kind(ParticleKind::ScrollRipple).collect();
        assert!(!ripples[0].dashed); // down: solid
        assert!(ripples[1].dashed); // up: dashed
    }

    #[test]
    fn ripple_diameter_is_capped() {
        let (mut fx, mut registry) = setup(7);
        fx.wheel(Vec2::ZERO, 5000.0, &mut registry);
        let ripple = registry.iter_kind(ParticleKind::ScrollRipple).next().unwrap();
        assert!(ripple.size <= RIPPLE_BASE_DIAMETER + RIPPLE_MAX_GROWTH);
    }

    #[test]
    fn mesh_regenerates_atomically_within_cap() {
        let (mut fx, mut registry) = setup(42);
        // force several regenerations directly
        for _ in 0..5 {
            fx.regenerate_mesh(&mut registry);
            assert_eq!(registry.count(ParticleKind::MeshNode), MESH_NODE_COUNT);
            // every edge references a node from the current generation
            let ids: Vec<_> = registry
                .iter_kind(ParticleKind::MeshNode)
                .map(|p| p.id)
                .collect();
            for (a, b) in fx.connections() {
                assert!(ids.contains(a) && ids.contains(b));
            }
        }
    }

    #[test]
    fn mesh_clears_after_display_window() {
        let (mut fx, mut registry) = setup(42);
        fx.regenerate_mesh(&mut registry);
        assert!(fx.mesh_visible());
        fx.tick(MESH_VISIBLE_SECS + 0.01, &mut registry);
        assert!(!fx.mesh_visible());
        assert_eq!(registry.count(ParticleKind::MeshNode), 0);
        assert!(fx.connections().is_empty());
    }

    proptest! {
        #[test]
        fn trail_never_exceeds_cap(moves in prop::collection::vec((0.0f32..800.0, 0.0f32..600.0), 1..200)) {
            let (mut fx, mut registry) = setup(1);
            for (x, y) in moves {
                fx.pointer_move(Vec2::new(x, y), &mut registry);
                prop_assert!(registry.live_count(ParticleKind::TrailDot) <= TRAIL_CAP);
            }
        }
    }
}
