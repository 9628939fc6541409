//! Bounded particle registry with guaranteed cleanup
//!
//! Every ephemeral visual entity (trail dot, shockwave, raindrop, meteor,
//! burst glyph, mesh node) lives here. Each kind has a hard cap; overflow
//! evicts the oldest live member of that kind. Eviction is a scheduled
//! fade-out, never an immediate delete, and every particle carries a TTL
//! as a fallback removal path in case its owner never reports completion.

use glam::Vec2;

use crate::consts::EVICT_FADE_SECS;

/// Owning namespace for a particle. Each kind is mutated by exactly one
/// subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    TrailDot,
    Shockwave,
    ScrollRipple,
    MeshNode,
    RainDrop,
    GroundRipple,
    Meteor,
    BurstGlyph,
}

impl ParticleKind {
    /// Maximum live (non-fading) members of this kind
    pub fn cap(self) -> usize {
        match self {
            ParticleKind::TrailDot => crate::consts::TRAIL_CAP,
            ParticleKind::Shockwave => 32,
            ParticleKind::ScrollRipple => 16,
            ParticleKind::MeshNode => crate::consts::MESH_NODE_COUNT,
            ParticleKind::RainDrop => 256,
            ParticleKind::GroundRipple => 64,
            ParticleKind::Meteor => 64,
            ParticleKind::BurstGlyph => 128,
        }
    }
}

/// Stable handle to a spawned particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(u32);

/// A single ephemeral visual entity
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// HSL hue in degrees, for hue-driven kinds
    pub hue: f32,
    pub size: f32,
    /// Rendered glyph for meteor/burst particles
    pub glyph: Option<char>,
    /// Dashed outline (scroll-up ripples)
    pub dashed: bool,
    /// Fallback removal deadline, seconds
    pub ttl: f32,
    pub age: f32,
    /// Remaining fade-out once evicted; `None` while live
    fade: Option<f32>,
    /// Marked by a user click (meteors get a distinct removal animation)
    pub shot: bool,
}

impl Particle {
    /// True once eviction has been scheduled
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Render opacity: 1.0 while live, ramping to 0.0 over the fade
    pub fn alpha(&self) -> f32 {
        match self.fade {
            Some(remaining) => (remaining / EVICT_FADE_SECS).clamp(0.0, 1.0),
            None => 1.0,
        }
    }
}

/// Attributes for a spawn request
#[derive(Debug, Clone)]
pub struct SpawnAttrs {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hue: f32,
    pub size: f32,
    pub glyph: Option<char>,
    pub dashed: bool,
    pub ttl: f32,
}

impl Default for SpawnAttrs {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            hue: 0.0,
            size: 1.0,
            glyph: None,
            dashed: false,
            ttl: 10.0,
        }
    }
}

/// Particle registry for one rendering surface
#[derive(Debug, Default)]
pub struct Registry {
    /// Surface dimensions; `None` until the host mounts one
    surface: Option<Vec2>,
    particles: Vec<Particle>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a rendering surface. Spawns are no-ops until this is called.
    pub fn mount(&mut self, width: f32, height: f32) {
        self.surface = Some(Vec2::new(width, height));
    }

    /// Detach the surface and drop every particle (full reset on remount)
    pub fn unmount(&mut self) {
        self.surface = None;
        self.particles.clear();
    }

    pub fn surface(&self) -> Option<Vec2> {
        self.surface
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Spawn a particle of `kind`. Returns `None` (silently) while no
    /// surface is mounted. If the kind is at its cap, the oldest live
    /// member is evicted first.
    pub fn spawn(&mut self, kind: ParticleKind, attrs: SpawnAttrs) -> Option<ParticleId> {
        self.surface?;

        while self.live_count(kind) >= kind.cap() {
            let oldest = self
                .particles
                .iter()
                .find(|p| p.kind == kind && !p.is_fading())
                .map(|p| p.id);
            match oldest {
                Some(id) => {
                    self.evict(id);
                }
                None => break,
            }
        }

        let id = ParticleId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.particles.push(Particle {
            id,
            kind,
            pos: attrs.pos,
            vel: attrs.vel,
            hue: attrs.hue,
            size: attrs.size,
            glyph: attrs.glyph,
            dashed: attrs.dashed,
            ttl: attrs.ttl,
            age: 0.0,
            fade: None,
            shot: false,
        });
        Some(id)
    }

    /// Schedule a fade-out for `id`. Safe to call on an already-fading or
    /// already-removed particle; returns whether anything changed.
    pub fn evict(&mut self, id: ParticleId) -> bool {
        match self.particles.iter_mut().find(|p| p.id == id) {
            Some(p) if !p.is_fading() => {
                p.fade = Some(EVICT_FADE_SECS);
                true
            }
            _ => false,
        }
    }

    /// Evict with the "shot" removal animation (meteor clicked mid-fall)
    pub fn evict_shot(&mut self, id: ParticleId) -> bool {
        if let Some(p) = self.particles.iter_mut().find(|p| p.id == id) {
            p.shot = true;
        }
        self.evict(id)
    }

    /// Immediately flush every member of a kind
    pub fn clear_kind(&mut self, kind: ParticleKind) {
        self.particles.retain(|p| p.kind != kind);
    }

    /// Advance positions, ages, TTLs and fades
    pub fn tick(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.age += dt;
            match &mut p.fade {
                Some(remaining) => *remaining -= dt,
                None => {
                    p.ttl -= dt;
                    if p.ttl <= 0.0 {
                        p.fade = Some(EVICT_FADE_SECS);
                    }
                }
            }
        }
        self.particles.retain(|p| p.fade.is_none_or(|f| f > 0.0));
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_kind(&self, kind: ParticleKind) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(move |p| p.kind == kind)
    }

    /// Live (non-fading) members of a kind
    pub fn live_count(&self, kind: ParticleKind) -> usize {
        self.particles
            .iter()
            .filter(|p| p.kind == kind && !p.is_fading())
            .count()
    }

    /// All members of a kind, fading included
    pub fn count(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
