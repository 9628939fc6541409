//! Kinetic typography: per-glyph gravity, glitch substitution, selection
//! bursts and the presentational 3D portal mode
//!
//! One `KineticText` instance per message bubble. The host feeds it hover,
//! pointer and selection events; all glyph motion is resolved here as data.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::field::influence;
use super::particles::{ParticleKind, Registry, SpawnAttrs};
use crate::consts::*;

/// Fixed substitution alphabet for the corrupted-data effect
const GLITCH_SYMBOLS: [char; 10] = ['0', '1', '$', '#', '%', '&', '+', '-', '*', '?'];

/// Fallback glyphs for tokens no keyword rule matches
const DEFAULT_BURST_GLYPHS: [char; 7] = ['🌟', '💫', '⚡', '✨', '💥', '🚀', '🔮'];

/// Hover wave: vertical sinusoid over the glyph index, with a matching
/// scale swing and hue rotation per glyph
const WAVE_FREQUENCY: f32 = 0.3;
const WAVE_AMPLITUDE: f32 = 10.0;
const WAVE_SCALE_FREQUENCY: f32 = 0.5;
const WAVE_SCALE_SWING: f32 = 0.2;
const WAVE_HUE_STEP: f32 = 30.0;

/// Keyword rules, checked in order; first hit wins
const BURST_RULES: &[(&[&str], char)] = &[
    (&["love", "heart", "like"], '❤'),
    (&["happy", "joy", "smile"], '😊'),
    (&["sad", "unhappy"], '😢'),
    (&["angry", "mad"], '😠'),
    (&["surprise", "wow"], '😮'),
    (&["cool", "awesome"], '😎'),
    (&["fire", "hot"], '🔥'),
    (&["star", "shine"], '✨'),
];

/// Classify a selection token into its burst glyph; `None` means draw
/// from the default set.
pub fn classify_token(token: &str) -> Option<char> {
    let lower = token.to_lowercase();
    BURST_RULES
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| lower.contains(p)))
        .map(|(_, glyph)| *glyph)
}

/// One character with a live displacement
#[derive(Debug, Clone)]
pub struct GlyphSpan {
    pub ch: char,
    /// Rest-position center
    pub base: Vec2,
    /// Current displacement from the base
    pub offset: Vec2,
    /// Displacement the span is easing toward
    pub target: Vec2,
    /// Render scale, 1.0 at rest (hover wave swings it)
    pub scale: f32,
    /// Hue rotation in degrees, 0.0 at rest
    pub hue_shift: f32,
    /// Easing time constant: fast while captured, slow on release
    ease: f32,
}

impl GlyphSpan {
    pub fn center(&self) -> Vec2 {
        self.base + self.offset
    }
}

/// A portal-mode text copy: depth offset plus opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalLayer {
    pub depth: f32,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct KineticText {
    rng: Pcg32,
    original: String,
    spans: Vec<GlyphSpan>,
    hovered: bool,
    glitched: Option<String>,
    glitch_timer: f32,
    portal: bool,
    burst_clear: Option<f32>,
}

impl KineticText {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            original: String::new(),
            spans: Vec::new(),
            hovered: false,
            glitched: None,
            glitch_timer: 0.0,
            portal: false,
            burst_clear: None,
        }
    }

    /// Split `text` into independently positioned glyph spans laid out
    /// left-to-right from `origin` with a fixed advance. Half the spans
    /// start from a small random scatter and ease into place.
    ///
    /// No-op while a hover-driven gravity animation is live; re-running
    /// would discard the displacement state mid-flight.
    pub fn decompose(&mut self, text: &str, origin: Vec2, advance: f32) {
        if self.hovered {
            return;
        }

        self.original = text.to_string();
        self.glitched = None;
        self.glitch_timer = 0.0;
        self.portal = false;

        let rng = &mut self.rng;
        self.spans = text
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let offset = if rng.random::<f32>() < 0.5 {
                    Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0))
                } else {
                    Vec2::ZERO
                };
                GlyphSpan {
                    ch,
                    base: origin + Vec2::new(advance * i as f32, 0.0),
                    offset,
                    target: Vec2::ZERO,
                    scale: 1.0,
                    hue_shift: 0.0,
                    ease: EASE_OUT_SECS,
                }
            })
            .collect();
    }

    pub fn spans(&self) -> &[GlyphSpan] {
        &self.spans
    }

    pub fn original_text(&self) -> &str {
        &self.original
    }

    /// Text to render right now: the glitched variant while hovered, the
    /// exact original otherwise.
    pub fn display_text(&self) -> &str {
        match (&self.glitched, self.hovered) {
            (Some(glitched), true) => glitched,
            _ => &self.original,
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        if hovered {
            self.glitch_timer = GLITCH_INTERVAL;
            self.hover_wave();
        } else {
            // revert to the exact original and release every glyph
            self.glitched = None;
            for span in &mut self.spans {
                span.target = Vec2::ZERO;
                span.scale = 1.0;
                span.hue_shift = 0.0;
                span.ease = EASE_OUT_SECS;
            }
        }
    }

    /// Hover entry: each glyph rises or dips along a sinusoid over its
    /// index, scales in sympathy and cycles its hue. Pointer gravity takes
    /// over the displacement targets once the pointer actually moves.
    fn hover_wave(&mut self) {
        for (i, span) in self.spans.iter_mut().enumerate() {
            let idx = i as f32;
            span.target = Vec2::new(0.0, (idx * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE);
            span.scale = 1.0 + (idx * WAVE_SCALE_FREQUENCY).sin() * WAVE_SCALE_SWING;
            span.hue_shift = idx * WAVE_HUE_STEP;
            span.ease = EASE_IN_SECS;
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer moved while hovered: glyphs inside the gravity radius get
    /// pushed away from the pointer, scaled by the field influence. The
    /// field is measured against each glyph's current displaced position,
    /// not its rest position.
    pub fn apply_gravity(&mut self, pointer: Vec2) {
        for span in &mut self.spans {
            let center = span.center();
            let force = influence(crate::distance(pointer, center), GRAVITY_RADIUS);
            if force > 0.0 {
                span.target = (center - pointer) * force * GRAVITY_SCALE;
                span.ease = EASE_IN_SECS;
            } else {
                span.target = Vec2::ZERO;
                span.ease = EASE_OUT_SECS;
            }
        }
    }

    /// Toggle the purely presentational portal mode. Does not touch
    /// gravity or glitch state.
    pub fn toggle_portal(&mut self) {
        self.portal = !self.portal;
    }

    pub fn portal_active(&self) -> bool {
        self.portal
    }

    /// Stacked copies when portal mode is on: nearest fully opaque, the
    /// rest receding and fading.
    pub fn portal_layers(&self) -> Option<[PortalLayer; 3]> {
        self.portal.then(|| {
            [0, 1, 2].map(|i| PortalLayer {
                depth: i as f32 * -15.0,
                opacity: 1.0 - i as f32 * 0.2,
            })
        })
    }

    /// Spawn a semantic particle burst for a text selection. Each
    /// whitespace token yields 2-3 glyph particles with random directions;
    /// every burst particle is cleared after one second no matter what.
    pub fn selection_burst(&mut self, selected: &str, origin: Vec2, registry: &mut Registry) {
        let mut spawned = false;
        for token in selected.split_whitespace() {
            let glyph = match classify_token(token) {
                Some(glyph) => glyph,
                None => DEFAULT_BURST_GLYPHS[self.rng.random_range(0..DEFAULT_BURST_GLYPHS.len())],
            };
            let count = self.rng.random_range(2..=3);
            for _ in 0..count {
                let dir = Vec2::new(
                    self.rng.random_range(-1.0..1.0),
                    self.rng.random_range(-1.0..1.0),
                );
                spawned |= registry
                    .spawn(
                        ParticleKind::BurstGlyph,
                        SpawnAttrs {
                            pos: origin,
                            vel: dir * 60.0,
                            size: 16.0,
                            glyph: Some(glyph),
                            ttl: BURST_TTL,
                            ..Default::default()
                        },
                    )
                    .is_some();
            }
        }
        if spawned {
            self.burst_clear = Some(BURST_TTL);
        }
    }

    /// Advance easing, glitch cadence and the burst clear deadline
    pub fn tick(&mut self, dt: f32, registry: &mut Registry) {
        for span in &mut self.spans {
            let blend = (dt / span.ease).min(1.0);
            span.offset += (span.target - span.offset) * blend;
        }

        if self.hovered && !self.original.is_empty() {
            self.glitch_timer -= dt;
            while self.glitch_timer <= 0.0 {
                self.glitch_timer += GLITCH_INTERVAL;
                self.roll_glitch();
            }
        }

        if let Some(remaining) = &mut self.burst_clear {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.burst_clear = None;
                registry.clear_kind(ParticleKind::BurstGlyph);
            }
        }
    }

    /// One glitch pass: every 4th character has a fixed chance of being
    /// replaced by a symbol. Character count always matches the original.
    fn roll_glitch(&mut self) {
        let rng = &mut self.rng;
        let glitched: String = self
            .original
            .chars()
            .enumerate()
            .map(|(idx, ch)| {
                if idx % 4 == 0 && rng.random::<f32>() < GLITCH_CHANCE {
                    GLITCH_SYMBOLS[rng.random_range(0..GLITCH_SYMBOLS.len())]
                } else {
                    ch
                }
            })
            .collect();
        self.glitched = Some(glitched);
    }
}
