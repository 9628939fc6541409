//! Ambient weather scheduler: timed rain and meteor sessions
//!
//! One session at most exists process-wide. The schedule loops
//! Idle -> Scheduled -> Active -> Cooldown -> Scheduled forever; teardown
//! (dropping the scheduler) is the only exit. Spawning is gated on the
//! host-supplied page-visibility flag.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particles::{ParticleKind, Registry, SpawnAttrs};
use crate::consts::*;

/// Glyphs a meteor can wear
const METEOR_GLYPHS: [char; 10] = ['✨', '🔥', '💫', '⚡', '🌟', '💥', '🚀', '👾', '🤖', '🔮'];

/// Distance above the bottom edge where raindrops land
const GROUND_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Rain,
    Meteor,
}

impl WeatherKind {
    /// Hard session duration before the fade-out begins
    fn duration(self) -> f32 {
        match self {
            WeatherKind::Rain => RAIN_DURATION,
            WeatherKind::Meteor => METEOR_DURATION,
        }
    }

    fn spawn_interval(self) -> f32 {
        match self {
            WeatherKind::Rain => RAIN_DROP_INTERVAL,
            WeatherKind::Meteor => METEOR_INTERVAL,
        }
    }
}

/// A running weather session
#[derive(Debug)]
pub struct Session {
    pub kind: WeatherKind,
    elapsed: f32,
    spawn_timer: f32,
    /// Fade-out countdown once the hard duration has elapsed
    fade: Option<f32>,
}

#[derive(Debug)]
pub enum WeatherPhase {
    Idle,
    Scheduled { delay: f32 },
    Active(Session),
    Cooldown { delay: f32 },
}

#[derive(Debug)]
pub struct WeatherScheduler {
    rng: Pcg32,
    phase: WeatherPhase,
}

impl WeatherScheduler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase: WeatherPhase::Idle,
        }
    }

    pub fn phase(&self) -> &WeatherPhase {
        &self.phase
    }

    /// Current session type, for external indicators
    pub fn current(&self) -> Option<WeatherKind> {
        match &self.phase {
            WeatherPhase::Active(session) => Some(session.kind),
            _ => None,
        }
    }

    /// Move Idle into the schedule loop with a fresh random delay
    pub fn schedule(&mut self) {
        if matches!(self.phase, WeatherPhase::Idle) {
            let delay = self.rng.random_range(WEATHER_DELAY_MIN..WEATHER_DELAY_MAX);
            self.phase = WeatherPhase::Scheduled { delay };
        }
    }

    /// Start a session of random type now. No-op while one is active.
    pub fn try_start(&mut self, registry: &mut Registry) -> bool {
        let kind = if self.rng.random::<f32>() < 0.5 {
            WeatherKind::Rain
        } else {
            WeatherKind::Meteor
        };
        self.try_start_kind(kind, registry)
    }

    /// Start a session of a specific type. No-op while one is active.
    pub fn try_start_kind(&mut self, kind: WeatherKind, registry: &mut Registry) -> bool {
        if matches!(self.phase, WeatherPhase::Active(_)) {
            return false;
        }
        self.phase = self.begin(kind, registry);
        true
    }

    fn begin(&mut self, kind: WeatherKind, registry: &mut Registry) -> WeatherPhase {
        log::info!("weather session starting: {kind:?}");
        if kind == WeatherKind::Rain {
            for _ in 0..RAIN_INITIAL_DROPS {
                self.spawn_drop(registry);
            }
        }
        WeatherPhase::Active(Session {
            kind,
            elapsed: 0.0,
            spawn_timer: kind.spawn_interval(),
            fade: None,
        })
    }

    /// Advance the schedule. `visible` gates spawning so hidden pages do
    /// no wasted work.
    pub fn tick(&mut self, dt: f32, visible: bool, registry: &mut Registry) {
        let phase = std::mem::replace(&mut self.phase, WeatherPhase::Idle);
        self.phase = match phase {
            WeatherPhase::Idle => WeatherPhase::Idle,

            WeatherPhase::Scheduled { mut delay } => {
                delay -= dt;
                if delay <= 0.0 {
                    let kind = if self.rng.random::<f32>() < 0.5 {
                        WeatherKind::Rain
                    } else {
                        WeatherKind::Meteor
                    };
                    self.begin(kind, registry)
                } else {
                    WeatherPhase::Scheduled { delay }
                }
            }

            WeatherPhase::Active(mut session) => {
                session.elapsed += dt;

                let mut finished = false;
                match &mut session.fade {
                    Some(remaining) => {
                        *remaining -= dt;
                        if *remaining <= 0.0 {
                            finished = true;
                        }
                    }
                    None => {
                        if visible {
                            session.spawn_timer -= dt;
                            while session.spawn_timer <= 0.0 {
                                session.spawn_timer += session.kind.spawn_interval();
                                match session.kind {
                                    WeatherKind::Rain => self.spawn_drop(registry),
                                    WeatherKind::Meteor => self.spawn_meteor(registry),
                                }
                            }
                        }
                        if session.elapsed >= session.kind.duration() {
                            session.fade = Some(WEATHER_FADE_SECS);
                        }
                    }
                }

                if finished {
                    log::info!("weather session ended: {:?}", session.kind);
                    registry.clear_kind(ParticleKind::RainDrop);
                    registry.clear_kind(ParticleKind::GroundRipple);
                    registry.clear_kind(ParticleKind::Meteor);
                    let delay = self
                        .rng
                        .random_range(WEATHER_COOLDOWN_MIN..WEATHER_COOLDOWN_MAX);
                    WeatherPhase::Cooldown { delay }
                } else {
                    self.settle_landings(registry);
                    WeatherPhase::Active(session)
                }
            }

            WeatherPhase::Cooldown { mut delay } => {
                delay -= dt;
                if delay <= 0.0 {
                    let next = self.rng.random_range(WEATHER_DELAY_MIN..WEATHER_DELAY_MAX);
                    WeatherPhase::Scheduled { delay: next }
                } else {
                    WeatherPhase::Cooldown { delay }
                }
            }
        };
    }

    /// A click on a falling meteor marks it shot (distinct removal
    /// animation). Returns whether anything was hit.
    pub fn shoot(&mut self, pos: Vec2, registry: &mut Registry) -> bool {
        let hit = registry
            .iter_kind(ParticleKind::Meteor)
            .find(|p| !p.is_fading() && (p.pos - pos).length() <= p.size * 0.5 + 5.0)
            .map(|p| p.id);
        match hit {
            Some(id) => registry.evict_shot(id),
            None => false,
        }
    }

    /// Raindrops that reached the ground spawn a ripple at their x and go
    /// away; meteors past the bottom edge fell through naturally.
    fn settle_landings(&mut self, registry: &mut Registry) {
        let Some(surface) = registry.surface() else {
            return;
        };
        let ground = surface.y - GROUND_MARGIN;

        let landed: Vec<(super::particles::ParticleId, f32)> = registry
            .iter_kind(ParticleKind::RainDrop)
            .filter(|p| !p.is_fading() && p.pos.y >= ground)
            .map(|p| (p.id, p.pos.x))
            .collect();
        for (id, x) in landed {
            registry.evict(id);
            registry.spawn(
                ParticleKind::GroundRipple,
                SpawnAttrs {
                    pos: Vec2::new(x, ground),
                    size: 4.0,
                    hue: self.rng.random_range(220.0..280.0),
                    ttl: RIPPLE_EXPAND_SECS,
                    ..Default::default()
                },
            );
        }

        let fallen: Vec<_> = registry
            .iter_kind(ParticleKind::Meteor)
            .filter(|p| !p.is_fading() && p.pos.y > surface.y + 60.0)
            .map(|p| p.id)
            .collect();
        for id in fallen {
            registry.evict(id);
        }
    }

    fn spawn_drop(&mut self, registry: &mut Registry) {
        let Some(surface) = registry.surface() else {
            return;
        };
        let duration = self.rng.random_range(1.0..4.0);
        let x = self.rng.random_range(0.0..surface.x);
        registry.spawn(
            ParticleKind::RainDrop,
            SpawnAttrs {
                pos: Vec2::new(x, -GROUND_MARGIN),
                vel: Vec2::new(0.0, (surface.y + GROUND_MARGIN) / duration),
                size: self.rng.random_range(1.0..6.0),
                hue: self.rng.random_range(220.0..280.0),
                ttl: duration + 1.0,
                ..Default::default()
            },
        );
    }

    fn spawn_meteor(&mut self, registry: &mut Registry) {
        let Some(surface) = registry.surface() else {
            return;
        };
        let glyph = METEOR_GLYPHS[self.rng.random_range(0..METEOR_GLYPHS.len())];
        let duration = self.rng.random_range(2.0..5.0);
        registry.spawn(
            ParticleKind::Meteor,
            SpawnAttrs {
                pos: Vec2::new(self.rng.random_range(0.0..surface.x), -50.0),
                vel: Vec2::new(0.0, (surface.y + 110.0) / duration),
                size: self.rng.random_range(24.0..48.0),
                glyph: Some(glyph),
                ttl: duration + 1.0,
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(seed: u64) -> (WeatherScheduler, Registry) {
        let mut registry = Registry::new();
        registry.mount(800.0, 600.0);
        (WeatherScheduler::new(seed), registry)
    }

    #[test]
    fn double_start_is_a_noop() {
        let (mut weather, mut registry) = setup(3);
        assert!(weather.try_start(&mut registry));
        assert!(weather.current().is_some());
        assert!(!weather.try_start(&mut registry));
        assert!(!weather.try_start_kind(WeatherKind::Rain, &mut registry));
    }

    #[test]
    fn rain_opens_with_initial_volley() {
        let (mut weather, mut registry) = setup(3);
        weather.try_start_kind(WeatherKind::Rain, &mut registry);
        assert_eq!(registry.count(ParticleKind::RainDrop), RAIN_INITIAL_DROPS);
    }

    #[test]
    fn hidden_page_spawns_nothing() {
        let (mut weather, mut registry) = setup(3);
        weather.try_start_kind(WeatherKind::Meteor, &mut registry);
        for _ in 0..20 {
            weather.tick(METEOR_INTERVAL, false, &mut registry);
        }
        assert_eq!(registry.count(ParticleKind::Meteor), 0);
        for _ in 0..4 {
            weather.tick(METEOR_INTERVAL, true, &mut registry);
        }
        assert!(registry.count(ParticleKind::Meteor) > 0);
    }

    #[test]
    fn hidden_page_adds_no_drops_beyond_the_volley() {
        let (mut weather, mut registry) = setup(3);
        weather.try_start_kind(WeatherKind::Rain, &mut registry);
        assert_eq!(registry.count(ParticleKind::RainDrop), RAIN_INITIAL_DROPS);
        for _ in 0..20 {
            weather.tick(RAIN_DROP_INTERVAL, false, &mut registry);
        }
        assert_eq!(registry.count(ParticleKind::RainDrop), RAIN_INITIAL_DROPS);
    }

    #[test]
    fn session_fades_then_cools_down() {
        let (mut weather, mut registry) = setup(3);
        weather.try_start_kind(WeatherKind::Meteor, &mut registry);
        // run past the hard duration and fade in small steps
        let steps = ((METEOR_DURATION + WEATHER_FADE_SECS) / 0.5) as u32 + 2;
        for _ in 0..steps {
            weather.tick(0.5, true, &mut registry);
        }
        assert!(matches!(weather.phase(), WeatherPhase::Cooldown { .. }));
        assert_eq!(registry.count(ParticleKind::Meteor), 0);
        assert_eq!(registry.count(ParticleKind::RainDrop), 0);
    }

    #[test]
    fn cooldown_reschedules_and_reactivates() {
        let (mut weather, mut registry) = setup(11);
        weather.schedule();
        assert!(matches!(weather.phase(), WeatherPhase::Scheduled { .. }));

        // worst-case scheduled delay is 90s
        let mut activated = false;
        for _ in 0..200 {
            weather.tick(0.5, true, &mut registry);
            if weather.current().is_some() {
                activated = true;
                break;
            }
        }
        assert!(activated);
    }

    #[test]
    fn landed_drop_leaves_a_ground_ripple() {
        let (mut weather, mut registry) = setup(5);
        weather.try_start_kind(WeatherKind::Rain, &mut registry);
        // fastest drops cross the 600px surface in 1s
        for _ in 0..8 {
            weather.tick(0.5, true, &mut registry);
            registry.tick(0.5);
        }
        assert!(registry.count(ParticleKind::GroundRipple) > 0);
    }

    #[test]
    fn shooting_marks_a_meteor() {
        let (mut weather, mut registry) = setup(9);
        weather.try_start_kind(WeatherKind::Meteor, &mut registry);
        weather.tick(METEOR_INTERVAL + 0.01, true, &mut registry);
        let meteor = registry
            .iter_kind(ParticleKind::Meteor)
            .next()
            .expect("meteor spawned");
        let (id, pos) = (meteor.id, meteor.pos);
        assert!(weather.shoot(pos, &mut registry));
        let meteor = registry.get(id).unwrap();
        assert!(meteor.shot);
        assert!(meteor.is_fading());
        // shooting empty space misses
        assert!(!weather.shoot(Vec2::new(-500.0, -500.0), &mut registry));
    }
}
