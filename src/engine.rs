//! Host-facing engine: owns the registry and subsystems, routes events
//!
//! The host shell dispatches pointer/wheel/click/visibility input once per
//! frame and calls `tick`; everything else happens inside the `fx`
//! subsystems. Message-bubble `KineticText` instances are owned by the
//! host (one per bubble) and share this engine's registry for bursts.

use glam::Vec2;

use crate::fx::{CursorFx, HelixStat, Registry, StatHelix, WeatherKind, WeatherScheduler};
use crate::render::{self, DrawList};
use crate::settings::Settings;

/// Input events gathered by the host for one frame
#[derive(Debug, Clone)]
pub struct EngineInput {
    /// Pointer position over the effects surface
    pub pointer: Option<Vec2>,
    /// Wheel event: position and deltaY
    pub wheel: Option<(Vec2, f32)>,
    /// Click positions (meteor shooting)
    pub clicks: Vec<Vec2>,
    /// Page visibility flag
    pub visible: bool,
}

impl Default for EngineInput {
    fn default() -> Self {
        Self {
            pointer: None,
            wheel: None,
            clicks: Vec::new(),
            visible: true,
        }
    }
}

#[derive(Debug)]
pub struct Engine {
    seed: u64,
    pub registry: Registry,
    pub cursor: CursorFx,
    pub weather: WeatherScheduler,
    pub helix: StatHelix,
    pub settings: Settings,
}

impl Engine {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            registry: Registry::new(),
            cursor: CursorFx::new(sub_seed(seed, 1)),
            weather: WeatherScheduler::new(sub_seed(seed, 2)),
            helix: StatHelix::default(),
            settings: Settings::default(),
        }
    }

    /// Attach the rendering surface and enter the weather schedule
    pub fn mount(&mut self, width: f32, height: f32) {
        log::info!("effects mounted at {width}x{height}");
        self.registry.mount(width, height);
        self.helix.set_size(width, height);
        if self.settings.effective_weather() {
            self.weather.schedule();
        }
    }

    /// Full reset: no effect state survives a remount. Settings are host
    /// preferences and stay.
    pub fn unmount(&mut self) {
        log::info!("effects unmounted, resetting state");
        let settings = self.settings.clone();
        *self = Engine::new(self.seed);
        self.settings = settings;
    }

    /// Advance one frame. Handlers run to completion in event order.
    pub fn tick(&mut self, input: &EngineInput, dt: f32) {
        if let Some(pos) = input.pointer {
            if self.settings.effective_cursor_effects() {
                self.cursor.pointer_move(pos, &mut self.registry);
            }
        }

        if let Some((pos, delta_y)) = input.wheel {
            if self.settings.scroll_ripples {
                self.cursor.wheel(pos, delta_y, &mut self.registry);
            }
        }

        for click in &input.clicks {
            self.weather.shoot(*click, &mut self.registry);
        }

        if self.settings.effective_mesh() {
            self.cursor.tick(dt, &mut self.registry);
        }
        if self.settings.effective_weather() {
            self.weather.tick(dt, input.visible, &mut self.registry);
        }
        self.registry.tick(dt);
    }

    /// Feed profile stats into the helix
    pub fn set_stats(&mut self, stats: Vec<HelixStat>) {
        self.helix.set_stats(stats);
    }

    /// Pointer moved over the helix canvas (its own coordinate space)
    pub fn helix_pointer(&mut self, pos: Vec2) -> Option<&str> {
        self.helix.hit_test(pos)
    }

    /// Currently hovered helix trait, for external tooltips
    pub fn hovered_trait(&self) -> Option<&str> {
        self.helix.hovered_trait()
    }

    /// Active weather type, for external indicators
    pub fn weather_kind(&self) -> Option<WeatherKind> {
        self.weather.current()
    }

    /// Build the frame's draw list
    pub fn draw(&self, out: &mut DrawList) {
        out.clear();
        render::draw_particles(&self.registry, &self.cursor, out);
        render::draw_helix(&self.helix, out);
    }
}

/// Derive a per-subsystem stream from the engine seed
fn sub_seed(seed: u64, stream: u64) -> u64 {
    seed.wrapping_mul(2654435761).wrapping_add(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_DT;
    use crate::fx::ParticleKind;

    #[test]
    fn pointer_input_drives_cursor_effects() {
        let mut engine = Engine::new(1);
        engine.mount(800.0, 600.0);
        let input = EngineInput {
            pointer: Some(Vec2::new(100.0, 100.0)),
            ..Default::default()
        };
        engine.tick(&input, TICK_DT);
        assert_eq!(engine.registry.count(ParticleKind::Shockwave), 1);
        assert_eq!(engine.registry.count(ParticleKind::TrailDot), 1);
    }

    #[test]
    fn reduced_motion_suppresses_cursor_and_weather() {
        let mut engine = Engine::new(1);
        engine.settings.reduced_motion = true;
        engine.mount(800.0, 600.0);
        let input = EngineInput {
            pointer: Some(Vec2::new(100.0, 100.0)),
            ..Default::default()
        };
        // nothing spawns, weather never leaves Idle
        for _ in 0..600 {
            engine.tick(&input, TICK_DT);
        }
        assert!(engine.registry.is_empty());
        assert!(engine.weather_kind().is_none());
    }

    #[test]
    fn unmount_is_a_full_reset_except_settings() {
        let mut engine = Engine::new(1);
        engine.settings.scroll_ripples = false;
        engine.mount(800.0, 600.0);
        engine.set_stats(vec![HelixStat::new("Wit", 50.0)]);
        let input = EngineInput {
            pointer: Some(Vec2::new(10.0, 10.0)),
            ..Default::default()
        };
        engine.tick(&input, TICK_DT);
        assert!(!engine.registry.is_empty());

        engine.unmount();
        assert!(engine.registry.is_empty());
        assert!(!engine.registry.is_mounted());
        assert!(engine.helix.stats().is_empty());
        assert!(!engine.settings.scroll_ripples);
    }

    #[test]
    fn draw_collects_particle_and_helix_shapes() {
        let mut engine = Engine::new(1);
        engine.mount(800.0, 600.0);
        engine.set_stats(vec![HelixStat::new("Empathy", 70.0)]);
        let input = EngineInput {
            pointer: Some(Vec2::new(400.0, 300.0)),
            ..Default::default()
        };
        engine.tick(&input, TICK_DT);

        let mut list = DrawList::new();
        engine.draw(&mut list);
        assert!(!list.is_empty());
    }

    #[test]
    fn clicks_shoot_meteors() {
        let mut engine = Engine::new(1);
        engine.mount(800.0, 600.0);
        engine
            .weather
            .try_start_kind(crate::fx::WeatherKind::Meteor, &mut engine.registry);
        // let one meteor spawn
        let mut input = EngineInput::default();
        engine.tick(&input, crate::consts::METEOR_INTERVAL + 0.01);
        let meteor_pos = engine
            .registry
            .iter_kind(ParticleKind::Meteor)
            .next()
            .expect("meteor spawned")
            .pos;

        input.clicks = vec![meteor_pos];
        engine.tick(&input, TICK_DT);
        assert!(
            engine
                .registry
                .iter_kind(ParticleKind::Meteor)
                .any(|p| p.shot)
        );
    }
}
