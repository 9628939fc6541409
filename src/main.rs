//! Neon FX demo entry point
//!
//! Drives the engine headlessly with synthetic input and logs what each
//! subsystem is doing. Useful for eyeballing spawn rates and schedule
//! behavior without a host UI.

use glam::Vec2;

use neon_fx::consts::TICK_DT;
use neon_fx::fx::{HelixStat, KineticText, WeatherKind};
use neon_fx::render::DrawList;
use neon_fx::{Engine, EngineInput};

fn main() {
    env_logger::init();

    let mut engine = Engine::new(0x5eed_cafe);
    engine.mount(1280.0, 720.0);
    engine.set_stats(vec![
        HelixStat::new("Charisma", 85.0),
        HelixStat::new("Empathy", 70.0),
        HelixStat::new("Wit", 92.0),
        HelixStat::new("Focus", 55.0),
    ]);

    // kick a meteor shower so the demo shows a session without waiting
    // out the random schedule
    engine
        .weather
        .try_start_kind(WeatherKind::Meteor, &mut engine.registry);

    let mut bubble = KineticText::new(7);
    bubble.decompose("I love this fire", Vec2::new(200.0, 650.0), 14.0);
    bubble.selection_burst("I love this fire", Vec2::new(300.0, 650.0), &mut engine.registry);

    let mut draw = DrawList::new();
    let frames = (30.0 / TICK_DT) as u32;
    for frame in 0..frames {
        let t = frame as f32 * TICK_DT;

        // pointer sweeps an ellipse over the surface
        let pointer = Vec2::new(
            640.0 + (t * 0.8).cos() * 400.0,
            360.0 + (t * 1.3).sin() * 250.0,
        );
        let input = EngineInput {
            pointer: Some(pointer),
            wheel: (frame % 180 == 0).then_some((pointer, 60.0)),
            ..Default::default()
        };

        engine.tick(&input, TICK_DT);
        if engine.settings.kinetic_text {
            bubble.apply_gravity(pointer);
            bubble.tick(TICK_DT, &mut engine.registry);
        }

        if frame % 60 == 0 {
            engine.draw(&mut draw);
            log::info!(
                "t={t:>4.1}s weather={:?} hovered={:?} particles={} shapes={}",
                engine.weather_kind(),
                engine.hovered_trait(),
                engine.registry.len(),
                draw.len(),
            );
        }
    }

    log::info!("demo finished");
}
