//! Deterministic effects module
//!
//! All effect logic lives here. This module must be pure and deterministic:
//! - Time advances only through explicit `tick(dt)` calls
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - Each subsystem owns a disjoint set of particle kinds

pub mod cursor;
pub mod field;
pub mod helix;
pub mod particles;
pub mod text;
pub mod weather;

pub use cursor::{CursorFx, SpeedTier};
pub use field::influence;
pub use helix::{HelixStat, StatHelix};
pub use particles::{Particle, ParticleId, ParticleKind, Registry};
pub use text::KineticText;
pub use weather::{WeatherKind, WeatherPhase, WeatherScheduler};
