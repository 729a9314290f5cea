//! Gameplay tuning, kept apart from runtime configuration in `config`.

mod effects;
mod enemy;
mod ship;

pub use effects::{ExplosionTuning, ScreenTuning, StarTuning};
pub use enemy::{EmitterTuning, EnemyTuning};
pub use ship::ShipTuning;
