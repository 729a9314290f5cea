use crate::entities::EnemyKind;

/// Gameplay tuning for one enemy kind.
#[derive(Debug, Clone, Copy)]
pub struct EnemyTuning {
    /// Sprite height in world units.
    pub height: f32,

    /// Downward cruise speed once fully on screen.
    pub speed: f32,

    /// Downward speed while still entering from above the top edge.
    pub descent_speed: f32,

    pub health: i32,

    pub bullet_height: f32,

    /// Downward bullet speed in world units per second.
    pub bullet_speed: f32,

    pub bullet_damage: i32,

    /// Seconds between shots.
    pub reload_interval: f32,

    /// Seconds the sprite flashes after a hit.
    pub flash_time: f32,
}

impl EnemyTuning {
    pub fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Small => Self {
                height: 0.1,
                speed: 0.2,
                descent_speed: 0.3,
                health: 1,
                bullet_height: 0.01,
                bullet_speed: 0.3,
                bullet_damage: 1,
                reload_interval: 3.0,
                flash_time: 0.1,
            },
            EnemyKind::Medium => Self {
                height: 0.1,
                speed: 0.03,
                descent_speed: 0.3,
                health: 5,
                bullet_height: 0.02,
                bullet_speed: 0.25,
                bullet_damage: 5,
                reload_interval: 4.0,
                flash_time: 0.1,
            },
            EnemyKind::Big => Self {
                height: 0.2,
                speed: 0.005,
                descent_speed: 0.3,
                health: 10,
                bullet_height: 0.04,
                bullet_speed: 0.3,
                bullet_damage: 10,
                reload_interval: 1.0,
                flash_time: 0.1,
            },
        }
    }
}

/// Tuning for the enemy emitter.
#[derive(Debug, Clone, Copy)]
pub struct EmitterTuning {
    /// Seconds between spawns.
    pub interval: f32,

    /// Roll below this spawns a small enemy.
    pub small_odds: f32,

    /// Roll below this (and above `small_odds`) spawns a medium enemy, anything
    /// higher spawns a big one.
    pub medium_odds: f32,
}

impl Default for EmitterTuning {
    fn default() -> Self {
        Self {
            interval: 4.0,
            small_odds: 0.5,
            medium_odds: 0.8,
        }
    }
}
