//! Gameplay tuning for the player's ship.

#[derive(Debug, Clone, Copy)]
pub struct ShipTuning {
    /// Sprite height in world units.
    pub height: f32,

    /// Horizontal speed in world units per second.
    pub speed: f32,

    /// Starting health.
    pub health: i32,

    /// Gap between the world bottom and the ship's bottom edge.
    pub bottom_margin: f32,

    pub bullet_height: f32,

    /// Upward bullet speed in world units per second.
    pub bullet_speed: f32,

    pub bullet_damage: i32,

    /// Seconds between automatic shots.
    pub reload_interval: f32,

    /// Seconds the sprite flashes after a hit.
    pub flash_time: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            height: 0.15,
            speed: 0.5,
            health: 100,
            bottom_margin: 0.05,
            bullet_height: 0.01,
            bullet_speed: 0.5,
            bullet_damage: 1,
            reload_interval: 0.2,
            flash_time: 0.15,
        }
    }
}
