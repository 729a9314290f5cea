//! Game entities and the capabilities they share.
//!
//! Every entity owns a [`Body`] (position, extent, destroyed flag) and implements
//! [`Entity`]. Things that can be shot implement [`Damageable`] on top.

mod bullet;
mod enemy;
mod explosion;
mod ship;
mod star;

pub use bullet::{Bullet, BulletOwner, Shot};
pub use enemy::{Enemy, EnemyKind, EnemyLook};
pub use explosion::Explosion;
pub use ship::{MainShip, ShipIntent};
pub use star::{Star, Starfield};

use glam::Vec2;

use crate::geometry::WorldRect;
use crate::renderer::Canvas;

/// Spatial state shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub pos: Vec2,
    pub half_width: f32,
    pub half_height: f32,
    pub destroyed: bool,
}

impl Body {
    pub fn new(pos: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            pos,
            half_width,
            half_height,
            destroyed: false,
        }
    }

    /// Sizes the body from a height and the sprite's width/height ratio.
    pub fn set_height_proportion(&mut self, height: f32, aspect: f32) {
        self.half_height = height / 2.0;
        self.half_width = self.half_height * aspect;
    }

    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.half_width
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.half_width
    }

    pub fn top(&self) -> f32 {
        self.pos.y + self.half_height
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_height
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left + self.half_width;
    }

    pub fn set_right(&mut self, right: f32) {
        self.pos.x = right - self.half_width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top - self.half_height;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom + self.half_height;
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }

    /// Circle overlap using the half-widths as radii. Compares squared values.
    pub fn overlaps(&self, other: &Body) -> bool {
        let reach = self.half_width + other.half_width;
        self.pos.distance_squared(other.pos) < reach * reach
    }
}

/// Capabilities every game object has: position, update, draw, collision extent
/// and destruction.
pub trait Entity {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Advances timers and position by `delta` seconds.
    fn update(&mut self, delta: f32, bounds: &WorldRect);

    /// Emits draw calls. Never mutates.
    fn draw(&self, canvas: &mut dyn Canvas);

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    fn is_destroyed(&self) -> bool {
        self.body().destroyed
    }

    fn destroy(&mut self) {
        self.body_mut().destroyed = true;
    }
}

/// Entities with health.
pub trait Damageable: Entity {
    fn health(&self) -> i32;

    /// Subtracts `amount` from health. Returns true only for the hit that
    /// destroyed the entity, so the caller can fire the destruction effect once.
    fn damage(&mut self, amount: i32) -> bool;
}

/// Health bookkeeping shared by the ship and enemies.
pub(crate) fn apply_damage(health: &mut i32, body: &mut Body, amount: i32) -> bool {
    *health -= amount;
    if *health <= 0 && !body.destroyed {
        body.destroyed = true;
        return true;
    }
    false
}
