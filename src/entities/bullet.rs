use glam::Vec2;

use super::{Body, Entity};
use crate::assets::Sprite;
use crate::geometry::WorldRect;
use crate::pool::Poolable;
use crate::renderer::{Canvas, Tint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletOwner {
    Ship,
    Enemy,
}

/// Everything needed to put a pooled bullet in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub owner: BulletOwner,
    pub sprite: Sprite,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub height: f32,
    pub damage: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Bullet {
    body: Body,
    pub velocity: Vec2,
    pub damage: i32,
    pub owner: Option<BulletOwner>,
    sprite: Option<Sprite>,
}

impl Bullet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&mut self, shot: Shot) {
        self.body.pos = shot.pos;
        self.body
            .set_height_proportion(shot.height, shot.sprite.aspect);
        self.velocity = shot.velocity;
        self.damage = shot.damage;
        self.owner = Some(shot.owner);
        self.sprite = Some(shot.sprite);
    }

    pub fn is_owned_by(&self, owner: BulletOwner) -> bool {
        self.owner == Some(owner)
    }
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32, bounds: &WorldRect) {
        self.body.pos += self.velocity * delta;
        if !bounds.contains(self.body.pos) {
            self.destroy();
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.body.destroyed {
            return;
        }
        if let Some(sprite) = self.sprite {
            canvas.draw_region(sprite.region, self.body.pos, Tint::Normal);
        }
    }
}

impl Poolable for Bullet {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Atlas;

    fn shot(owner: BulletOwner, pos: Vec2, velocity: Vec2) -> Shot {
        Shot {
            owner,
            sprite: Atlas::builtin().sprite("bullet_ship").unwrap(),
            pos,
            velocity,
            height: 0.01,
            damage: 3,
        }
    }

    #[test]
    fn test_fire_sets_state() {
        let mut bullet = Bullet::new();
        bullet.fire(shot(BulletOwner::Ship, Vec2::new(0.1, 0.2), Vec2::Y));
        assert_eq!(bullet.pos(), Vec2::new(0.1, 0.2));
        assert_eq!(bullet.damage, 3);
        assert!(bullet.is_owned_by(BulletOwner::Ship));
        assert!(!bullet.is_owned_by(BulletOwner::Enemy));
    }

    #[test]
    fn test_bullet_moves_with_velocity() {
        let mut bullet = Bullet::new();
        bullet.fire(shot(BulletOwner::Enemy, Vec2::ZERO, Vec2::new(0.0, -0.5)));
        bullet.update(0.2, &WorldRect::default());
        assert!((bullet.pos().y + 0.1).abs() < 1e-6);
        assert!(!bullet.is_destroyed());
    }

    #[test]
    fn test_bullet_leaving_world_is_destroyed() {
        let mut bullet = Bullet::new();
        bullet.fire(shot(BulletOwner::Ship, Vec2::new(0.0, 0.49), Vec2::Y));
        bullet.update(0.1, &WorldRect::default());
        assert!(bullet.is_destroyed());
    }

    #[test]
    fn test_reset_clears_flight() {
        let mut bullet = Bullet::new();
        bullet.fire(shot(BulletOwner::Ship, Vec2::ONE, Vec2::Y));
        bullet.destroy();
        bullet.reset();
        assert!(!bullet.is_destroyed());
        assert_eq!(bullet.owner, None);
        assert_eq!(bullet.damage, 0);
    }
}
