use glam::Vec2;

use super::{Body, BulletOwner, Damageable, Entity, Shot, apply_damage};
use crate::assets::Sprite;
use crate::geometry::WorldRect;
use crate::renderer::{Canvas, Tint};
use crate::tuning::ShipTuning;

/// Player intents queued by input and consumed by the next ship update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipIntent {
    MoveLeft,
    MoveRight,
    Fire,
}

/// The player's ship. Not pooled, never reclaimed.
#[derive(Debug, Clone)]
pub struct MainShip {
    body: Body,
    pub health: i32,
    tuning: ShipTuning,
    sprite: Sprite,
    bullet_sprite: Sprite,
    velocity: Vec2,
    intents: Vec<ShipIntent>,
    /// Pointer currently steering the ship and the direction it holds.
    touch: Option<(u8, f32)>,
    reload_timer: f32,
    pending_shot: bool,
    flash_timer: f32,
}

impl MainShip {
    pub fn new(tuning: ShipTuning, sprite: Sprite, bullet_sprite: Sprite, bounds: &WorldRect) -> Self {
        let mut body = Body::default();
        body.set_height_proportion(tuning.height, sprite.aspect);
        let mut ship = Self {
            body,
            health: tuning.health,
            tuning,
            sprite,
            bullet_sprite,
            velocity: Vec2::ZERO,
            intents: Vec::new(),
            touch: None,
            reload_timer: 0.0,
            pending_shot: false,
            flash_timer: 0.0,
        };
        ship.resize(bounds);
        ship
    }

    /// Rests the ship on the bottom margin and keeps it inside the new bounds.
    pub fn resize(&mut self, bounds: &WorldRect) {
        self.body.set_bottom(bounds.bottom() + self.tuning.bottom_margin);
        self.keep_inside(bounds);
    }

    pub fn queue(&mut self, intent: ShipIntent) {
        self.intents.push(intent);
    }

    /// A pointer held on the left half of the world steers left, right half
    /// steers right.
    pub fn touch_down(&mut self, touch: Vec2, pointer: u8, bounds: &WorldRect) {
        let direction = if touch.x < bounds.center.x { -1.0 } else { 1.0 };
        self.touch = Some((pointer, direction));
    }

    pub fn touch_up(&mut self, pointer: u8) {
        if matches!(self.touch, Some((held, _)) if held == pointer) {
            self.touch = None;
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    /// Hands out the shot queued by the last update, at most once.
    pub fn take_shot(&mut self) -> Option<Shot> {
        if !std::mem::take(&mut self.pending_shot) || self.body.destroyed {
            return None;
        }
        Some(Shot {
            owner: BulletOwner::Ship,
            sprite: self.bullet_sprite,
            pos: Vec2::new(self.body.pos.x, self.body.top()),
            velocity: Vec2::new(0.0, self.tuning.bullet_speed),
            height: self.tuning.bullet_height,
            damage: self.tuning.bullet_damage,
        })
    }

    fn keep_inside(&mut self, bounds: &WorldRect) {
        if self.body.left() < bounds.left() {
            self.body.set_left(bounds.left());
            self.velocity = Vec2::ZERO;
        }
        if self.body.right() > bounds.right() {
            self.body.set_right(bounds.right());
            self.velocity = Vec2::ZERO;
        }
    }
}

impl Entity for MainShip {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32, bounds: &WorldRect) {
        self.flash_timer = (self.flash_timer - delta).max(0.0);

        let mut direction: f32 = 0.0;
        let mut fire = false;
        for intent in self.intents.drain(..) {
            match intent {
                ShipIntent::MoveLeft => direction -= 1.0,
                ShipIntent::MoveRight => direction += 1.0,
                ShipIntent::Fire => fire = true,
            }
        }
        if direction == 0.0
            && let Some((_, held)) = self.touch
        {
            direction = held;
        }

        self.velocity = Vec2::new(direction.clamp(-1.0, 1.0) * self.tuning.speed, 0.0);
        self.body.pos += self.velocity * delta;
        self.keep_inside(bounds);

        // Auto-fire on reload; the fire key may cut the wait in half
        self.reload_timer += delta;
        let ready = self.reload_timer >= self.tuning.reload_interval
            || (fire && self.reload_timer >= self.tuning.reload_interval / 2.0);
        if ready {
            self.reload_timer = 0.0;
            self.pending_shot = true;
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.body.destroyed {
            return;
        }
        let tint = if self.is_flashing() {
            Tint::Flash
        } else {
            Tint::Normal
        };
        canvas.draw_region(self.sprite.region, self.body.pos, tint);
    }
}

impl Damageable for MainShip {
    fn health(&self) -> i32 {
        self.health
    }

    fn damage(&mut self, amount: i32) -> bool {
        self.flash_timer = self.tuning.flash_time;
        apply_damage(&mut self.health, &mut self.body, amount)
    }
}
