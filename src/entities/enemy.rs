use glam::Vec2;

use super::{Body, BulletOwner, Damageable, Entity, Shot, apply_damage};
use crate::assets::Sprite;
use crate::geometry::WorldRect;
use crate::pool::Poolable;
use crate::renderer::{Canvas, Tint};
use crate::tuning::EnemyTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Small,
    Medium,
    Big,
}

impl EnemyKind {
    pub fn region_name(&self) -> &'static str {
        match self {
            EnemyKind::Small => "enemy0",
            EnemyKind::Medium => "enemy1",
            EnemyKind::Big => "enemy2",
        }
    }
}

/// Sprites for one enemy kind and the bullets it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyLook {
    pub body: Sprite,
    pub bullet: Sprite,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    body: Body,
    pub kind: EnemyKind,
    pub health: i32,
    tuning: EnemyTuning,
    look: Option<EnemyLook>,
    /// False until the sprite has fully descended past the top edge.
    entered: bool,
    reload_timer: f32,
    pending_shot: bool,
    flash_timer: f32,
}

impl Enemy {
    pub fn new() -> Self {
        Self {
            body: Body::default(),
            kind: EnemyKind::Small,
            health: 0,
            tuning: EnemyTuning::for_kind(EnemyKind::Small),
            look: None,
            entered: false,
            reload_timer: 0.0,
            pending_shot: false,
            flash_timer: 0.0,
        }
    }

    /// Configures a freshly acquired enemy. `pos` is the sprite center.
    pub fn set(&mut self, kind: EnemyKind, tuning: EnemyTuning, look: EnemyLook, pos: Vec2) {
        self.kind = kind;
        self.tuning = tuning;
        self.health = tuning.health;
        self.look = Some(look);
        self.body.pos = pos;
        self.body.set_height_proportion(tuning.height, look.body.aspect);
    }

    pub fn has_entered(&self) -> bool {
        self.entered
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    /// Hands out the shot queued by the reload timer, at most once.
    pub fn take_shot(&mut self) -> Option<Shot> {
        if !std::mem::take(&mut self.pending_shot) || self.body.destroyed {
            return None;
        }
        let look = self.look?;
        Some(Shot {
            owner: BulletOwner::Enemy,
            sprite: look.bullet,
            pos: Vec2::new(self.body.pos.x, self.body.bottom()),
            velocity: Vec2::new(0.0, -self.tuning.bullet_speed),
            height: self.tuning.bullet_height,
            damage: self.tuning.bullet_damage,
        })
    }
}

impl Default for Enemy {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32, bounds: &WorldRect) {
        self.flash_timer = (self.flash_timer - delta).max(0.0);

        if self.entered {
            self.body.pos.y -= self.tuning.speed * delta;
            self.reload_timer += delta;
            if self.reload_timer >= self.tuning.reload_interval {
                self.reload_timer = 0.0;
                self.pending_shot = true;
            }
        } else {
            self.body.pos.y -= self.tuning.descent_speed * delta;
            if self.body.top() <= bounds.top() {
                self.entered = true;
                // First shot goes out as soon as the enemy is in view
                self.reload_timer = self.tuning.reload_interval;
            }
        }

        if self.body.top() < bounds.bottom() {
            self.destroy();
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.body.destroyed {
            return;
        }
        if let Some(look) = self.look {
            let tint = if self.is_flashing() {
                Tint::Flash
            } else {
                Tint::Normal
            };
            canvas.draw_region(look.body.region, self.body.pos, tint);
        }
    }
}

impl Damageable for Enemy {
    fn health(&self) -> i32 {
        self.health
    }

    fn damage(&mut self, amount: i32) -> bool {
        self.flash_timer = self.tuning.flash_time;
        apply_damage(&mut self.health, &mut self.body, amount)
    }
}

impl Poolable for Enemy {
    fn reset(&mut self) {
        *self = Self::new();
    }
}
