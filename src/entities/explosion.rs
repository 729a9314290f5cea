use glam::Vec2;

use super::{Body, Entity};
use crate::assets::Sprite;
use crate::geometry::WorldRect;
use crate::pool::{Pool, Poolable};
use crate::renderer::{Canvas, Tint};
use crate::tuning::ExplosionTuning;

/// Cosmetic frame animation. Destroys itself after the last frame.
#[derive(Debug, Clone)]
pub struct Explosion {
    body: Body,
    frames: Vec<Sprite>,
    frame: usize,
    timer: f32,
    frame_interval: f32,
}

impl Explosion {
    pub fn new(frames: Vec<Sprite>, tuning: ExplosionTuning) -> Self {
        Self {
            body: Body::default(),
            frames,
            frame: 0,
            timer: 0.0,
            frame_interval: tuning.frame_interval,
        }
    }

    pub fn set(&mut self, pos: Vec2, height: f32) {
        self.body.pos = pos;
        let aspect = self.frames.first().map_or(1.0, |sprite| sprite.aspect);
        self.body.set_height_proportion(height, aspect);
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

impl Entity for Explosion {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32, _bounds: &WorldRect) {
        self.timer += delta;
        while self.timer >= self.frame_interval && self.frame < self.frames.len() {
            self.timer -= self.frame_interval;
            self.frame += 1;
        }
        if self.frame >= self.frames.len() {
            self.destroy();
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.body.destroyed {
            return;
        }
        if let Some(sprite) = self.frames.get(self.frame) {
            canvas.draw_region(sprite.region, self.body.pos, Tint::Normal);
        }
    }
}

impl Poolable for Explosion {
    fn reset(&mut self) {
        self.body = Body::default();
        self.frame = 0;
        self.timer = 0.0;
    }
}

impl Pool<Explosion> {
    /// Starts an explosion sized after `body`, centered on it.
    pub fn burst(&mut self, body: &Body) {
        self.acquire().set(body.pos, body.height());
    }
}
