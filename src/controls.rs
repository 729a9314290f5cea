//! Screen furniture shown on the game over screen.

use glam::Vec2;

use crate::assets::Sprite;
use crate::entities::Body;
use crate::renderer::{Canvas, Tint};

/// Identifies the control that produced an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub u16);

impl ControlId {
    pub const NEW_GAME: ControlId = ControlId(1);
}

/// Static sprite, e.g. the "game over" message.
#[derive(Debug, Clone)]
pub struct Banner {
    body: Body,
    sprite: Sprite,
    height: f32,
}

impl Banner {
    pub fn new(sprite: Sprite, height: f32) -> Self {
        let mut body = Body::default();
        body.set_height_proportion(height, sprite.aspect);
        Self {
            body,
            sprite,
            height,
        }
    }

    pub fn place(&mut self, pos: Vec2) {
        self.body.set_height_proportion(self.height, self.sprite.aspect);
        self.body.pos = pos;
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_region(self.sprite.region, self.body.pos, Tint::Normal);
    }
}

/// Button that fires when the pointer that pressed it is released inside it.
#[derive(Debug, Clone)]
pub struct TouchUpButton {
    id: ControlId,
    body: Body,
    sprite: Sprite,
    pressed: Option<u8>,
}

impl TouchUpButton {
    pub fn new(id: ControlId, sprite: Sprite, height: f32) -> Self {
        let mut body = Body::default();
        body.set_height_proportion(height, sprite.aspect);
        Self {
            id,
            body,
            sprite,
            pressed: None,
        }
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.body.set_bottom(bottom);
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }

    pub fn touch_down(&mut self, touch: Vec2, pointer: u8) {
        if self.pressed.is_none() && self.body.contains(touch) {
            self.pressed = Some(pointer);
        }
    }

    pub fn touch_up(&mut self, touch: Vec2, pointer: u8) -> Option<ControlId> {
        if self.pressed != Some(pointer) {
            return None;
        }
        self.pressed = None;
        self.body.contains(touch).then_some(self.id)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let tint = if self.is_pressed() {
            Tint::Pressed
        } else {
            Tint::Normal
        };
        canvas.draw_region(self.sprite.region, self.body.pos, tint);
    }
}
