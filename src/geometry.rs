use glam::Vec2;

use crate::config::{CELL_ASPECT, WORLD_HEIGHT};

/// Axis-aligned rectangle in world space. Y grows upward, the origin sits at the
/// center of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub center: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

impl WorldRect {
    pub fn new(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            center,
            half_width,
            half_height,
        }
    }

    /// World bounds for a terminal of `cols` x `rows` cells. The height is fixed,
    /// the width follows the visible aspect ratio.
    pub fn for_viewport(cols: u16, rows: u16) -> Self {
        let aspect = if cols == 0 || rows == 0 {
            1.0
        } else {
            cols as f32 / (rows as f32 * CELL_ASPECT)
        };
        let half_height = WORLD_HEIGHT / 2.0;
        Self::new(Vec2::ZERO, half_height * aspect, half_height)
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half_width
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half_width
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_height
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_height
    }

    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.bottom()
            && point.y <= self.top()
    }
}

impl Default for WorldRect {
    fn default() -> Self {
        Self::new(Vec2::ZERO, WORLD_HEIGHT / 2.0, WORLD_HEIGHT / 2.0)
    }
}
