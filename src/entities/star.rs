use glam::Vec2;
use rand::Rng;

use super::{Body, Entity};
use crate::assets::Sprite;
use crate::geometry::WorldRect;
use crate::renderer::{Canvas, Tint};
use crate::tuning::StarTuning;

/// Background decoration. Drifts and wraps around the world, never collides.
#[derive(Debug, Clone)]
pub struct Star {
    body: Body,
    velocity: Vec2,
    sprite: Sprite,
}

impl Star {
    pub fn new(sprite: Sprite, velocity: Vec2, height: f32) -> Self {
        let mut body = Body::default();
        body.set_height_proportion(height, sprite.aspect);
        Self {
            body,
            velocity,
            sprite,
        }
    }

    fn wrap(&mut self, bounds: &WorldRect) {
        if self.body.right() < bounds.left() {
            self.body.set_left(bounds.right());
        }
        if self.body.left() > bounds.right() {
            self.body.set_right(bounds.left());
        }
        if self.body.top() < bounds.bottom() {
            self.body.set_bottom(bounds.top());
        }
    }
}

impl Entity for Star {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32, bounds: &WorldRect) {
        self.body.pos += self.velocity * delta;
        self.wrap(bounds);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_region(self.sprite.region, self.body.pos, Tint::Normal);
    }
}

/// The decorative layer: a fixed set of stars, updated in every game state.
#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(
        count: usize,
        sprite: Sprite,
        tuning: StarTuning,
        bounds: &WorldRect,
        rng: &mut impl Rng,
    ) -> Self {
        let stars = (0..count)
            .map(|_| {
                let velocity = Vec2::new(
                    rng.random_range(tuning.drift.0..tuning.drift.1),
                    rng.random_range(tuning.fall.0..tuning.fall.1),
                );
                Star::new(sprite, velocity, tuning.height)
            })
            .collect();
        let mut field = Self { stars };
        field.resize(bounds, rng);
        field
    }

    /// Scatters the stars over the new bounds.
    pub fn resize(&mut self, bounds: &WorldRect, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.body.pos = Vec2::new(
                random_between(rng, bounds.left(), bounds.right()),
                random_between(rng, bounds.bottom(), bounds.top()),
            );
        }
    }

    pub fn update(&mut self, delta: f32, bounds: &WorldRect) {
        for star in &mut self.stars {
            star.update(delta, bounds);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for star in &self.stars {
            star.draw(canvas);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

fn random_between(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Atlas;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(bounds: &WorldRect) -> Starfield {
        let sprite = Atlas::builtin().sprite("star").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        Starfield::new(16, sprite, StarTuning::default(), bounds, &mut rng)
    }

    #[test]
    fn test_stars_start_inside_bounds() {
        let bounds = WorldRect::for_viewport(80, 24);
        let field = field(&bounds);
        assert_eq!(field.stars().len(), 16);
        assert!(field.stars().iter().all(|star| bounds.contains(star.pos())));
    }

    #[test]
    fn test_stars_wrap_to_top() {
        let bounds = WorldRect::default();
        let sprite = Atlas::builtin().sprite("star").unwrap();
        let mut star = Star::new(sprite, Vec2::new(0.0, -1.0), 0.01);
        star.body_mut().pos = Vec2::new(0.0, bounds.bottom());
        star.update(0.1, &bounds);
        assert!(star.pos().y > bounds.top());
    }

    #[test]
    fn test_stars_keep_moving_down() {
        let bounds = WorldRect::default();
        let mut field = field(&bounds);
        let before: Vec<f32> = field.stars().iter().map(|s| s.pos().y).collect();
        field.update(0.01, &bounds);
        let moved = field
            .stars()
            .iter()
            .zip(before)
            .filter(|(star, y)| star.pos().y < *y)
            .count();
        assert_eq!(moved, 16);
    }
}
