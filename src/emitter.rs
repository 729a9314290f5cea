use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::assets::Atlas;
use crate::entities::{Enemy, EnemyKind, EnemyLook};
use crate::geometry::WorldRect;
use crate::pool::Pool;
use crate::tuning::{EmitterTuning, EnemyTuning};

/// Feeds enemies into the pool on a fixed interval with a random kind and column.
#[derive(Debug, Clone)]
pub struct EnemyEmitter {
    tuning: EmitterTuning,
    timer: f32,
    small: EnemyLook,
    medium: EnemyLook,
    big: EnemyLook,
}

impl EnemyEmitter {
    pub fn new(atlas: &Atlas, tuning: EmitterTuning) -> color_eyre::Result<Self> {
        let bullet = atlas.sprite("bullet_enemy")?;
        let look = |kind: EnemyKind| -> color_eyre::Result<EnemyLook> {
            Ok(EnemyLook {
                body: atlas.sprite(kind.region_name())?,
                bullet,
            })
        };
        Ok(Self {
            tuning,
            timer: 0.0,
            small: look(EnemyKind::Small)?,
            medium: look(EnemyKind::Medium)?,
            big: look(EnemyKind::Big)?,
        })
    }

    /// Advances the spawn timer and spawns at most one enemy.
    pub fn generate(
        &mut self,
        delta: f32,
        enemies: &mut Pool<Enemy>,
        bounds: &WorldRect,
        rng: &mut impl Rng,
    ) -> Option<EnemyKind> {
        self.timer += delta;
        if self.timer < self.tuning.interval {
            return None;
        }
        self.timer = 0.0;

        let kind = self.pick_kind(rng.random::<f32>());
        let tuning = EnemyTuning::for_kind(kind);
        let look = self.look(kind);

        let half_height = tuning.height / 2.0;
        let half_width = half_height * look.body.aspect;
        let (min_x, max_x) = (bounds.left() + half_width, bounds.right() - half_width);
        let x = if max_x > min_x {
            rng.random_range(min_x..max_x)
        } else {
            bounds.center.x
        };
        let pos = Vec2::new(x, bounds.top() + half_height);

        enemies.acquire().set(kind, tuning, look, pos);
        debug!(?kind, x, "enemy spawned");
        Some(kind)
    }

    pub fn pick_kind(&self, roll: f32) -> EnemyKind {
        if roll < self.tuning.small_odds {
            EnemyKind::Small
        } else if roll < self.tuning.medium_odds {
            EnemyKind::Medium
        } else {
            EnemyKind::Big
        }
    }

    fn look(&self, kind: EnemyKind) -> EnemyLook {
        match kind {
            EnemyKind::Small => self.small,
            EnemyKind::Medium => self.medium,
            EnemyKind::Big => self.big,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn emitter() -> EnemyEmitter {
        EnemyEmitter::new(&Atlas::builtin(), EmitterTuning::default()).unwrap()
    }

    #[test]
    fn test_spawns_once_per_interval() {
        let mut emitter = emitter();
        let mut enemies = Pool::new("enemies", Enemy::new);
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = WorldRect::default();

        assert!(emitter.generate(3.9, &mut enemies, &bounds, &mut rng).is_none());
        assert!(emitter.generate(0.2, &mut enemies, &bounds, &mut rng).is_some());
        assert!(emitter.generate(0.2, &mut enemies, &bounds, &mut rng).is_none());
        assert_eq!(enemies.active_count(), 1);
    }

    #[test]
    fn test_spawn_starts_above_top_inside_columns() {
        let mut emitter = emitter();
        let mut enemies = Pool::new("enemies", Enemy::new);
        let mut rng = StdRng::seed_from_u64(9);
        let bounds = WorldRect::for_viewport(120, 30);

        for _ in 0..20 {
            emitter.generate(4.0, &mut enemies, &bounds, &mut rng);
        }
        for enemy in enemies.active() {
            assert!(enemy.body().bottom() >= bounds.top() - 1e-6);
            assert!(enemy.body().left() >= bounds.left() - 1e-6);
            assert!(enemy.body().right() <= bounds.right() + 1e-6);
            assert!(!enemy.has_entered());
        }
    }

    #[test]
    fn test_kind_odds() {
        let emitter = emitter();
        assert_eq!(emitter.pick_kind(0.1), EnemyKind::Small);
        assert_eq!(emitter.pick_kind(0.6), EnemyKind::Medium);
        assert_eq!(emitter.pick_kind(0.95), EnemyKind::Big);
    }
}
