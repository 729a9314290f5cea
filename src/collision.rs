//! Per-frame collision pass between the ship, enemies and bullets.
//!
//! Runs after every pool has been updated and before any pool is reclaimed, so
//! destroyed entities are still in their active lists and must be skipped here.
//! The three phases always run in the same order:
//!
//! 1. enemy rams ship: first overlap destroys the enemy and ends the pass,
//! 2. enemy bullets hit ship: every overlapping bullet lands,
//! 3. ship bullets hit enemies: an enemy may take several bullets, a bullet
//!    hits at most one enemy.

use tracing::{debug, info};

use crate::entities::{Bullet, BulletOwner, Damageable, Enemy, Entity, Explosion, MainShip};
use crate::pool::Pool;

/// What happened during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    /// An enemy rammed the ship and the pass stopped early.
    pub rammed: bool,
    /// Enemy bullets that landed on the ship.
    pub ship_hits: u32,
    /// Ship bullets that landed on enemies.
    pub enemy_hits: u32,
    /// Enemies killed by ship bullets.
    pub frags: u32,
    /// Explosions spawned by this pass.
    pub explosions: u32,
    /// The ship is destroyed after this pass.
    pub ship_destroyed: bool,
}

pub fn resolve(
    ship: &mut MainShip,
    enemies: &mut Pool<Enemy>,
    bullets: &mut Pool<Bullet>,
    explosions: &mut Pool<Explosion>,
) -> Resolution {
    let mut resolution = Resolution::default();

    if ram_ship(ship, enemies, explosions) {
        resolution.rammed = true;
        resolution.explosions += 1;
        resolution.ship_destroyed = ship.is_destroyed();
        return resolution;
    }

    hit_ship(ship, bullets, explosions, &mut resolution);
    hit_enemies(enemies, bullets, explosions, &mut resolution);

    resolution
}

/// Phase 1. Only the first overlapping enemy is resolved; any others are
/// tested again next frame.
fn ram_ship(ship: &MainShip, enemies: &mut Pool<Enemy>, explosions: &mut Pool<Explosion>) -> bool {
    let Some(enemy) = enemies
        .active_mut()
        .iter_mut()
        .find(|enemy| !enemy.is_destroyed() && enemy.body().overlaps(ship.body()))
    else {
        return false;
    };

    debug!(kind = ?enemy.kind, "enemy rammed ship");
    explosions.burst(enemy.body());
    enemy.destroy();
    true
}

/// Phase 2. Keeps going after the ship dies: later bullets in the same pass are
/// still consumed and still apply their damage.
fn hit_ship(
    ship: &mut MainShip,
    bullets: &mut Pool<Bullet>,
    explosions: &mut Pool<Explosion>,
    resolution: &mut Resolution,
) {
    for bullet in bullets.active_mut() {
        if bullet.is_destroyed() || bullet.is_owned_by(BulletOwner::Ship) {
            continue;
        }
        if bullet.body().overlaps(ship.body()) {
            resolution.ship_hits += 1;
            if ship.damage(bullet.damage) {
                info!(health = ship.health(), "ship destroyed");
                explosions.burst(ship.body());
                resolution.explosions += 1;
            }
            bullet.destroy();
        }
        if ship.is_destroyed() {
            resolution.ship_destroyed = true;
        }
    }
}

/// Phase 3.
fn hit_enemies(
    enemies: &mut Pool<Enemy>,
    bullets: &mut Pool<Bullet>,
    explosions: &mut Pool<Explosion>,
    resolution: &mut Resolution,
) {
    for enemy in enemies.active_mut() {
        if enemy.is_destroyed() {
            continue;
        }
        for bullet in bullets.active_mut() {
            if bullet.is_destroyed() || !bullet.is_owned_by(BulletOwner::Ship) {
                continue;
            }
            if enemy.body().overlaps(bullet.body()) {
                resolution.enemy_hits += 1;
                if enemy.damage(bullet.damage) {
                    debug!(kind = ?enemy.kind, health = enemy.health(), "enemy destroyed");
                    explosions.burst(enemy.body());
                    resolution.explosions += 1;
                    resolution.frags += 1;
                }
                bullet.destroy();
            }
        }
    }
}
