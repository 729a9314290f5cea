/// Integration tests for game logic
///
/// These drive whole sessions through the public API: frame pipeline,
/// collision phases, game over and restart.
use glam::Vec2;
use stargame::assets::Atlas;
use stargame::entities::{
    Bullet, BulletOwner, Enemy, EnemyKind, EnemyLook, Entity, ShipIntent, Shot,
};
use stargame::geometry::WorldRect;
use stargame::tuning::EnemyTuning;
use stargame::{ControlId, Game, GameState, Pool, Session, SoundCue};

fn session(seed: u64) -> (Atlas, Session) {
    let atlas = Atlas::builtin();
    let session = Session::new(&atlas, WorldRect::default(), seed).unwrap();
    (atlas, session)
}

fn shot(atlas: &Atlas, owner: BulletOwner, pos: Vec2, damage: i32) -> Shot {
    let region = match owner {
        BulletOwner::Ship => "bullet_ship",
        BulletOwner::Enemy => "bullet_enemy",
    };
    Shot {
        owner,
        sprite: atlas.sprite(region).unwrap(),
        pos,
        velocity: Vec2::ZERO,
        height: 0.01,
        damage,
    }
}

fn place_enemy(atlas: &Atlas, session: &mut Session, tuning: EnemyTuning, pos: Vec2) {
    let look = EnemyLook {
        body: atlas.sprite(EnemyKind::Big.region_name()).unwrap(),
        bullet: atlas.sprite("bullet_enemy").unwrap(),
    };
    session
        .enemies_mut()
        .acquire()
        .set(EnemyKind::Big, tuning, look, pos);
}

#[test]
fn test_lethal_enemy_bullet_ends_the_game() {
    let (atlas, mut session) = session(1);
    session.ship_mut().health = 10;
    let pos = session.ship().pos();
    session
        .bullets_mut()
        .acquire()
        .fire(shot(&atlas, BulletOwner::Enemy, pos, 15));

    session.frame(0.0);

    assert_eq!(session.ship().health, -5);
    assert!(session.ship().is_destroyed());
    assert_eq!(session.state(), GameState::GameOver);
    assert_eq!(session.explosions().active_count(), 1);
}

#[test]
fn test_enemy_takes_every_overlapping_bullet() {
    let (atlas, mut session) = session(2);
    let tuning = EnemyTuning {
        health: 20,
        ..EnemyTuning::for_kind(EnemyKind::Big)
    };
    let target = Vec2::new(0.0, 0.2);
    place_enemy(&atlas, &mut session, tuning, target);
    for _ in 0..2 {
        session
            .bullets_mut()
            .acquire()
            .fire(shot(&atlas, BulletOwner::Ship, target, 12));
    }

    session.frame(0.0);

    assert_eq!(session.frags(), 1);
    assert_eq!(session.enemies().active_count(), 0);
    assert_eq!(session.bullets().active_count(), 0);
    assert_eq!(session.explosions().active_count(), 1);
    let cues: Vec<SoundCue> = session.drain_cues().collect();
    assert_eq!(cues, vec![SoundCue::Explosion]);
}

#[test]
fn test_only_one_ram_per_frame() {
    let (atlas, mut session) = session(3);
    let pos = session.ship().pos();
    let tuning = EnemyTuning::for_kind(EnemyKind::Big);
    place_enemy(&atlas, &mut session, tuning, pos);
    place_enemy(&atlas, &mut session, tuning, pos);

    session.frame(0.0);
    assert_eq!(session.enemies().active_count(), 1);
    assert_eq!(session.ship().health, 100);

    session.frame(0.0);
    assert_eq!(session.enemies().active_count(), 0);
    assert_eq!(session.explosions().active_count(), 2);
    assert_eq!(session.state(), GameState::Playing);
}

#[test]
fn test_ship_ignores_its_own_bullets() {
    let (atlas, mut session) = session(4);
    let pos = session.ship().pos();
    session
        .bullets_mut()
        .acquire()
        .fire(shot(&atlas, BulletOwner::Ship, pos, 1000));

    session.frame(0.0);

    assert_eq!(session.ship().health, 100);
    assert_eq!(session.bullets().active_count(), 1);
    assert_eq!(session.state(), GameState::Playing);
}

#[test]
fn test_sessions_with_same_seed_agree() {
    let run = || {
        let (_, mut session) = session(42);
        for frame in 0..900 {
            if frame % 120 < 60 {
                session.queue(ShipIntent::MoveLeft);
            } else {
                session.queue(ShipIntent::MoveRight);
            }
            session.frame(1.0 / 60.0);
        }
        let enemies: Vec<Vec2> = session.enemies().active().iter().map(|e| e.pos()).collect();
        let bullets: Vec<Vec2> = session.bullets().active().iter().map(|b| b.pos()).collect();
        (
            session.enemies().constructed(),
            session.ship().pos(),
            session.ship().health,
            session.frags(),
            enemies,
            bullets,
        )
    };

    let first = run();
    assert!(first.0 > 0);
    assert_eq!(first, run());
}

#[test]
fn test_restart_builds_a_fresh_session() {
    let mut game = Game::new(Atlas::builtin(), WorldRect::default(), 5).unwrap();
    for _ in 0..300 {
        game.frame(1.0 / 60.0).unwrap();
    }

    let atlas = Atlas::builtin();
    let session = game.session_mut();
    session.ship_mut().health = 1;
    let pos = session.ship().pos();
    session
        .bullets_mut()
        .acquire()
        .fire(shot(&atlas, BulletOwner::Enemy, pos, 1));
    game.frame(0.0).unwrap();
    assert_eq!(game.session().state(), GameState::GameOver);

    game.on_control(ControlId::NEW_GAME).unwrap();
    game.frame(0.0).unwrap();

    let session = game.session();
    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.ship().health, 100);
    assert_eq!(session.enemies().active_count(), 0);
    assert_eq!(session.explosions().active_count(), 0);
    assert_eq!(session.frags(), 0);
}

#[test]
fn test_unknown_control_is_fatal() {
    let mut game = Game::new(Atlas::builtin(), WorldRect::default(), 6).unwrap();
    let err = game.on_control(ControlId(7)).unwrap_err();
    assert!(err.to_string().contains("unknown control"));
}

#[test]
fn test_dispose_twice_is_harmless() {
    let mut game = Game::new(Atlas::builtin(), WorldRect::default(), 7).unwrap();
    for _ in 0..60 {
        game.frame(1.0 / 60.0).unwrap();
    }
    assert!(game.dispose() > 0);
    assert_eq!(game.dispose(), 0);
}

#[test]
fn test_pools_recycle_instances() {
    let mut bullets = Pool::new("bullets", Bullet::new);
    bullets.acquire();
    bullets.active_mut()[0].destroy();
    assert_eq!(bullets.reclaim_destroyed(), 1);

    bullets.acquire();
    assert_eq!(bullets.constructed(), 1);
    assert!(!bullets.active()[0].is_destroyed());

    let mut enemies = Pool::new("enemies", Enemy::new);
    for _ in 0..3 {
        enemies.acquire();
    }
    assert_eq!(enemies.dispose(), 3);
    assert_eq!(enemies.dispose(), 0);
}
