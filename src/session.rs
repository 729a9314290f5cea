//! One play session: pools, ship, starfield and game state, plus the fixed
//! per-frame pipeline that drives them.

use color_eyre::Result;
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::assets::Atlas;
use crate::collision::{self, Resolution};
use crate::config::STAR_COUNT;
use crate::controls::{Banner, ControlId, TouchUpButton};
use crate::emitter::EnemyEmitter;
use crate::entities::{
    Bullet, Enemy, Entity, Explosion, MainShip, ShipIntent, Shot, Starfield,
};
use crate::geometry::WorldRect;
use crate::pool::Pool;
use crate::renderer::Canvas;
use crate::tuning::{
    EmitterTuning, ExplosionTuning, ScreenTuning, ShipTuning, StarTuning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Sound effects requested by the session, drained by the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Laser,
    Bullet,
    Explosion,
}

pub struct Session {
    state: GameState,
    bounds: WorldRect,
    rng: StdRng,
    starfield: Starfield,
    ship: MainShip,
    bullets: Pool<Bullet>,
    enemies: Pool<Enemy>,
    explosions: Pool<Explosion>,
    emitter: EnemyEmitter,
    game_over: Banner,
    new_game: TouchUpButton,
    screen: ScreenTuning,
    cues: Vec<SoundCue>,
    frags: u32,
    frame_count: u64,
}

impl Session {
    pub fn new(atlas: &Atlas, bounds: WorldRect, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let starfield = Starfield::new(
            STAR_COUNT,
            atlas.sprite("star")?,
            StarTuning::default(),
            &bounds,
            &mut rng,
        );
        let ship = MainShip::new(
            ShipTuning::default(),
            atlas.sprite("main_ship")?,
            atlas.sprite("bullet_ship")?,
            &bounds,
        );
        let frames = atlas.sprites("explosion")?;
        let screen = ScreenTuning::default();

        let mut session = Self {
            state: GameState::Playing,
            bounds,
            rng,
            starfield,
            ship,
            bullets: Pool::new("bullets", Bullet::new),
            enemies: Pool::new("enemies", Enemy::new),
            explosions: Pool::new("explosions", move || {
                Explosion::new(frames.clone(), ExplosionTuning::default())
            }),
            emitter: EnemyEmitter::new(atlas, EmitterTuning::default())?,
            game_over: Banner::new(atlas.sprite("message_game_over")?, screen.banner_height),
            new_game: TouchUpButton::new(
                ControlId::NEW_GAME,
                atlas.sprite("button_new_game")?,
                screen.button_height,
            ),
            screen,
            cues: Vec::new(),
            frags: 0,
            frame_count: 0,
        };
        session.place_screen_controls();
        info!(seed, "session started");
        Ok(session)
    }

    /// Runs one frame: update, collide, reclaim. Rendering is done separately
    /// through [`Session::draw`] once this returns.
    pub fn frame(&mut self, delta: f32) {
        // Steps 2-4 follow the state the frame started in
        let playing = self.state == GameState::Playing;

        self.starfield.update(delta, &self.bounds);
        if !playing {
            return;
        }
        self.frame_count += 1;

        self.update_entities(delta);

        let resolution = self.resolve_collisions();
        if resolution.ship_destroyed && self.state == GameState::Playing {
            info!(frame = self.frame_count, frags = self.frags, "game over");
            self.state = GameState::GameOver;
        }

        self.reclaim_destroyed();
    }

    fn update_entities(&mut self, delta: f32) {
        self.ship.update(delta, &self.bounds);
        if let Some(shot) = self.ship.take_shot() {
            self.fire(shot, SoundCue::Laser);
        }

        self.bullets.update_all(delta, &self.bounds);
        self.enemies.update_all(delta, &self.bounds);
        self.explosions.update_all(delta, &self.bounds);

        for enemy in self.enemies.active_mut() {
            if let Some(shot) = enemy.take_shot() {
                self.bullets.acquire().fire(shot);
                self.cues.push(SoundCue::Bullet);
            }
        }

        self.emitter
            .generate(delta, &mut self.enemies, &self.bounds, &mut self.rng);
    }

    fn fire(&mut self, shot: Shot, cue: SoundCue) {
        self.bullets.acquire().fire(shot);
        self.cues.push(cue);
    }

    fn resolve_collisions(&mut self) -> Resolution {
        let resolution = collision::resolve(
            &mut self.ship,
            &mut self.enemies,
            &mut self.bullets,
            &mut self.explosions,
        );
        self.frags += resolution.frags;
        self.cues
            .extend(std::iter::repeat_n(SoundCue::Explosion, resolution.explosions as usize));
        resolution
    }

    fn reclaim_destroyed(&mut self) {
        self.bullets.reclaim_destroyed();
        self.enemies.reclaim_destroyed();
        self.explosions.reclaim_destroyed();
    }

    /// Emits draw calls for the current state. Never mutates.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.starfield.draw(canvas);
        match self.state {
            GameState::Playing => {
                self.ship.draw(canvas);
                self.bullets.draw_all(canvas);
                self.enemies.draw_all(canvas);
                self.explosions.draw_all(canvas);
            }
            GameState::GameOver => {
                self.game_over.draw(canvas);
                self.new_game.draw(canvas);
            }
        }
    }

    pub fn resize(&mut self, bounds: WorldRect) {
        debug!(width = bounds.width(), height = bounds.height(), "world resized");
        self.bounds = bounds;
        self.starfield.resize(&self.bounds, &mut self.rng);
        self.ship.resize(&self.bounds);
        self.place_screen_controls();
    }

    fn place_screen_controls(&mut self) {
        self.game_over.place(self.bounds.center);
        self.new_game
            .set_bottom(self.bounds.bottom() + self.screen.button_bottom_margin);
    }

    /// Queues a ship intent for the next update. Ignored once the game is over.
    pub fn queue(&mut self, intent: ShipIntent) {
        if self.state == GameState::Playing {
            self.ship.queue(intent);
        }
    }

    pub fn touch_down(&mut self, touch: Vec2, pointer: u8) {
        match self.state {
            GameState::Playing => self.ship.touch_down(touch, pointer, &self.bounds),
            GameState::GameOver => self.new_game.touch_down(touch, pointer),
        }
    }

    /// Returns the control activated by this release, if any.
    pub fn touch_up(&mut self, touch: Vec2, pointer: u8) -> Option<ControlId> {
        match self.state {
            GameState::Playing => {
                self.ship.touch_up(pointer);
                None
            }
            GameState::GameOver => self.new_game.touch_up(touch, pointer),
        }
    }

    /// Sound cues produced since the last call.
    pub fn drain_cues(&mut self) -> std::vec::Drain<'_, SoundCue> {
        self.cues.drain(..)
    }

    /// Releases everything held by the pools. Safe to call more than once.
    pub fn dispose(&mut self) -> usize {
        let released =
            self.bullets.dispose() + self.enemies.dispose() + self.explosions.dispose();
        if released > 0 {
            info!(released, "session disposed");
        }
        released
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn bounds(&self) -> &WorldRect {
        &self.bounds
    }

    pub fn ship(&self) -> &MainShip {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut MainShip {
        &mut self.ship
    }

    pub fn bullets(&self) -> &Pool<Bullet> {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut Pool<Bullet> {
        &mut self.bullets
    }

    pub fn enemies(&self) -> &Pool<Enemy> {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Pool<Enemy> {
        &mut self.enemies
    }

    pub fn explosions(&self) -> &Pool<Explosion> {
        &self.explosions
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn new_game_button(&self) -> &TouchUpButton {
        &self.new_game
    }

    pub fn frags(&self) -> u32 {
        self.frags
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("ship_health", &self.ship.health)
            .field("bullets", &self.bullets)
            .field("enemies", &self.enemies)
            .field("explosions", &self.explosions)
            .field("frags", &self.frags)
            .finish()
    }
}
