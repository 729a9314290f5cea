//! Top-level driver: owns the current session and swaps in a fresh one when a
//! restart is requested from the game over screen.

use color_eyre::{Result, eyre::eyre};
use glam::Vec2;
use tracing::{info, warn};

use crate::assets::Atlas;
use crate::controls::ControlId;
use crate::entities::ShipIntent;
use crate::geometry::WorldRect;
use crate::renderer::Canvas;
use crate::session::{GameState, Session, SoundCue};

pub struct Game {
    atlas: Atlas,
    session: Session,
    seed: u64,
    restarts: u64,
    restart_requested: bool,
}

impl Game {
    pub fn new(atlas: Atlas, bounds: WorldRect, seed: u64) -> Result<Self> {
        let session = Session::new(&atlas, bounds, seed)?;
        Ok(Self {
            atlas,
            session,
            seed,
            restarts: 0,
            restart_requested: false,
        })
    }

    /// Dispatches an activated on-screen control.
    pub fn on_control(&mut self, id: ControlId) -> Result<()> {
        match id {
            ControlId::NEW_GAME => {
                self.request_restart();
                Ok(())
            }
            ControlId(other) => Err(eyre!("unknown control id {other}")),
        }
    }

    /// Asks for a new session at the next frame boundary. Only honored while
    /// the current session is over.
    pub fn request_restart(&mut self) {
        if self.session.state() != GameState::GameOver {
            warn!("restart requested while playing, ignored");
            return;
        }
        self.restart_requested = true;
    }

    pub fn frame(&mut self, delta: f32) -> Result<()> {
        if self.restart_requested {
            self.restart()?;
        }
        self.session.frame(delta);
        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        self.restart_requested = false;
        self.restarts += 1;
        let bounds = *self.session.bounds();
        let fresh = Session::new(&self.atlas, bounds, self.seed.wrapping_add(self.restarts))?;
        let mut old = std::mem::replace(&mut self.session, fresh);
        old.dispose();
        info!(restarts = self.restarts, "new game");
        Ok(())
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.session.draw(canvas);
    }

    pub fn resize(&mut self, bounds: WorldRect) {
        self.session.resize(bounds);
    }

    pub fn queue(&mut self, intent: ShipIntent) {
        self.session.queue(intent);
    }

    pub fn touch_down(&mut self, touch: Vec2, pointer: u8) {
        self.session.touch_down(touch, pointer);
    }

    pub fn touch_up(&mut self, touch: Vec2, pointer: u8) -> Result<()> {
        match self.session.touch_up(touch, pointer) {
            Some(id) => self.on_control(id),
            None => Ok(()),
        }
    }

    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        self.session.drain_cues().collect()
    }

    pub fn dispose(&mut self) -> usize {
        self.session.dispose()
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    pub fn is_restart_pending(&self) -> bool {
        self.restart_requested
    }
}
