use color_eyre::Result;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::time::Instant;
use tracing::{info, warn};

use crate::assets::Atlas;
use crate::audio::AudioManager;
use crate::config::{FRAME_SLEEP, MAX_FRAME_DELTA};
use crate::entities::ShipIntent;
use crate::game::Game;
use crate::geometry::WorldRect;
use crate::input::{InputAction, InputManager, PointerPhase};
use crate::renderer::{GameRenderer, Projection, RenderView};
use crate::session::GameState;

/// The main application: terminal loop, timing, input, audio and rendering
/// around a [`Game`].
pub struct App {
    running: bool,
    game: Game,
    /// Last full terminal area, used to detect resizes
    area: Rect,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// Game timers
    game_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: Option<AudioManager>,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of the given size.
    pub fn new(area: Rect, release_events: bool) -> Result<Self> {
        let seed = rand::rng().random::<u64>();
        let playfield = GameRenderer::playfield(area);
        let bounds = WorldRect::for_viewport(playfield.width, playfield.height);
        let game = Game::new(Atlas::builtin(), bounds, seed)?;

        let audio_manager = match AudioManager::new() {
            Ok(audio) => Some(audio),
            Err(err) => {
                warn!(%err, "audio disabled");
                None
            }
        };

        let now = Instant::now();
        Ok(Self {
            running: true,
            game,
            area,
            last_frame_time: now,
            fps: 0,
            game_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
            audio_manager,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }
            let delta = frame_time.as_secs_f32().min(MAX_FRAME_DELTA);

            let size = terminal.size()?;
            self.resize(Rect::new(0, 0, size.width, size.height));

            let state = self.game.session().state();
            self.input_manager.poll_events(state)?;
            let actions = self.input_manager.take_actions(state);
            self.process_actions(&actions)?;

            let was_over = self.game.session().state() == GameState::GameOver;
            self.game.frame(delta)?;
            self.update_timers(was_over);
            self.play_cues();

            terminal.draw(|frame| {
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.game_start_time.elapsed().as_secs());
                let view = RenderView {
                    session: self.game.session(),
                    atlas: self.game.atlas(),
                    area: frame.area(),
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(FRAME_SLEEP);
        }

        self.game.dispose();
        info!("app stopped");
        Ok(())
    }

    fn resize(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        self.area = area;
        let playfield = GameRenderer::playfield(area);
        self.game
            .resize(WorldRect::for_viewport(playfield.width, playfield.height));
    }

    /// Process input actions and forward them to the game
    fn process_actions(&mut self, actions: &[InputAction]) -> Result<()> {
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Restart => self.game.request_restart(),
                InputAction::MoveLeft => self.game.queue(ShipIntent::MoveLeft),
                InputAction::MoveRight => self.game.queue(ShipIntent::MoveRight),
                InputAction::Fire => self.game.queue(ShipIntent::Fire),
                InputAction::Pointer(event) => {
                    let projection = Projection::new(
                        GameRenderer::playfield(self.area),
                        *self.game.session().bounds(),
                    );
                    let touch = projection.to_world(event.col, event.row);
                    match event.phase {
                        PointerPhase::Down | PointerPhase::Drag => {
                            self.game.touch_down(touch, event.pointer)
                        }
                        PointerPhase::Up => self.game.touch_up(touch, event.pointer)?,
                    }
                }
            }
        }
        Ok(())
    }

    fn update_timers(&mut self, was_over: bool) {
        let state = self.game.session().state();
        if state == GameState::GameOver && self.final_time_secs.is_none() {
            self.final_time_secs = Some(self.game_start_time.elapsed().as_secs());
        }
        if was_over && state == GameState::Playing {
            self.game_start_time = Instant::now();
            self.final_time_secs = None;
        }
    }

    fn play_cues(&mut self) {
        let cues = self.game.drain_cues();
        if let Some(audio) = &self.audio_manager {
            for cue in cues {
                audio.play(cue);
            }
        }
    }
}
