// Library exports for testing
pub use collision::{Resolution, resolve};
pub use controls::ControlId;
pub use game::Game;
pub use pool::{Pool, Poolable};
pub use session::{GameState, Session, SoundCue};

pub mod app;
pub mod assets;
pub mod audio;
pub mod collision;
pub mod config;
pub mod controls;
pub mod emitter;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod pool;
pub mod renderer;
pub mod session;
pub mod tuning;
