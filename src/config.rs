use std::time::Duration;

// Runtime constants (not gameplay tuning, see `tuning`).

/// Sleep between frames, keeps the loop near 60 FPS without spinning.
pub const FRAME_SLEEP: Duration = Duration::from_millis(8);

/// Upper bound on a single frame's delta in seconds. A stalled terminal must not
/// teleport bullets through enemies.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Tracing output goes here since the terminal belongs to the game.
pub const LOG_FILE: &str = "debug.log";

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Root directory for sound files.
pub const ASSET_DIR: &str = "assets";

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f32 = 2.0;

/// World height in world units; width follows the terminal's aspect ratio.
pub const WORLD_HEIGHT: f32 = 1.0;

pub const STAR_COUNT: usize = 56;
