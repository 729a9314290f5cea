//! Tuning for cosmetic entities and screen furniture.

#[derive(Debug, Clone, Copy)]
pub struct ExplosionTuning {
    /// Seconds each animation frame stays on screen.
    pub frame_interval: f32,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            frame_interval: 0.05,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StarTuning {
    pub height: f32,

    /// Horizontal drift range in world units per second.
    pub drift: (f32, f32),

    /// Vertical speed range (negative is downward).
    pub fall: (f32, f32),
}

impl Default for StarTuning {
    fn default() -> Self {
        Self {
            height: 0.01,
            drift: (-0.005, 0.005),
            fall: (-0.5, -0.1),
        }
    }
}

/// Placement of the game over banner and the restart button.
#[derive(Debug, Clone, Copy)]
pub struct ScreenTuning {
    pub banner_height: f32,

    pub button_height: f32,

    /// Gap between the world bottom and the button's bottom edge.
    pub button_bottom_margin: f32,
}

impl Default for ScreenTuning {
    fn default() -> Self {
        Self {
            banner_height: 0.1,
            button_height: 0.1,
            button_bottom_margin: 0.3,
        }
    }
}
