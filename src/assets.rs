use color_eyre::{Result, eyre::eyre};
use ratatui::style::Color;

use crate::config::CELL_ASPECT;

/// Opaque handle to an atlas region. Entities hold these, only the renderer
/// resolves them to glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

/// A region handle together with its aspect ratio, which is all an entity needs
/// to size its body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub region: RegionId,
    pub aspect: f32,
}

/// A named piece of terminal art.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: &'static str,
    pub lines: &'static [&'static str],
    pub color: Color,
}

impl Region {
    pub fn cols(&self) -> u16 {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u16
    }

    pub fn rows(&self) -> u16 {
        self.lines.len() as u16
    }

    /// Visible width over height, corrected for the cell shape.
    pub fn aspect(&self) -> f32 {
        if self.rows() == 0 {
            return 1.0;
        }
        self.cols() as f32 / (self.rows() as f32 * CELL_ASPECT)
    }
}

/// Region lookup by name, modelled after a texture atlas: several regions may
/// share a name, in which case they form an animation.
#[derive(Debug, Clone)]
pub struct Atlas {
    regions: Vec<Region>,
}

impl Atlas {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// The art shipped with the game.
    pub fn builtin() -> Self {
        Self::new(vec![
            region("main_ship", &[" /^\\ ", "<|||>", " ||| "], Color::Green),
            region("enemy0", &["\\|/", "{=}"], Color::Red),
            region("enemy1", &[" <*> ", "<|||>", " <*> "], Color::Magenta),
            region(
                "enemy2",
                &[" [=====] ", "[|#####|]", " |#####| ", " [=====] "],
                Color::Yellow,
            ),
            region("bullet_ship", &["|"], Color::Yellow),
            region("bullet_enemy", &["!"], Color::LightMagenta),
            region("explosion", &["."], Color::Yellow),
            region("explosion", &["*"], Color::Yellow),
            region("explosion", &["\\|/", "-*-", "/|\\"], Color::LightRed),
            region("explosion", &["\\ | /", "- * -", "/ | \\"], Color::Red),
            region("explosion", &[".   .", "  .  ", ".   ."], Color::DarkGray),
            region("star", &["."], Color::DarkGray),
            region(
                "message_game_over",
                &[
                    "╔═══════════════════════════╗",
                    "║        GAME OVER!         ║",
                    "╚═══════════════════════════╝",
                ],
                Color::Red,
            ),
            region(
                "button_new_game",
                &["┌──────────┐", "│ NEW GAME │", "└──────────┘"],
                Color::White,
            ),
        ])
    }

    /// First region with the given name.
    pub fn find_region(&self, name: &str) -> Result<RegionId> {
        self.regions
            .iter()
            .position(|region| region.name == name)
            .map(RegionId)
            .ok_or_else(|| eyre!("atlas has no region named {name:?}"))
    }

    /// All regions with the given name, in atlas order.
    pub fn find_regions(&self, name: &str) -> Result<Vec<RegionId>> {
        let frames: Vec<RegionId> = self
            .regions
            .iter()
            .enumerate()
            .filter(|(_, region)| region.name == name)
            .map(|(idx, _)| RegionId(idx))
            .collect();
        if frames.is_empty() {
            return Err(eyre!("atlas has no regions named {name:?}"));
        }
        Ok(frames)
    }

    pub fn sprite(&self, name: &str) -> Result<Sprite> {
        let region = self.find_region(name)?;
        Ok(Sprite {
            region,
            aspect: self.aspect(region),
        })
    }

    /// Animation frames as sprites.
    pub fn sprites(&self, name: &str) -> Result<Vec<Sprite>> {
        Ok(self
            .find_regions(name)?
            .into_iter()
            .map(|region| Sprite {
                region,
                aspect: self.aspect(region),
            })
            .collect())
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn aspect(&self, id: RegionId) -> f32 {
        self.get(id).map_or(1.0, Region::aspect)
    }
}

impl Default for Atlas {
    fn default() -> Self {
        Self::builtin()
    }
}

fn region(name: &'static str, lines: &'static [&'static str], color: Color) -> Region {
    Region { name, lines, color }
}
