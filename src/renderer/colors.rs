//! Colors for game elements (linear RGBA)

use crate::sim::level::Theme;

pub type Color = [f32; 4];

pub const SKY: Color = [0.36, 0.58, 0.99, 1.0];
pub const CAVE: Color = [0.0, 0.0, 0.0, 1.0];
pub const DUSK: Color = [0.55, 0.75, 1.0, 1.0];

pub const GROUND: Color = [0.89, 0.65, 0.45, 1.0];
pub const BRICK: Color = [0.69, 0.20, 0.15, 1.0];
pub const QUESTION: Color = [0.97, 0.60, 0.0, 1.0];
pub const QUESTION_SPENT: Color = [0.55, 0.35, 0.20, 1.0];
pub const HARD: Color = [0.60, 0.40, 0.25, 1.0];
pub const PIPE: Color = [0.0, 0.66, 0.0, 1.0];
pub const POLE: Color = [0.50, 0.80, 0.50, 1.0];

pub const PLAYER: Color = [0.70, 0.20, 0.15, 1.0];
pub const PLAYER_FIRE: Color = [1.0, 0.95, 0.90, 1.0];
pub const WALKER: Color = [0.67, 0.32, 0.21, 1.0];
pub const SHELL_WALKER: Color = [0.20, 0.75, 0.10, 1.0];
pub const MUSHROOM: Color = [0.90, 0.10, 0.10, 1.0];
pub const FLOWER: Color = [1.0, 0.45, 0.10, 1.0];
pub const FIREBALL: Color = [1.0, 0.60, 0.10, 1.0];
pub const COIN: Color = [0.97, 0.85, 0.0, 1.0];

pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
/// Dims the scene behind menus
pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.7];

/// Clear color for a level theme
pub fn background(theme: Theme) -> Color {
    match theme {
        Theme::Overworld => SKY,
        Theme::Underground => CAVE,
        Theme::Athletic => DUSK,
    }
}
