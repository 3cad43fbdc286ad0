//! Brick Dash - A side-scrolling tile platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Draw pass against an abstract 2D surface
//! - `platform`: Frame loop, input actions and key bindings
//! - `settings`: User-facing configuration (bindings, frame cap, seed)
//! - `tuning`: Data-driven game feel

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use platform::{Action, GameLoop};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference frame length (ms); velocities are expressed per 60 Hz frame
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest frame delta fed to the simulation (guards against stalls)
    pub const MAX_FRAME_MS: f32 = 32.0;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 16.0;
    /// Every level is exactly this many rows tall
    pub const LEVEL_ROWS: i32 = 16;
    /// Pixel height of every level
    pub const LEVEL_HEIGHT: f32 = TILE_SIZE * LEVEL_ROWS as f32;

    /// Visible play field
    pub const VIEW_WIDTH: f32 = 256.0;
    pub const VIEW_HEIGHT: f32 = 240.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 16.0;
    pub const SMALL_HEIGHT: f32 = 16.0;
    pub const BIG_HEIGHT: f32 = 32.0;

    /// Player dies once its top edge passes this line (fell into a pit)
    pub const PIT_DEATH_Y: f32 = LEVEL_HEIGHT;
    /// A dead player's corpse must fall past this before the life is counted
    pub const LIFE_LOST_Y: f32 = VIEW_HEIGHT + 50.0;
    /// Knocked-out enemies are discarded below this line
    pub const ENEMY_REMOVE_Y: f32 = 300.0;

    /// Enemy spawn window relative to the camera
    pub const SPAWN_BEHIND: f32 = 50.0;
    pub const SPAWN_AHEAD: f32 = VIEW_WIDTH + 100.0;

    /// Run defaults
    pub const START_LIVES: u8 = 3;
    pub const START_TIME: u32 = 400;
    /// Milliseconds per timer unit
    pub const TIME_UNIT_MS: f32 = 400.0;
    /// A respawn never leaves less than this on the clock
    pub const RESPAWN_TIME_FLOOR: u32 = 200;
    /// Level completion bonus per remaining timer unit
    pub const TIME_BONUS_MULTIPLIER: u64 = 50;
    /// Coins per extra life
    pub const COINS_PER_LIFE: u32 = 100;

    /// Score awards
    pub const SCORE_STOMP: u64 = 100;
    pub const SCORE_SHELL_KICK: u64 = 400;
    pub const SCORE_SHELL_CHAIN: u64 = 500;
    pub const SCORE_FIREBALL: u64 = 200;
    pub const SCORE_BUMP_KILL: u64 = 100;
    pub const SCORE_COIN: u64 = 200;
    pub const SCORE_BRICK: u64 = 50;
    pub const SCORE_POWERUP: u64 = 1000;
    pub const SCORE_CHECKPOINT: u64 = 500;
}

/// Scale factor converting a frame delta (ms) into 60 Hz frame units
#[inline]
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / consts::FRAME_MS
}

/// Pixel coordinate to tile index (floor division, safe for negatives)
#[inline]
pub fn tile_index(px: f32) -> i32 {
    (px / consts::TILE_SIZE).floor() as i32
}
