//! Game state and core simulation types
//!
//! Everything the simulation reads or writes between ticks lives here.
//! Visual effects ride along but never feed back into gameplay.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::item::Item;
use super::level::TileLevel;
use super::levels;
use super::player::Player;
use super::projectile::Projectile;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for confirm
    #[default]
    Title,
    /// Active gameplay
    Playing,
    /// Frozen until pause is pressed again
    Paused,
    /// Finish line crossed, waiting for confirm
    LevelComplete,
    /// Out of lives, waiting for confirm
    GameOver,
}

/// Something that happened this tick (consumed by sound and UI layers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Coin,
    Bump,
    BreakBlock,
    Stomp,
    Kick,
    PowerUpAppears,
    PowerUp,
    PowerDown,
    Fireball,
    Die,
    LifeLost,
    OneUp,
    GameOver,
    Checkpoint,
    LevelComplete,
    Start,
    Paused,
    Resumed,
}

/// Particle flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    CoinPop,
    BrickDebris,
}

/// A short-lived visual particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime
    pub life_ms: f32,
}

/// Points label drifting up from where they were earned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingScore {
    pub pos: Vec2,
    pub value: u64,
    pub life_ms: f32,
}

/// A block nudged upward by a head hit
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BumpingBlock {
    pub column: i32,
    pub row: i32,
    pub timer_ms: f32,
}

impl BumpingBlock {
    /// Vertical pixel offset for drawing
    pub fn offset(&self) -> f32 {
        let t = (self.timer_ms / BUMP_MS).clamp(0.0, 1.0);
        -BUMP_HEIGHT * (t * std::f32::consts::PI).sin()
    }
}

pub const COIN_POP_MS: f32 = 400.0;
pub const DEBRIS_MS: f32 = 800.0;
pub const FLOATING_SCORE_MS: f32 = 800.0;
pub const BUMP_MS: f32 = 150.0;
const BUMP_HEIGHT: f32 = 4.0;
/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Checkpoint progress within the current level
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    pub reached: bool,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

/// Heads-up display snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: u64,
    pub coins: u32,
    pub lives: u8,
    pub time: u32,
    pub level_name: String,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// A fresh generator; every call advances to the next stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream = self.stream.wrapping_add(1);
        rng
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub phase: GamePhase,
    pub tuning: Tuning,
    /// Index into the built-in level list
    pub level_index: usize,
    pub level: TileLevel,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Which enemy spawn table entries have been used this attempt
    pub spawned: Vec<bool>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip)]
    pub floating_scores: Vec<FloatingScore>,
    #[serde(skip)]
    pub bumping_blocks: Vec<BumpingBlock>,
    pub score: u64,
    pub coins: u32,
    pub lives: u8,
    /// Level timer in units
    pub time: u32,
    /// Milliseconds accumulated toward the next timer unit
    pub time_accum_ms: f32,
    /// Left edge of the view
    pub camera_x: f32,
    pub checkpoint: Checkpoint,
    /// Controls overlay visible
    pub show_controls: bool,
    /// Events raised during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Throw key state on the previous tick
    pub prev_throw_held: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let level = levels::load(0);
        let player = Player::new(level.player_start());
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            phase: GamePhase::Title,
            tuning,
            level_index: 0,
            level,
            player,
            enemies: Vec::new(),
            spawned: Vec::new(),
            projectiles: Vec::new(),
            items: Vec::new(),
            particles: Vec::new(),
            floating_scores: Vec::new(),
            bumping_blocks: Vec::new(),
            score: 0,
            coins: 0,
            lives: START_LIVES,
            time: START_TIME,
            time_accum_ms: 0.0,
            camera_x: 0.0,
            checkpoint: Checkpoint::default(),
            show_controls: false,
            events: Vec::new(),
            time_ticks: 0,
            prev_throw_held: false,
            next_id: 1,
        };
        state.load_level(0);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a level from its beginning. Out-of-range indices are clamped.
    pub fn load_level(&mut self, index: usize) {
        self.level_index = levels::clamp_index(index);
        self.time = START_TIME;
        self.time_accum_ms = 0.0;
        self.checkpoint = Checkpoint::default();
        self.reset_attempt();
        log::info!(
            "Loaded level {} ({} columns)",
            self.level.meta.name,
            self.level.columns()
        );
    }

    /// Restart the current level after losing a life, from the checkpoint
    /// if one was reached. Score and coins carry over.
    pub fn respawn(&mut self) {
        self.time = self.time.max(RESPAWN_TIME_FLOOR);
        self.time_accum_ms = 0.0;
        self.reset_attempt();
        log::debug!(
            "Respawned at ({}, {}), checkpoint reached: {}",
            self.player.body.pos.x,
            self.player.body.pos.y,
            self.checkpoint.reached
        );
    }

    /// Back to the title with a fresh run
    pub fn full_reset(&mut self) {
        self.score = 0;
        self.coins = 0;
        self.lives = START_LIVES;
        self.load_level(0);
        self.phase = GamePhase::Title;
    }

    /// Fresh tiles, player, enemies and camera for the current level
    fn reset_attempt(&mut self) {
        self.level = levels::load(self.level_index);
        let start = if self.checkpoint.reached {
            Vec2::new(self.checkpoint.spawn_x, self.checkpoint.spawn_y)
        } else {
            self.level.player_start()
        };
        self.player = Player::new(start);
        self.enemies.clear();
        self.projectiles.clear();
        self.items.clear();
        self.particles.clear();
        self.floating_scores.clear();
        self.bumping_blocks.clear();
        self.spawned = vec![false; self.level.meta.enemy_spawns.len()];
        self.prev_throw_held = false;
        self.camera_x = self.camera_target(start.x);
        self.spawn_enemies_in_window();
    }

    /// Camera offset that keeps `player_x` a third of the way into the view
    pub fn camera_target(&self, player_x: f32) -> f32 {
        (player_x - VIEW_WIDTH / 3.0).clamp(0.0, self.level.max_camera_x())
    }

    /// Spawn every unused table entry whose x lies inside the window
    /// around the camera
    pub fn spawn_enemies_in_window(&mut self) {
        let min_x = self.camera_x - SPAWN_BEHIND;
        let max_x = self.camera_x + SPAWN_AHEAD;
        for index in 0..self.level.meta.enemy_spawns.len() {
            let spawn = self.level.meta.enemy_spawns[index];
            let used = self.spawned.get(index).copied().unwrap_or(true);
            if used || spawn.pos.x <= min_x || spawn.pos.x >= max_x {
                continue;
            }
            if let Some(flag) = self.spawned.get_mut(index) {
                *flag = true;
            }
            let id = self.next_entity_id();
            self.enemies
                .push(Enemy::new(id, spawn.kind, spawn.pos, &self.tuning.enemy));
            log::debug!("Spawned {:?} #{} at x={}", spawn.kind, id, spawn.pos.x);
        }
    }

    /// Add points and show them where they were earned
    pub fn award(&mut self, points: u64, at: Vec2) {
        self.score += points;
        self.floating_scores.push(FloatingScore {
            pos: at,
            value: points,
            life_ms: FLOATING_SCORE_MS,
        });
    }

    /// Count a coin; every hundredth grants a life
    pub fn collect_coin(&mut self) {
        self.coins += 1;
        if self.coins % COINS_PER_LIFE == 0 {
            self.lives = self.lives.saturating_add(1);
            self.events.push(GameEvent::OneUp);
        }
    }

    pub fn spawn_coin_pop(&mut self, column: i32, row: i32) {
        self.push_particle(Particle {
            kind: ParticleKind::CoinPop,
            pos: Vec2::new(column as f32 * TILE_SIZE + 4.0, (row - 1) as f32 * TILE_SIZE),
            vel: Vec2::new(0.0, -8.0),
            life_ms: COIN_POP_MS,
        });
    }

    /// Four fragments flying out of a broken brick
    pub fn spawn_debris(&mut self, column: i32, row: i32) {
        let mut rng = self.rng_state.next_rng();
        let center = Vec2::new(
            (column as f32 + 0.5) * TILE_SIZE,
            (row as f32 + 0.5) * TILE_SIZE,
        );
        for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 0.0), (1.0, 0.0)] {
            let vel = Vec2::new(
                sx * rng.random_range(1.0..2.5),
                rng.random_range(-7.0..-4.0) + sy * -2.0,
            );
            self.push_particle(Particle {
                kind: ParticleKind::BrickDebris,
                pos: center,
                vel,
                life_ms: DEBRIS_MS,
            });
        }
    }

    fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        }
    }

    pub fn start_bump(&mut self, column: i32, row: i32) {
        self.bumping_blocks.push(BumpingBlock {
            column,
            row,
            timer_ms: 0.0,
        });
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            coins: self.coins,
            lives: self.lives,
            time: self.time,
            level_name: self.level.meta.name.clone(),
        }
    }
}
