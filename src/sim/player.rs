//! The player character
//!
//! Run and jump physics with coyote time, jump buffering and variable
//! jump height, plus the small/big/fire size ladder and fireball throwing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::collision::{TileHit, sweep_x, sweep_y};
use super::level::TileLevel;
use super::projectile::Projectile;
use super::tick::TickInput;
use crate::consts::*;
use crate::frame_scale;
use crate::tuning::{PlayerTuning, ProjectileTuning};

/// Edge samples ignore this many pixels at each end of the leading edge
const EDGE_MARGIN: f32 = 2.0;
/// Walk animation advances one frame per this many pixels travelled
const WALK_FRAME_PX: f32 = 6.0;
const WALK_FRAMES: u32 = 3;

/// Power-up ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeState {
    #[default]
    Small,
    Big,
    /// Big, and can throw fireballs
    Fire,
}

impl SizeState {
    pub fn height(self) -> f32 {
        match self {
            SizeState::Small => SMALL_HEIGHT,
            SizeState::Big | SizeState::Fire => BIG_HEIGHT,
        }
    }
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Aabb,
    /// Pixels per 60 Hz frame
    pub vel: Vec2,
    /// Bottom edge before this tick's movement (stomp detection)
    pub prev_bottom: f32,
    pub size: SizeState,
    pub on_ground: bool,
    pub facing_right: bool,
    /// Ascending from a jump that can still be cut short
    pub jumping: bool,
    pub crouching: bool,
    pub dead: bool,
    pub invincible: bool,
    pub invincible_ms: f32,
    pub coyote_ms: f32,
    pub jump_buffer_ms: f32,
    pub throw_cooldown_ms: f32,
    /// Jump key state on the previous tick (edge detection)
    pub prev_jump_held: bool,
    /// Tile struck by the head this tick
    pub block_hit: Option<TileHit>,
    /// A jump started this tick
    pub jumped: bool,
    /// Distance walked on the ground, drives the walk cycle
    pub walk_distance: f32,
}

impl Player {
    /// A fresh small player standing at `pos`
    pub fn new(pos: Vec2) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, SMALL_HEIGHT);
        Self {
            body: Aabb::new(pos, size),
            vel: Vec2::ZERO,
            prev_bottom: pos.y + size.y,
            size: SizeState::Small,
            on_ground: false,
            facing_right: true,
            jumping: false,
            crouching: false,
            dead: false,
            invincible: false,
            invincible_ms: 0.0,
            coyote_ms: 0.0,
            jump_buffer_ms: 0.0,
            throw_cooldown_ms: 0.0,
            prev_jump_held: false,
            block_hit: None,
            jumped: false,
            walk_distance: 0.0,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Current walk animation frame (0 when standing or airborne)
    pub fn walk_frame(&self) -> u32 {
        if !self.on_ground || self.vel.x == 0.0 {
            return 0;
        }
        (self.walk_distance / WALK_FRAME_PX) as u32 % WALK_FRAMES
    }

    /// Advance one tick
    pub fn update(&mut self, input: &TickInput, level: &TileLevel, dt_ms: f32, tuning: &PlayerTuning) {
        let scale = frame_scale(dt_ms);
        self.block_hit = None;
        self.jumped = false;
        self.prev_bottom = self.body.bottom();

        if self.dead {
            self.vel.y += tuning.gravity * scale;
            self.body.pos.y += self.vel.y * scale;
            return;
        }

        if self.invincible {
            self.invincible_ms -= dt_ms;
            if self.invincible_ms <= 0.0 {
                self.invincible_ms = 0.0;
                self.invincible = false;
            }
        }
        self.throw_cooldown_ms = (self.throw_cooldown_ms - dt_ms).max(0.0);

        self.crouching = input.crouch && self.on_ground;
        self.apply_horizontal(input, scale, tuning);
        self.apply_jump(input, dt_ms, scale, tuning);

        self.vel.y = (self.vel.y + tuning.gravity * scale).min(tuning.max_fall_speed);

        let x_before = self.body.pos.x;
        self.move_x(level, self.vel.x * scale);
        self.move_y(level, self.vel.y * scale);
        if self.on_ground {
            self.walk_distance += (self.body.pos.x - x_before).abs();
        }

        if self.body.pos.x < 0.0 {
            self.body.pos.x = 0.0;
            self.vel.x = 0.0;
        }
        self.body.pos.y = self.body.pos.y.max(0.0);

        if self.body.pos.y > PIT_DEATH_Y {
            self.die(tuning);
        }
    }

    fn apply_horizontal(&mut self, input: &TickInput, scale: f32, tuning: &PlayerTuning) {
        let (accel, cap) = if input.run {
            (tuning.run_accel, tuning.max_run_speed)
        } else {
            (tuning.walk_accel, tuning.max_walk_speed)
        };
        let dir = if self.crouching { 0.0 } else { input.direction() };

        if dir != 0.0 {
            self.facing_right = dir > 0.0;
            let rate = if self.vel.x * dir < 0.0 {
                accel.max(tuning.walk_decel)
            } else {
                accel
            };
            self.vel.x += dir * rate * scale;
        } else {
            let step = tuning.walk_decel * scale;
            if self.vel.x.abs() <= step {
                self.vel.x = 0.0;
            } else {
                self.vel.x -= step * self.vel.x.signum();
            }
        }
        self.vel.x = self.vel.x.clamp(-cap, cap);
    }

    fn apply_jump(&mut self, input: &TickInput, dt_ms: f32, scale: f32, tuning: &PlayerTuning) {
        if self.on_ground {
            self.coyote_ms = tuning.coyote_ms;
        } else {
            self.coyote_ms = (self.coyote_ms - dt_ms).max(0.0);
        }

        self.jump_buffer_ms = (self.jump_buffer_ms - dt_ms).max(0.0);
        if input.jump && !self.prev_jump_held {
            self.jump_buffer_ms = tuning.jump_buffer_ms;
        }
        self.prev_jump_held = input.jump;

        if self.jump_buffer_ms > 0.0 && (self.on_ground || self.coyote_ms > 0.0) {
            self.vel.y = tuning.jump_velocity;
            self.on_ground = false;
            self.jumping = true;
            self.jumped = true;
            self.coyote_ms = 0.0;
            self.jump_buffer_ms = 0.0;
        }

        if self.jumping && self.vel.y < 0.0 {
            if input.jump {
                self.vel.y += tuning.jump_boost * scale;
            } else {
                // Early release cuts the rise short, once
                self.vel.y *= 0.5;
                self.jumping = false;
            }
        }
    }

    /// Horizontal move with wall collision
    pub fn move_x(&mut self, level: &TileLevel, dx: f32) {
        if sweep_x(level, &mut self.body, dx, EDGE_MARGIN).is_some() {
            self.vel.x = 0.0;
        }
    }

    /// Vertical move with floor and ceiling collision
    pub fn move_y(&mut self, level: &TileLevel, dy: f32) {
        if dy == 0.0 {
            return;
        }
        self.on_ground = false;
        match sweep_y(level, &mut self.body, dy, EDGE_MARGIN) {
            Some(_) if dy > 0.0 => {
                self.vel.y = 0.0;
                self.on_ground = true;
                self.jumping = false;
            }
            Some(hit) => {
                self.vel.y = 0.0;
                self.block_hit = Some(hit);
            }
            None => {}
        }
    }

    fn set_height(&mut self, height: f32) {
        // Keep the feet where they are
        self.body.pos.y += self.body.size.y - height;
        self.body.size.y = height;
    }

    /// Step up the power-up ladder
    pub fn grow(&mut self) {
        match self.size {
            SizeState::Small => {
                self.size = SizeState::Big;
                self.set_height(BIG_HEIGHT);
            }
            SizeState::Big => self.size = SizeState::Fire,
            SizeState::Fire => {}
        }
    }

    /// Take a hit: step down the ladder, or die when already small
    pub fn shrink(&mut self, tuning: &PlayerTuning) {
        match self.size {
            SizeState::Fire => {
                self.size = SizeState::Big;
                self.start_invincibility(tuning);
            }
            SizeState::Big => {
                self.size = SizeState::Small;
                self.set_height(SMALL_HEIGHT);
                self.start_invincibility(tuning);
            }
            SizeState::Small if !self.invincible => self.die(tuning),
            SizeState::Small => {}
        }
    }

    fn start_invincibility(&mut self, tuning: &PlayerTuning) {
        self.invincible = true;
        self.invincible_ms = tuning.invincible_ms;
    }

    /// Start the death hop; repeated calls do nothing
    pub fn die(&mut self, tuning: &PlayerTuning) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.on_ground = false;
        self.jumping = false;
        self.vel = Vec2::new(0.0, tuning.jump_velocity);
    }

    /// Rebound off a stomped enemy
    pub fn bounce(&mut self, vy: f32) {
        self.vel.y = vy;
        self.on_ground = false;
        self.jumping = false;
    }

    /// Throw a fireball if in fire state and off cooldown
    pub fn throw_projectile(
        &mut self,
        id: u32,
        cooldown_ms: f32,
        tuning: &ProjectileTuning,
    ) -> Option<Projectile> {
        if self.dead || self.size != SizeState::Fire || self.throw_cooldown_ms > 0.0 {
            return None;
        }
        self.throw_cooldown_ms = cooldown_ms;

        let x = if self.facing_right {
            self.body.right()
        } else {
            self.body.left() - tuning.size
        };
        let y = self.body.top() + tuning.size * 0.5;
        Some(Projectile::new(id, Vec2::new(x, y), self.facing_right, tuning))
    }
}
