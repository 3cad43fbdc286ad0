//! Gameplay tuning
//!
//! Keep this separate from runtime configuration (bindings, frame cap).
//! All speeds are pixels per 60 Hz frame; all durations are milliseconds.

use serde::{Deserialize, Serialize};

/// Feel constants for the player character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub gravity: f32,

    pub walk_accel: f32,
    pub walk_decel: f32,
    pub max_walk_speed: f32,

    pub run_accel: f32,
    pub max_run_speed: f32,

    /// Launch velocity (negative = up)
    pub jump_velocity: f32,
    /// Extra upward push per frame while jump is held and rising
    pub jump_boost: f32,
    pub max_fall_speed: f32,

    /// Grace window after walking off a ledge
    pub coyote_ms: f32,
    /// How long an early jump press is remembered
    pub jump_buffer_ms: f32,

    /// Upward velocity after stomping an enemy
    pub stomp_bounce: f32,
    /// Invulnerability after taking a hit
    pub invincible_ms: f32,
    pub throw_cooldown_ms: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            gravity: 0.55,
            walk_accel: 0.16,
            walk_decel: 0.24,
            max_walk_speed: 2.6,
            run_accel: 0.24,
            max_run_speed: 4.4,
            jump_velocity: -8.6,
            jump_boost: -0.12,
            max_fall_speed: 9.0,
            coyote_ms: 100.0,
            jump_buffer_ms: 120.0,
            stomp_bounce: -6.0,
            invincible_ms: 2000.0,
            throw_cooldown_ms: 250.0,
        }
    }
}

/// Thresholds separating a top-down stomp from a side collision.
///
/// Tuned by feel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StompTuning {
    /// Fraction of the enemy height (from its top) that still counts as "above"
    pub upper_fraction: f32,
    /// Minimum horizontal overlap as a fraction of the narrower body
    pub min_overlap_fraction: f32,
}

impl Default for StompTuning {
    fn default() -> Self {
        Self {
            upper_fraction: 0.5,
            min_overlap_fraction: 0.25,
        }
    }
}

/// Enemy patrol and defeat behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Shared by enemies and walking items
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub walker_speed: f32,
    pub shell_walker_speed: f32,
    pub shell_speed: f32,
    /// How long a flattened walker lingers
    pub flatten_ms: f32,
    /// Upward pop when knocked out
    pub knock_velocity: f32,
    /// Contact with a freshly kicked shell is ignored for this long
    pub kick_grace_ms: f32,
    pub mushroom_speed: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            gravity: 0.55,
            max_fall_speed: 9.0,
            walker_speed: 0.8,
            shell_walker_speed: 0.6,
            shell_speed: 5.0,
            flatten_ms: 500.0,
            knock_velocity: -5.0,
            kick_grace_ms: 200.0,
            mushroom_speed: 1.0,
        }
    }
}

/// Fireball behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    /// Initial downward bias
    pub initial_fall: f32,
    pub gravity: f32,
    pub bounce_velocity: f32,
    pub size: f32,
    pub max_live: usize,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 4.0,
            initial_fall: 1.0,
            gravity: 0.35,
            bounce_velocity: -4.0,
            size: 8.0,
            max_live: 2,
        }
    }
}

/// All tuning sections together.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub stomp: StompTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
}
