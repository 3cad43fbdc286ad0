//! Enemies: patrolling walkers and shell-capturable walkers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::collision::{sweep_x, sweep_y};
use super::level::TileLevel;
use crate::consts::*;
use crate::frame_scale;
use crate::tuning::EnemyTuning;

const EDGE_MARGIN: f32 = 2.0;
const ENEMY_WIDTH: f32 = 16.0;
const SHELL_HEIGHT: f32 = 16.0;
const FLAT_HEIGHT: f32 = 8.0;
const WALK_FRAME_MS: f32 = 150.0;
const SHELL_FRAME_MS: f32 = 50.0;

/// Enemy species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Flattened by a stomp
    #[default]
    Walker,
    /// Retreats into a kickable shell when stomped
    ShellWalker,
}

impl EnemyKind {
    /// Body height while walking
    pub fn walking_height(self) -> f32 {
        match self {
            EnemyKind::Walker => 16.0,
            EnemyKind::ShellWalker => 24.0,
        }
    }

    pub fn walk_speed(self, tuning: &EnemyTuning) -> f32 {
        match self {
            EnemyKind::Walker => tuning.walker_speed,
            EnemyKind::ShellWalker => tuning.shell_walker_speed,
        }
    }
}

/// Behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
    Walking,
    /// Squashed; lingers briefly before removal
    Flattened { timer_ms: f32 },
    Shell { moving: bool },
    /// Knocked out; falls off screen ignoring the level
    Knocked,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub body: Aabb,
    /// Pixels per 60 Hz frame
    pub vel: Vec2,
    /// Player contact is ignored while this is positive
    pub contact_grace_ms: f32,
    pub anim_ms: f32,
}

impl Enemy {
    /// New enemy at `pos` (top-left), walking left
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            kind,
            state: EnemyState::Walking,
            body: Aabb::new(pos, Vec2::new(ENEMY_WIDTH, kind.walking_height())),
            vel: Vec2::new(-kind.walk_speed(tuning), 0.0),
            contact_grace_ms: 0.0,
            anim_ms: 0.0,
        }
    }

    /// Flattened or knocked out
    pub fn dead(&self) -> bool {
        matches!(
            self.state,
            EnemyState::Flattened { .. } | EnemyState::Knocked
        )
    }

    pub fn is_walking(&self) -> bool {
        self.state == EnemyState::Walking
    }

    pub fn is_moving_shell(&self) -> bool {
        self.state == EnemyState::Shell { moving: true }
    }

    pub fn is_stationary_shell(&self) -> bool {
        self.state == EnemyState::Shell { moving: false }
    }

    /// Two-frame walk cycle (shells spin faster)
    pub fn anim_frame(&self) -> u32 {
        let period = if self.is_moving_shell() {
            SHELL_FRAME_MS
        } else {
            WALK_FRAME_MS
        };
        (self.anim_ms / period) as u32 % 2
    }

    /// Advance one tick. Returns true when the enemy should be removed.
    pub fn update(&mut self, level: &TileLevel, dt_ms: f32, tuning: &EnemyTuning) -> bool {
        let scale = frame_scale(dt_ms);
        self.contact_grace_ms = (self.contact_grace_ms - dt_ms).max(0.0);

        match self.state {
            EnemyState::Knocked => {
                self.vel.y += tuning.gravity * scale;
                self.body.pos += self.vel * scale;
                return self.body.top() > ENEMY_REMOVE_Y;
            }
            EnemyState::Flattened { timer_ms } => {
                let timer_ms = timer_ms + dt_ms;
                self.state = EnemyState::Flattened { timer_ms };
                return timer_ms >= tuning.flatten_ms;
            }
            EnemyState::Walking | EnemyState::Shell { .. } => {}
        }

        self.vel.y = (self.vel.y + tuning.gravity * scale).min(tuning.max_fall_speed);

        if sweep_x(level, &mut self.body, self.vel.x * scale, EDGE_MARGIN).is_some() {
            self.vel.x = -self.vel.x;
        }
        let dy = self.vel.y * scale;
        if sweep_y(level, &mut self.body, dy, EDGE_MARGIN).is_some() {
            self.vel.y = 0.0;
        }

        if self.vel.x != 0.0 {
            self.anim_ms += dt_ms;
        }

        // Fell into a pit
        self.body.bottom() >= LEVEL_HEIGHT
    }

    fn set_height(&mut self, height: f32) {
        self.body.pos.y += self.body.size.y - height;
        self.body.size.y = height;
    }

    /// Landed on from above by something at `actor_x`
    pub fn stomp(&mut self, actor_x: f32, tuning: &EnemyTuning) {
        match (self.kind, self.state) {
            (EnemyKind::Walker, EnemyState::Walking) => {
                self.state = EnemyState::Flattened { timer_ms: 0.0 };
                self.set_height(FLAT_HEIGHT);
                self.vel = Vec2::ZERO;
            }
            (EnemyKind::ShellWalker, EnemyState::Walking) => {
                self.state = EnemyState::Shell { moving: false };
                self.set_height(SHELL_HEIGHT);
                self.vel = Vec2::ZERO;
                self.contact_grace_ms = tuning.kick_grace_ms;
            }
            (_, EnemyState::Shell { moving: false }) => {
                self.state = EnemyState::Shell { moving: true };
                let away = if self.body.pos.x > actor_x { 1.0 } else { -1.0 };
                self.vel.x = away * tuning.shell_speed;
                self.contact_grace_ms = tuning.kick_grace_ms;
            }
            (_, EnemyState::Shell { moving: true }) => {
                self.state = EnemyState::Shell { moving: false };
                self.vel.x = 0.0;
                self.contact_grace_ms = tuning.kick_grace_ms;
            }
            _ => {}
        }
    }

    /// Knock out. Returns false if already defeated.
    pub fn kick(&mut self, tuning: &EnemyTuning) -> bool {
        if self.dead() {
            return false;
        }
        self.state = EnemyState::Knocked;
        self.vel = Vec2::new(0.0, tuning.knock_velocity);
        true
    }

    /// Turn to walk away from something at `other_x`
    pub fn turn_away_from(&mut self, other_x: f32) {
        let speed = self.vel.x.abs();
        self.vel.x = if self.body.pos.x < other_x { -speed } else { speed };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::TileKind;
    use crate::sim::test_support::{flat_level, level_with};

    const DT: f32 = 1000.0 / 60.0;

    fn walker_at(x: f32) -> Enemy {
        Enemy::new(1, EnemyKind::Walker, Vec2::new(x, 208.0), &EnemyTuning::default())
    }

    fn shell_walker_at(x: f32) -> Enemy {
        Enemy::new(2, EnemyKind::ShellWalker, Vec2::new(x, 200.0), &EnemyTuning::default())
    }

    #[test]
    fn test_walker_patrols_and_turns_at_wall() {
        let level = level_with(20, &[(3, 13, TileKind::Hard)]);
        let t = EnemyTuning::default();
        let mut e = walker_at(80.0);
        assert!(e.vel.x < 0.0);
        for _ in 0..60 {
            assert!(!e.update(&level, DT, &t));
        }
        assert!(e.vel.x > 0.0, "should have turned at the wall");
        assert!(e.body.left() >= 64.0);
        assert_eq!(e.body.bottom(), 224.0);
    }

    #[test]
    fn test_walker_removed_in_pit() {
        let level = level_with(20, &[(4, 14, TileKind::Empty), (4, 15, TileKind::Empty)]);
        let t = EnemyTuning::default();
        let mut e = walker_at(64.0);
        let removed = (0..120).any(|_| e.update(&level, DT, &t));
        assert!(removed);
    }

    #[test]
    fn test_stomp_flattens_walker() {
        let level = flat_level(20);
        let t = EnemyTuning::default();
        let mut e = walker_at(64.0);
        e.update(&level, DT, &t);
        let feet = e.body.bottom();

        e.stomp(60.0, &t);
        assert!(e.dead());
        assert_eq!(e.body.size.y, 8.0);
        assert_eq!(e.body.bottom(), feet);

        let ticks = (t.flatten_ms / DT).ceil() as usize;
        let removed_at = (1..=ticks + 1).find(|_| e.update(&level, DT, &t));
        assert!(removed_at.is_some_and(|n| n >= ticks - 1));
    }

    #[test]
    fn test_shell_state_machine() {
        let level = flat_level(40);
        let t = EnemyTuning::default();
        let mut e = shell_walker_at(160.0);
        e.update(&level, DT, &t);
        assert_eq!(e.body.bottom(), 224.0);

        e.stomp(150.0, &t);
        assert!(e.is_stationary_shell());
        assert!(!e.dead());
        assert_eq!(e.body.size.y, 16.0);
        assert_eq!(e.body.bottom(), 224.0);
        assert_eq!(e.vel.x, 0.0);

        // Actor on the left kicks it right
        e.stomp(140.0, &t);
        assert!(e.is_moving_shell());
        assert_eq!(e.vel.x, t.shell_speed);
        assert!(e.contact_grace_ms > 0.0);

        e.stomp(170.0, &t);
        assert!(e.is_stationary_shell());
        assert_eq!(e.vel.x, 0.0);

        // Actor on the right kicks it left
        e.stomp(200.0, &t);
        assert_eq!(e.vel.x, -t.shell_speed);
    }

    #[test]
    fn test_moving_shell_bounces_off_walls() {
        let level = level_with(20, &[(2, 13, TileKind::Hard)]);
        let t = EnemyTuning::default();
        let mut e = shell_walker_at(80.0);
        e.update(&level, DT, &t);
        e.stomp(100.0, &t);
        e.stomp(100.0, &t);
        assert!(e.vel.x < 0.0);
        for _ in 0..30 {
            e.update(&level, DT, &t);
        }
        assert!(e.vel.x > 0.0);
        assert!(e.is_moving_shell());
    }

    #[test]
    fn test_kick_is_idempotent() {
        let level = flat_level(20);
        let t = EnemyTuning::default();
        let mut e = walker_at(64.0);
        assert!(e.kick(&t));
        assert!(!e.kick(&t));
        assert_eq!(e.state, EnemyState::Knocked);

        // Falls through the floor and is discarded below the screen
        let removed = (0..200).any(|_| e.update(&level, DT, &t));
        assert!(removed);
        assert!(e.body.top() > ENEMY_REMOVE_Y);
    }

    #[test]
    fn test_flattened_cannot_be_kicked() {
        let t = EnemyTuning::default();
        let mut e = walker_at(64.0);
        e.stomp(0.0, &t);
        assert!(!e.kick(&t));
    }

    #[test]
    fn test_turn_away_from() {
        let mut e = walker_at(64.0);
        e.turn_away_from(80.0);
        assert!(e.vel.x < 0.0);
        e.turn_away_from(40.0);
        assert!(e.vel.x > 0.0);
    }
}
