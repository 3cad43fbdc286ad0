//! Fireballs thrown by the player in fire state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::collision::{sweep_x, sweep_y};
use super::level::TileLevel;
use crate::consts::LEVEL_HEIGHT;
use crate::frame_scale;
use crate::tuning::ProjectileTuning;

/// A bouncing fireball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub body: Aabb,
    /// Pixels per 60 Hz frame
    pub vel: Vec2,
    pub dead: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, facing_right: bool, tuning: &ProjectileTuning) -> Self {
        let dir = if facing_right { 1.0 } else { -1.0 };
        Self {
            id,
            body: Aabb::new(pos, Vec2::splat(tuning.size)),
            vel: Vec2::new(dir * tuning.speed, tuning.initial_fall),
            dead: false,
        }
    }

    /// Advance one tick. Returns true when the fireball should be removed.
    pub fn update(&mut self, level: &TileLevel, dt_ms: f32, tuning: &ProjectileTuning) -> bool {
        if self.dead {
            return true;
        }
        let scale = frame_scale(dt_ms);
        self.vel.y += tuning.gravity * scale;

        if sweep_x(level, &mut self.body, self.vel.x * scale, 0.0).is_some() {
            self.dead = true;
            return true;
        }

        let dy = self.vel.y * scale;
        if sweep_y(level, &mut self.body, dy, 0.0).is_some() {
            if dy > 0.0 {
                self.vel.y = tuning.bounce_velocity;
            } else {
                self.dead = true;
                return true;
            }
        }

        let out_of_bounds = self.body.right() < 0.0
            || self.body.left() > level.width()
            || self.body.top() > LEVEL_HEIGHT
            || self.body.bottom() < 0.0;
        if out_of_bounds {
            self.dead = true;
        }
        self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::TileKind;
    use crate::sim::test_support::{flat_level, level_with};

    const DT: f32 = 1000.0 / 60.0;

    #[test]
    fn test_bounces_along_floor() {
        let level = flat_level(100);
        let t = ProjectileTuning::default();
        let mut p = Projectile::new(1, Vec2::new(32.0, 200.0), true, &t);
        let mut bounces = 0;
        let mut prev_vy = p.vel.y;
        for _ in 0..120 {
            assert!(!p.update(&level, DT, &t));
            if prev_vy > 0.0 && p.vel.y == t.bounce_velocity {
                bounces += 1;
            }
            prev_vy = p.vel.y;
            assert!(p.body.bottom() <= 224.0);
        }
        assert!(bounces >= 2, "only {bounces} bounces");
        assert!(p.body.left() > 32.0);
    }

    #[test]
    fn test_wall_destroys() {
        let level = level_with(20, &[(6, 13, TileKind::Hard), (6, 12, TileKind::Hard)]);
        let t = ProjectileTuning::default();
        let mut p = Projectile::new(1, Vec2::new(64.0, 200.0), true, &t);
        let removed = (0..30).any(|_| p.update(&level, DT, &t));
        assert!(removed);
        assert!(p.dead);
        assert!(p.body.right() <= 96.0);
    }

    #[test]
    fn test_ceiling_destroys() {
        let level = level_with(20, &[(2, 10, TileKind::Brick)]);
        let t = ProjectileTuning::default();
        let mut p = Projectile::new(1, Vec2::new(36.0, 178.0), true, &t);
        p.vel = Vec2::new(0.0, -6.0);
        assert!(p.update(&level, DT, &t));
    }

    #[test]
    fn test_leaving_level_removes() {
        let level = flat_level(4);
        let t = ProjectileTuning::default();
        let mut p = Projectile::new(1, Vec2::new(8.0, 200.0), false, &t);
        let removed = (0..30).any(|_| p.update(&level, DT, &t));
        assert!(removed);

        // Falling through a pit
        let pit = level_with(20, &[(2, 14, TileKind::Empty), (2, 15, TileKind::Empty)]);
        let mut p = Projectile::new(2, Vec2::new(36.0, 200.0), true, &t);
        p.vel.x = 0.0;
        let removed = (0..120).any(|_| p.update(&pit, DT, &t));
        assert!(removed);
    }
}
