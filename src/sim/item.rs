//! Power-ups released from question blocks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::collision::{sweep_x, sweep_y};
use super::level::{ItemKind, TileLevel};
use crate::consts::*;
use crate::frame_scale;
use crate::tuning::EnemyTuning;

/// Time to emerge fully from the block
pub const RISE_MS: f32 = 500.0;
const EDGE_MARGIN: f32 = 2.0;

/// A mushroom or fire flower on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub body: Aabb,
    pub vel: Vec2,
    /// Time spent emerging; collectable once this reaches `RISE_MS`
    pub rise_ms: f32,
    /// Top of the block it emerges from
    block_top: f32,
}

impl Item {
    /// Start emerging from the block at a grid position
    pub fn emerge(id: u32, kind: ItemKind, column: i32, row: i32) -> Self {
        let block_top = row as f32 * TILE_SIZE;
        Self {
            id,
            kind,
            body: Aabb::new(
                Vec2::new(column as f32 * TILE_SIZE, block_top),
                Vec2::splat(TILE_SIZE),
            ),
            vel: Vec2::ZERO,
            rise_ms: 0.0,
            block_top,
        }
    }

    pub fn collectable(&self) -> bool {
        self.rise_ms >= RISE_MS
    }

    /// Advance one tick. Returns true when the item should be removed.
    pub fn update(&mut self, level: &TileLevel, dt_ms: f32, tuning: &EnemyTuning) -> bool {
        if !self.collectable() {
            self.rise_ms = (self.rise_ms + dt_ms).min(RISE_MS);
            let progress = self.rise_ms / RISE_MS;
            self.body.pos.y = self.block_top - TILE_SIZE * progress;
            if self.collectable() && self.kind == ItemKind::Mushroom {
                self.vel.x = tuning.mushroom_speed;
            }
            return false;
        }

        if self.kind != ItemKind::Mushroom {
            return false;
        }

        let scale = frame_scale(dt_ms);
        self.vel.y = (self.vel.y + tuning.gravity * scale).min(tuning.max_fall_speed);
        if sweep_x(level, &mut self.body, self.vel.x * scale, EDGE_MARGIN).is_some() {
            self.vel.x = -self.vel.x;
        }
        if sweep_y(level, &mut self.body, self.vel.y * scale, EDGE_MARGIN).is_some() {
            self.vel.y = 0.0;
        }
        self.body.bottom() >= LEVEL_HEIGHT
    }
}
