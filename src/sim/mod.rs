//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta in, state out; no clocks
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod enemy;
pub mod item;
pub mod level;
pub mod levels;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod test_support;

pub use body::Aabb;
pub use collision::{TileHit, is_stomp, sweep_x, sweep_y};
pub use enemy::{Enemy, EnemyKind, EnemyState};
pub use item::Item;
pub use level::{ItemKind, LevelMeta, Theme, TileKind, TileLevel};
pub use player::{Player, SizeState};
pub use projectile::Projectile;
pub use state::{Checkpoint, GameEvent, GamePhase, GameState, Hud};
pub use tick::{TickInput, tick};
