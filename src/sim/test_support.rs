//! Level fixtures shared by the simulation tests.

use super::level::{LevelMeta, Theme, TileKind, TileLevel};
use crate::consts::LEVEL_ROWS;

/// Meta block with no spawns or contents
pub fn empty_meta() -> LevelMeta {
    LevelMeta {
        name: "test".into(),
        theme: Theme::Overworld,
        spawn_column: 2,
        checkpoint_column: 20,
        finish_column: 40,
        enemy_spawns: Vec::new(),
        block_contents: Vec::new(),
    }
}

/// `columns` wide, solid ground on rows 14-15, nothing else
pub fn flat_level(columns: usize) -> TileLevel {
    let mut tiles = vec![vec![TileKind::Empty; columns]; LEVEL_ROWS as usize];
    for row in tiles.iter_mut().skip(14) {
        row.fill(TileKind::Ground);
    }
    TileLevel::new(tiles, empty_meta())
}

/// Flat level plus extra tiles at the given grid positions
pub fn level_with(columns: usize, extra: &[(i32, i32, TileKind)]) -> TileLevel {
    let mut level = flat_level(columns);
    for &(column, row, kind) in extra {
        level.set_tile_grid(column, row, kind);
    }
    level
}
