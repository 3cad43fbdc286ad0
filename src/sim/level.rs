//! Tile grid and per-level metadata
//!
//! A level is a fixed 16-row grid of tiles plus the tables the orchestrator
//! needs: spawn column, checkpoint, finish line, enemy spawns and the
//! contents of question blocks. Every query is bounds-checked; anything
//! outside the grid reads as empty space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use crate::consts::*;
use crate::tile_index;

/// What occupies one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Ground,
    Brick,
    /// Interactive block, not yet hit
    Question,
    /// Interactive block after its content was released
    QuestionSpent,
    Hard,
    PipeTopLeft,
    PipeTopRight,
    PipeLeft,
    PipeRight,
    Pole,
    PoleTop,
}

impl TileKind {
    /// Whether bodies collide with this tile
    pub fn is_solid(self) -> bool {
        !matches!(self, TileKind::Empty | TileKind::Pole | TileKind::PoleTop)
    }
}

/// What a question block releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemKind {
    #[default]
    Coin,
    Mushroom,
    FireFlower,
}

/// Background palette for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Overworld,
    Underground,
    Athletic,
}

/// One entry of the enemy spawn table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    /// Top-left pixel position
    pub pos: Vec2,
}

/// Item hidden in the block at a grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContent {
    pub column: i32,
    pub row: i32,
    pub item: ItemKind,
}

/// Static description of a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelMeta {
    /// Display name ("1-1")
    pub name: String,
    pub theme: Theme,
    /// Column the player starts in
    pub spawn_column: i32,
    /// Crossing this column activates the checkpoint
    pub checkpoint_column: i32,
    /// Crossing this column completes the level
    pub finish_column: i32,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub block_contents: Vec<BlockContent>,
}

/// The tile grid of the level currently being played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLevel {
    /// Row-major grid, always `LEVEL_ROWS` rows of `columns` cells
    tiles: Vec<Vec<TileKind>>,
    columns: i32,
    pub meta: LevelMeta,
}

impl TileLevel {
    /// Build a level from rows of tiles. Rows are padded or truncated to
    /// `LEVEL_ROWS`, and every row to the width of the widest one.
    pub fn new(mut tiles: Vec<Vec<TileKind>>, meta: LevelMeta) -> Self {
        let columns = tiles.iter().map(Vec::len).max().unwrap_or(0);
        tiles.resize(LEVEL_ROWS as usize, Vec::new());
        for row in &mut tiles {
            row.resize(columns, TileKind::Empty);
        }
        Self {
            tiles,
            columns: columns as i32,
            meta,
        }
    }

    /// Number of tile columns
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Width in pixels
    pub fn width(&self) -> f32 {
        self.columns as f32 * TILE_SIZE
    }

    /// Height in pixels
    pub fn height(&self) -> f32 {
        LEVEL_HEIGHT
    }

    /// Tile at a grid position (Empty when outside the grid)
    pub fn tile_at_grid(&self, column: i32, row: i32) -> TileKind {
        if column < 0 || row < 0 {
            return TileKind::Empty;
        }
        self.tiles
            .get(row as usize)
            .and_then(|r| r.get(column as usize))
            .copied()
            .unwrap_or(TileKind::Empty)
    }

    /// Tile containing a pixel position
    pub fn tile_at(&self, x: f32, y: f32) -> TileKind {
        self.tile_at_grid(tile_index(x), tile_index(y))
    }

    /// Whether the tile containing a pixel position is solid
    #[inline]
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        self.tile_at(x, y).is_solid()
    }

    /// Overwrite a grid cell; out-of-range writes are ignored
    pub fn set_tile_grid(&mut self, column: i32, row: i32, kind: TileKind) {
        if column < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self
            .tiles
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(column as usize))
        {
            *cell = kind;
        }
    }

    /// Overwrite the cell containing a pixel position
    pub fn set_tile(&mut self, x: f32, y: f32, kind: TileKind) {
        self.set_tile_grid(tile_index(x), tile_index(y), kind);
    }

    /// Content of the question block at a grid position (Coin if unlisted)
    pub fn block_content_grid(&self, column: i32, row: i32) -> ItemKind {
        self.meta
            .block_contents
            .iter()
            .find(|c| c.column == column && c.row == row)
            .map(|c| c.item)
            .unwrap_or_default()
    }

    /// Content of the question block containing a pixel position
    pub fn block_content(&self, x: f32, y: f32) -> ItemKind {
        self.block_content_grid(tile_index(x), tile_index(y))
    }

    /// Top y for a body of `height` standing on the lowest walkable surface
    /// in `column`. Falls back to the standard ground line over pits.
    pub fn spawn_y_for_column(&self, column: i32, height: f32) -> f32 {
        for row in (1..LEVEL_ROWS).rev() {
            if self.tile_at_grid(column, row).is_solid()
                && !self.tile_at_grid(column, row - 1).is_solid()
            {
                return row as f32 * TILE_SIZE - height;
            }
        }
        (LEVEL_ROWS - 2) as f32 * TILE_SIZE - height
    }

    /// Pixel position where the player starts this level
    pub fn player_start(&self) -> Vec2 {
        let column = self.meta.spawn_column;
        Vec2::new(
            column as f32 * TILE_SIZE,
            self.spawn_y_for_column(column, SMALL_HEIGHT),
        )
    }

    /// Rightmost camera offset that still shows only level tiles
    pub fn max_camera_x(&self) -> f32 {
        (self.width() - VIEW_WIDTH).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat_level(columns: usize) -> TileLevel {
        let mut tiles = vec![vec![TileKind::Empty; columns]; LEVEL_ROWS as usize];
        for row in tiles.iter_mut().skip(14) {
            row.fill(TileKind::Ground);
        }
        let meta = LevelMeta {
            name: "test".into(),
            theme: Theme::Overworld,
            spawn_column: 2,
            checkpoint_column: 10,
            finish_column: 18,
            enemy_spawns: Vec::new(),
            block_contents: vec![BlockContent {
                column: 4,
                row: 9,
                item: ItemKind::Mushroom,
            }],
        };
        let mut level = TileLevel::new(tiles, meta);
        level.set_tile_grid(4, 9, TileKind::Question);
        level
    }

    #[test]
    fn test_solidity() {
        assert!(!TileKind::Empty.is_solid());
        assert!(!TileKind::Pole.is_solid());
        assert!(!TileKind::PoleTop.is_solid());
        for kind in [
            TileKind::Ground,
            TileKind::Brick,
            TileKind::Question,
            TileKind::QuestionSpent,
            TileKind::Hard,
            TileKind::PipeTopLeft,
            TileKind::PipeTopRight,
            TileKind::PipeLeft,
            TileKind::PipeRight,
        ] {
            assert!(kind.is_solid(), "{kind:?} should be solid");
        }
    }

    #[test]
    fn test_tile_lookup_uses_floor_division() {
        let level = flat_level(20);
        assert_eq!(level.tile_at(4.0 * 16.0, 9.0 * 16.0), TileKind::Question);
        assert_eq!(level.tile_at(4.0 * 16.0 + 15.9, 9.0 * 16.0 + 15.9), TileKind::Question);
        assert_eq!(level.tile_at(0.0, 14.0 * 16.0), TileKind::Ground);
        // -0.5 belongs to column -1, not column 0
        assert_eq!(level.tile_at(-0.5, 14.0 * 16.0), TileKind::Empty);
        assert!(level.is_solid_at(8.0, 14.0 * 16.0 + 1.0));
        assert!(!level.is_solid_at(8.0, 13.0 * 16.0));
    }

    #[test]
    fn test_set_tile_out_of_bounds_is_noop() {
        let mut level = flat_level(20);
        level.set_tile(-16.0, 14.0 * 16.0, TileKind::Brick);
        level.set_tile(20.0 * 16.0, 14.0 * 16.0, TileKind::Brick);
        level.set_tile(0.0, 16.0 * 16.0, TileKind::Brick);
        level.set_tile(0.0, -1.0, TileKind::Brick);
        assert_eq!(level.columns(), 20);
        level.set_tile(4.0 * 16.0, 9.0 * 16.0, TileKind::QuestionSpent);
        assert_eq!(level.tile_at_grid(4, 9), TileKind::QuestionSpent);
    }

    #[test]
    fn test_block_content_defaults_to_coin() {
        let level = flat_level(20);
        assert_eq!(level.block_content_grid(4, 9), ItemKind::Mushroom);
        assert_eq!(level.block_content(4.0 * 16.0 + 3.0, 9.0 * 16.0), ItemKind::Mushroom);
        assert_eq!(level.block_content_grid(5, 9), ItemKind::Coin);
        assert_eq!(level.block_content_grid(-3, 400), ItemKind::Coin);
    }

    #[test]
    fn test_spawn_y_stands_on_ground() {
        let level = flat_level(20);
        assert_eq!(level.spawn_y_for_column(2, 16.0), 14.0 * 16.0 - 16.0);
        assert_eq!(level.spawn_y_for_column(2, 32.0), 14.0 * 16.0 - 32.0);
        // Off the grid: fallback line
        assert_eq!(level.spawn_y_for_column(999, 16.0), 14.0 * 16.0 - 16.0);
        assert_eq!(level.player_start(), Vec2::new(32.0, 208.0));
    }

    #[test]
    fn test_new_normalizes_rows() {
        let level = TileLevel::new(
            vec![vec![TileKind::Ground; 3], vec![TileKind::Ground; 5]],
            crate::sim::test_support::empty_meta(),
        );
        assert_eq!(level.columns(), 5);
        assert_eq!(level.tile_at_grid(4, 0), TileKind::Empty);
        assert_eq!(level.tile_at_grid(4, 1), TileKind::Ground);
        assert_eq!(level.tile_at_grid(0, 15), TileKind::Empty);
        assert_eq!(level.height(), 256.0);
    }

    proptest! {
        #[test]
        fn prop_out_of_grid_reads_empty(x in -1.0e7f32..1.0e7, y in -1.0e7f32..1.0e7) {
            let level = flat_level(20);
            let kind = level.tile_at(x, y);
            let inside = x >= 0.0 && x < level.width() && y >= 0.0 && y < level.height();
            if !inside {
                prop_assert_eq!(kind, TileKind::Empty);
            }
        }
    }
}
