//! Compiled-in level layouts
//!
//! Levels are described with a small builder so the layouts read like a
//! map legend: ground with gaps, pipes, staircases, block rows.

use glam::Vec2;

use super::enemy::EnemyKind;
use super::level::{BlockContent, EnemySpawn, ItemKind, LevelMeta, Theme, TileKind, TileLevel};
use crate::consts::*;

/// Number of levels in a full run
pub const LEVEL_COUNT: usize = 3;

/// Load a fresh copy of a level. Out-of-range indices are clamped.
pub fn load(index: usize) -> TileLevel {
    match clamp_index(index) {
        0 => world_1_1(),
        1 => world_1_2(),
        _ => world_1_3(),
    }
}

/// Clamp a level index into `[0, LEVEL_COUNT)`
pub fn clamp_index(index: usize) -> usize {
    index.min(LEVEL_COUNT - 1)
}

/// Ground rows occupy the bottom two rows of the grid
const GROUND_TOP_ROW: i32 = 14;

/// Writes tiles straight into a blank `TileLevel`; the meta is filled in by `build`
struct LevelBuilder {
    level: TileLevel,
    spawns: Vec<EnemySpawn>,
    contents: Vec<BlockContent>,
}

impl LevelBuilder {
    fn new(columns: i32) -> Self {
        let tiles = vec![vec![TileKind::Empty; columns.max(0) as usize]; LEVEL_ROWS as usize];
        Self {
            level: TileLevel::new(tiles, LevelMeta::default()),
            spawns: Vec::new(),
            contents: Vec::new(),
        }
    }

    fn put(&mut self, column: i32, row: i32, kind: TileKind) -> &mut Self {
        self.level.set_tile_grid(column, row, kind);
        self
    }

    /// Fill the two ground rows, leaving the inclusive column ranges in `gaps` open
    fn ground(&mut self, gaps: &[(i32, i32)]) -> &mut Self {
        for column in 0..self.level.columns() {
            if gaps.iter().any(|&(start, end)| column >= start && column <= end) {
                continue;
            }
            self.put(column, GROUND_TOP_ROW, TileKind::Ground);
            self.put(column, GROUND_TOP_ROW + 1, TileKind::Ground);
        }
        self
    }

    /// Horizontal run of one tile kind, inclusive
    fn span(&mut self, row: i32, from: i32, to: i32, kind: TileKind) -> &mut Self {
        for column in from..=to {
            self.put(column, row, kind);
        }
        self
    }

    fn question(&mut self, column: i32, row: i32, item: ItemKind) -> &mut Self {
        self.put(column, row, TileKind::Question);
        if item != ItemKind::Coin {
            self.contents.push(BlockContent { column, row, item });
        }
        self
    }

    /// Two-wide pipe standing on the ground, `height` tiles tall
    fn pipe(&mut self, column: i32, height: i32) -> &mut Self {
        let top = GROUND_TOP_ROW - height;
        self.put(column, top, TileKind::PipeTopLeft);
        self.put(column + 1, top, TileKind::PipeTopRight);
        for row in top + 1..GROUND_TOP_ROW {
            self.put(column, row, TileKind::PipeLeft);
            self.put(column + 1, row, TileKind::PipeRight);
        }
        self
    }

    /// Column of hard blocks rising from the ground
    fn pillar(&mut self, column: i32, height: i32) -> &mut Self {
        for row in GROUND_TOP_ROW - height..GROUND_TOP_ROW {
            self.put(column, row, TileKind::Hard);
        }
        self
    }

    /// Staircase climbing to the right, starting one block high
    fn stairs_up(&mut self, column: i32, steps: i32) -> &mut Self {
        for step in 0..steps {
            self.pillar(column + step, step + 1);
        }
        self
    }

    /// Staircase descending to the right, starting `steps` blocks high
    fn stairs_down(&mut self, column: i32, steps: i32) -> &mut Self {
        for step in 0..steps {
            self.pillar(column + step, steps - step);
        }
        self
    }

    fn flag_pole(&mut self, column: i32) -> &mut Self {
        self.put(column, GROUND_TOP_ROW - 1, TileKind::Hard);
        for row in 3..GROUND_TOP_ROW - 1 {
            self.put(column, row, TileKind::Pole);
        }
        self.put(column, 2, TileKind::PoleTop);
        self
    }

    /// Enemy standing on the ground line at `column`
    fn enemy(&mut self, kind: EnemyKind, column: i32) -> &mut Self {
        let y = GROUND_TOP_ROW as f32 * TILE_SIZE - kind.walking_height();
        self.spawns.push(EnemySpawn {
            kind,
            pos: Vec2::new(column as f32 * TILE_SIZE, y),
        });
        self
    }

    fn build(
        self,
        name: &str,
        theme: Theme,
        spawn_column: i32,
        checkpoint_column: i32,
        finish_column: i32,
    ) -> TileLevel {
        let Self {
            mut level,
            mut spawns,
            contents,
        } = self;
        spawns.sort_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
        level.meta = LevelMeta {
            name: name.to_string(),
            theme,
            spawn_column,
            checkpoint_column,
            finish_column,
            enemy_spawns: spawns,
            block_contents: contents,
        };
        level
    }
}

fn world_1_1() -> TileLevel {
    use EnemyKind::{ShellWalker, Walker};
    use ItemKind::{Coin, FireFlower, Mushroom};
    use TileKind::Brick;

    let mut b = LevelBuilder::new(212);
    b.ground(&[(69, 70), (86, 88), (153, 154)]);

    // Opening block row
    b.question(16, 9, Coin)
        .put(20, 9, Brick)
        .question(21, 9, Coin)
        .put(22, 9, Brick)
        .question(23, 9, Mushroom)
        .put(24, 9, Brick)
        .question(22, 5, Coin);

    b.pipe(28, 2).pipe(38, 3).pipe(46, 4).pipe(57, 4);

    // After the first pit
    b.question(78, 9, Coin)
        .put(78, 5, Brick)
        .put(80, 9, Brick)
        .question(81, 9, Mushroom)
        .put(82, 9, Brick)
        .span(5, 80, 87, Brick)
        .span(5, 91, 93, Brick)
        .question(94, 5, Coin)
        .put(94, 9, Brick)
        .span(9, 100, 101, Brick)
        .question(100, 5, Coin)
        .question(101, 5, Coin)
        .question(102, 5, Coin)
        .put(106, 9, Brick)
        .span(9, 109, 110, Brick)
        .question(111, 9, FireFlower)
        .put(112, 9, Brick);

    b.stairs_up(134, 4).stairs_down(140, 4);
    b.stairs_up(148, 4).stairs_down(155, 4);
    b.pipe(163, 2).pipe(179, 2);
    b.stairs_up(189, 8).pillar(197, 8);
    b.flag_pole(200);

    for column in [22, 41, 52, 81, 100, 120, 175] {
        b.enemy(Walker, column);
    }
    b.enemy(ShellWalker, 107);

    b.build("1-1", Theme::Overworld, 3, 96, 200)
}

fn world_1_2() -> TileLevel {
    use EnemyKind::{ShellWalker, Walker};
    use ItemKind::{Coin, FireFlower, Mushroom};
    use TileKind::{Brick, Hard};

    let mut b = LevelBuilder::new(170);
    b.ground(&[(40, 41), (90, 92), (126, 127)]);

    // Low ceiling of bricks over most of the level
    b.span(1, 6, 150, Brick);

    b.question(10, 9, Mushroom)
        .question(11, 9, Coin)
        .question(12, 9, Coin)
        .question(13, 9, Coin);

    b.stairs_up(17, 3).stairs_down(21, 3);
    b.span(8, 29, 36, Brick).question(32, 8, Coin);
    b.pipe(45, 3).pipe(52, 4);
    b.span(10, 58, 66, Brick).span(6, 60, 64, Brick);
    b.question(62, 6, FireFlower);

    // Brick maze before the second pit
    for column in [72, 76, 80] {
        b.pillar(column, 3);
        b.put(column, 8, Brick);
    }
    b.span(9, 94, 100, Hard);
    b.question(97, 5, Coin);
    b.pipe(106, 2).pipe(114, 3);
    b.span(10, 120, 124, Brick).question(122, 6, Mushroom);
    b.stairs_up(132, 5).stairs_down(140, 3);
    b.flag_pole(158);

    for column in [25, 48, 60, 100, 130] {
        b.enemy(Walker, column);
    }
    b.enemy(ShellWalker, 70);
    b.enemy(ShellWalker, 117);

    b.build("1-2", Theme::Underground, 3, 84, 158)
}

fn world_1_3() -> TileLevel {
    use EnemyKind::{ShellWalker, Walker};
    use ItemKind::{Coin, Mushroom};
    use TileKind::{Brick, Hard};

    let mut b = LevelBuilder::new(160);
    b.ground(&[(20, 24), (40, 45), (60, 66), (85, 90), (110, 114)]);

    // Floating platforms bridging each pit
    b.span(11, 21, 23, Hard)
        .span(10, 41, 44, Hard)
        .span(9, 62, 64, Hard)
        .span(11, 86, 89, Hard)
        .span(10, 111, 113, Hard);

    b.question(14, 9, Coin).question(15, 9, Mushroom);
    b.span(7, 30, 34, Brick).question(32, 3, Coin);
    b.pipe(52, 3);
    b.stairs_up(76, 4);
    b.span(6, 96, 99, Brick).question(98, 6, Coin);
    b.pipe(104, 2);
    b.stairs_up(124, 6).pillar(130, 6);
    b.flag_pole(144);

    for column in [30, 50, 75, 95, 120] {
        b.enemy(Walker, column);
    }
    b.enemy(ShellWalker, 100);

    b.build("1-3", Theme::Athletic, 3, 70, 144)
}
