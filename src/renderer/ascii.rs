//! Text-mode surface: one character cell per 8x8 pixel block
//!
//! Used by the headless binary and by tests to inspect what a frame shows.

use std::fmt;

use super::Surface;
use super::colors::{self, Color};
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};

const CELL: f32 = 8.0;

fn glyph(color: Color) -> char {
    const TABLE: [(Color, char); 18] = [
        (colors::SKY, ' '),
        (colors::CAVE, ' '),
        (colors::DUSK, ' '),
        (colors::GROUND, '#'),
        (colors::BRICK, 'B'),
        (colors::QUESTION, '?'),
        (colors::QUESTION_SPENT, 'o'),
        (colors::HARD, 'H'),
        (colors::PIPE, '|'),
        (colors::POLE, '!'),
        (colors::PLAYER, 'P'),
        (colors::PLAYER_FIRE, 'F'),
        (colors::WALKER, 'w'),
        (colors::SHELL_WALKER, 'k'),
        (colors::MUSHROOM, 'm'),
        (colors::FLOWER, 'f'),
        (colors::FIREBALL, '*'),
        (colors::COIN, '$'),
    ];
    TABLE
        .iter()
        .find(|(c, _)| *c == color)
        .map_or('+', |&(_, g)| g)
}

#[derive(Debug, Clone)]
pub struct AsciiSurface {
    columns: usize,
    rows: usize,
    cells: Vec<char>,
}

impl Default for AsciiSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiSurface {
    /// Surface covering the full view
    pub fn new() -> Self {
        Self::with_size((VIEW_WIDTH / CELL) as usize, (VIEW_HEIGHT / CELL) as usize)
    }

    pub fn with_size(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![' '; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<char> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    pub fn row_text(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        let start = row * self.columns;
        self.cells[start..start + self.columns].iter().collect()
    }

    /// True if any row contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.rows).any(|r| self.row_text(r).contains(needle))
    }

    fn put(&mut self, column: i64, row: i64, ch: char) {
        if column < 0 || row < 0 {
            return;
        }
        let (column, row) = (column as usize, row as usize);
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column] = ch;
        }
    }
}

impl Surface for AsciiSurface {
    fn clear(&mut self, color: Color) {
        let ch = glyph(color);
        self.cells.iter_mut().for_each(|c| *c = ch);
    }

    /// Marks every cell the rectangle touches. Translucent fills are skipped
    /// so overlays don't wipe the scene.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if color[3] < 1.0 || w <= 0.0 || h <= 0.0 {
            return;
        }
        let ch = glyph(color);
        let c0 = (x / CELL).floor() as i64;
        let c1 = ((x + w) / CELL).ceil() as i64;
        let r0 = (y / CELL).floor() as i64;
        let r1 = ((y + h) / CELL).ceil() as i64;
        for row in r0..r1 {
            for column in c0..c1 {
                self.put(column, row, ch);
            }
        }
    }

    /// Outlines are finer than a cell
    fn stroke_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {}

    fn text(&mut self, x: f32, y: f32, text: &str, _color: Color) {
        let column = (x / CELL).floor() as i64;
        let row = (y / CELL).floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            self.put(column + i as i64, row, ch);
        }
    }
}

impl fmt::Display for AsciiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_text(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_sized_grid() {
        let s = AsciiSurface::new();
        assert_eq!(s.columns(), 32);
        assert_eq!(s.rows(), 30);
    }

    #[test]
    fn test_fill_marks_touched_cells() {
        let mut s = AsciiSurface::with_size(4, 4);
        s.fill_rect(4.0, 0.0, 8.0, 8.0, colors::GROUND);
        assert_eq!(s.row_text(0), "##  ");
        assert_eq!(s.row_text(1), "    ");
    }

    #[test]
    fn test_translucent_fill_ignored() {
        let mut s = AsciiSurface::with_size(2, 2);
        s.fill_rect(0.0, 0.0, 16.0, 16.0, colors::OVERLAY);
        assert_eq!(s.to_string(), "  \n  \n");
    }

    #[test]
    fn test_text_clips_at_edges() {
        let mut s = AsciiSurface::with_size(4, 1);
        s.text(16.0, 0.0, "ABCD", colors::TEXT);
        s.text(-8.0, 0.0, "XY", colors::TEXT);
        assert_eq!(s.row_text(0), "Y AB");
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let mut s = AsciiSurface::with_size(1, 1);
        s.fill_rect(0.0, 0.0, 8.0, 8.0, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(s.cell(0, 0), Some('+'));
        assert_eq!(s.cell(1, 0), None);
    }
}
