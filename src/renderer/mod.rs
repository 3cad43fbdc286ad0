//! Rendering module
//!
//! Draws a `GameState` onto any `Surface` as rectangles and text in view
//! space (256x240, origin at the top left). Nothing here mutates the sim.

pub mod ascii;
pub mod colors;
pub mod shapes;

pub use ascii::AsciiSurface;
pub use colors::Color;

use crate::consts::{LEVEL_ROWS, TILE_SIZE, VIEW_HEIGHT, VIEW_WIDTH};
use crate::tile_index;
use crate::sim::state::{GamePhase, GameState};

/// Width of one glyph, used for centering text
pub const GLYPH_WIDTH: f32 = 8.0;

/// Drawing target for a frame
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    /// Draw `text` with its top-left glyph cell at (x, y)
    fn text(&mut self, x: f32, y: f32, text: &str, color: Color);
}

/// Draw one full frame: world, HUD, then any phase overlay
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface) {
    surface.clear(colors::background(state.level.meta.theme));
    draw_world(state, surface);
    draw_hud(state, surface);
    draw_overlay(state, surface);
}

fn draw_world(state: &GameState, surface: &mut dyn Surface) {
    let cam = state.camera_x;
    let first = tile_index(cam);
    let last = tile_index(cam + VIEW_WIDTH);

    for row in 0..LEVEL_ROWS {
        for column in first..=last {
            let kind = state.level.tile_at_grid(column, row);
            let offset = state
                .bumping_blocks
                .iter()
                .find(|b| b.column == column && b.row == row)
                .map_or(0.0, |b| b.offset());
            shapes::draw_tile(
                surface,
                kind,
                column as f32 * TILE_SIZE - cam,
                row as f32 * TILE_SIZE + offset,
            );
        }
    }

    for item in &state.items {
        shapes::draw_item(surface, item, cam);
    }
    for enemy in &state.enemies {
        shapes::draw_enemy(surface, enemy, cam);
    }
    for projectile in &state.projectiles {
        shapes::draw_projectile(surface, projectile, cam);
    }

    let player = &state.player;
    let blink_off = player.invincible && (player.invincible_ms / 100.0) as u32 % 2 == 1;
    if !blink_off {
        shapes::draw_player(surface, player, cam);
    }

    for particle in &state.particles {
        shapes::draw_particle(surface, particle, cam);
    }
    for popup in &state.floating_scores {
        surface.text(popup.pos.x - cam, popup.pos.y, &popup.value.to_string(), colors::TEXT);
    }
}

fn draw_hud(state: &GameState, surface: &mut dyn Surface) {
    let hud = state.hud();
    let col = |c: f32| c * GLYPH_WIDTH;

    surface.text(col(1.0), 8.0, "PLAYER", colors::TEXT);
    surface.text(col(1.0), 16.0, &format!("{:06}", hud.score), colors::TEXT);
    surface.text(col(9.0), 8.0, "COINS", colors::TEXT);
    surface.text(col(9.0), 16.0, &format!("x{:02}", hud.coins), colors::TEXT);
    surface.text(col(15.0), 8.0, "WORLD", colors::TEXT);
    surface.text(col(15.0), 16.0, &hud.level_name, colors::TEXT);
    surface.text(col(21.0), 8.0, "TIME", colors::TEXT);
    surface.text(col(21.0), 16.0, &format!("{:03}", hud.time), colors::TEXT);
    surface.text(col(27.0), 8.0, "LIVES", colors::TEXT);
    surface.text(col(27.0), 16.0, &hud.lives.to_string(), colors::TEXT);
}

fn text_centered(surface: &mut dyn Surface, y: f32, text: &str) {
    let width = text.chars().count() as f32 * GLYPH_WIDTH;
    surface.text(((VIEW_WIDTH - width) * 0.5).max(0.0), y, text, colors::TEXT);
}

fn draw_overlay(state: &GameState, surface: &mut dyn Surface) {
    let lines: Vec<String> = match state.phase {
        GamePhase::Playing => Vec::new(),
        GamePhase::Title => vec![
            "BRICK DASH".into(),
            String::new(),
            "PRESS ENTER TO START".into(),
            "C FOR CONTROLS".into(),
        ],
        GamePhase::Paused => vec!["PAUSED".into()],
        GamePhase::LevelComplete => vec![
            "LEVEL COMPLETE!".into(),
            format!("SCORE {}", state.score),
            String::new(),
            "PRESS ENTER".into(),
        ],
        GamePhase::GameOver => vec![
            "GAME OVER".into(),
            format!("SCORE {}", state.score),
            String::new(),
            "PRESS ENTER".into(),
        ],
    };

    if !lines.is_empty() {
        surface.fill_rect(0.0, 0.0, VIEW_WIDTH, VIEW_HEIGHT, colors::OVERLAY);
        let top = 96.0 - lines.len() as f32 * 4.0;
        for (i, line) in lines.iter().enumerate() {
            text_centered(surface, top + i as f32 * 12.0, line);
        }
    }

    if state.show_controls {
        draw_controls(surface);
    }
}

fn draw_controls(surface: &mut dyn Surface) {
    const LINES: [&str; 7] = [
        "CONTROLS",
        "ARROWS/AD  MOVE",
        "DOWN/S     CROUCH",
        "SPACE/K    JUMP",
        "SHIFT/L    RUN",
        "J          FIRE",
        "ESC/M      PAUSE",
    ];
    surface.fill_rect(24.0, 144.0, VIEW_WIDTH - 48.0, 72.0, colors::OVERLAY);
    for (i, line) in LINES.iter().enumerate() {
        surface.text(32.0, 148.0 + i as f32 * 9.0, line, colors::TEXT);
    }
}
