//! Sprite shapes for tiles and entities, built from filled rectangles

use super::Surface;
use super::colors::{self, Color};
use crate::consts::TILE_SIZE;
use crate::sim::enemy::{Enemy, EnemyKind, EnemyState};
use crate::sim::item::Item;
use crate::sim::level::{ItemKind, TileKind};
use crate::sim::player::{Player, SizeState};
use crate::sim::projectile::Projectile;
use crate::sim::state::{Particle, ParticleKind};

fn tile_color(kind: TileKind) -> Option<Color> {
    match kind {
        TileKind::Empty => None,
        TileKind::Ground => Some(colors::GROUND),
        TileKind::Brick => Some(colors::BRICK),
        TileKind::Question => Some(colors::QUESTION),
        TileKind::QuestionSpent => Some(colors::QUESTION_SPENT),
        TileKind::Hard => Some(colors::HARD),
        TileKind::PipeTopLeft
        | TileKind::PipeTopRight
        | TileKind::PipeLeft
        | TileKind::PipeRight => Some(colors::PIPE),
        TileKind::Pole | TileKind::PoleTop => Some(colors::POLE),
    }
}

/// One tile with its top-left corner at screen (x, y)
pub fn draw_tile(surface: &mut dyn Surface, kind: TileKind, x: f32, y: f32) {
    let Some(color) = tile_color(kind) else {
        return;
    };
    match kind {
        TileKind::Pole => surface.fill_rect(x + 7.0, y, 2.0, TILE_SIZE, color),
        TileKind::PoleTop => surface.fill_rect(x + 4.0, y + 4.0, 8.0, 8.0, color),
        TileKind::PipeTopLeft => {
            surface.fill_rect(x - 2.0, y, TILE_SIZE + 2.0, TILE_SIZE, color);
            surface.stroke_rect(x - 2.0, y, TILE_SIZE + 2.0, 8.0, colors::CAVE);
        }
        TileKind::PipeTopRight => {
            surface.fill_rect(x, y, TILE_SIZE + 2.0, TILE_SIZE, color);
            surface.stroke_rect(x, y, TILE_SIZE + 2.0, 8.0, colors::CAVE);
        }
        TileKind::Question => {
            surface.fill_rect(x, y, TILE_SIZE, TILE_SIZE, color);
            surface.text(x + 4.0, y + 4.0, "?", colors::TEXT);
        }
        _ => {
            surface.fill_rect(x, y, TILE_SIZE, TILE_SIZE, color);
            if kind == TileKind::Brick {
                surface.stroke_rect(x, y, TILE_SIZE, TILE_SIZE, colors::CAVE);
            }
        }
    }
}

pub fn draw_player(surface: &mut dyn Surface, player: &Player, camera_x: f32) {
    let body = player.body;
    let x = body.left() - camera_x;
    let color = if player.size == SizeState::Fire {
        colors::PLAYER_FIRE
    } else {
        colors::PLAYER
    };
    let height = if player.crouching && player.size != SizeState::Small {
        body.size.y * 0.5
    } else {
        body.size.y
    };
    surface.fill_rect(x, body.bottom() - height, body.size.x, height, color);

    // Odd walk frames spread the legs a little
    if player.walk_frame() % 2 == 1 {
        surface.fill_rect(x - 1.0, body.bottom() - 3.0, body.size.x + 2.0, 3.0, color);
    }
}

pub fn draw_enemy(surface: &mut dyn Surface, enemy: &Enemy, camera_x: f32) {
    let body = enemy.body;
    let x = body.left() - camera_x;
    let color = match enemy.kind {
        EnemyKind::Walker => colors::WALKER,
        EnemyKind::ShellWalker => colors::SHELL_WALKER,
    };
    match enemy.state {
        EnemyState::Shell { .. } => {
            surface.fill_rect(x + 2.0, body.top() + 2.0, body.size.x - 4.0, body.size.y - 6.0, color);
            surface.fill_rect(x, body.bottom() - 4.0, body.size.x, 4.0, colors::GROUND);
        }
        _ => {
            // Two-frame waddle: feet shift by a pixel
            let shift = enemy.anim_frame() as f32;
            surface.fill_rect(x + shift, body.top(), body.size.x - 1.0, body.size.y, color);
        }
    }
}

pub fn draw_item(surface: &mut dyn Surface, item: &Item, camera_x: f32) {
    let color = match item.kind {
        ItemKind::Coin => colors::COIN,
        ItemKind::Mushroom => colors::MUSHROOM,
        ItemKind::FireFlower => colors::FLOWER,
    };
    let body = item.body;
    surface.fill_rect(body.left() - camera_x, body.top(), body.size.x, body.size.y, color);
}

pub fn draw_projectile(surface: &mut dyn Surface, projectile: &Projectile, camera_x: f32) {
    let body = projectile.body;
    surface.fill_rect(
        body.left() - camera_x,
        body.top(),
        body.size.x,
        body.size.y,
        colors::FIREBALL,
    );
}

pub fn draw_particle(surface: &mut dyn Surface, particle: &Particle, camera_x: f32) {
    let x = particle.pos.x - camera_x;
    match particle.kind {
        ParticleKind::CoinPop => surface.fill_rect(x, particle.pos.y, 8.0, 14.0, colors::COIN),
        ParticleKind::BrickDebris => surface.fill_rect(x, particle.pos.y, 4.0, 4.0, colors::BRICK),
    }
}
