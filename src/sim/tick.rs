//! Fixed timestep simulation tick
//!
//! Advances the whole game by one frame: phase transitions, the level
//! timer, the player, enemies, items, fireballs, effects, camera and
//! level progress, in that order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{TileHit, is_stomp};
use super::enemy::Enemy;
use super::item::Item;
use super::level::{ItemKind, TileKind};
use super::levels;
use super::player::{Player, SizeState};
use super::state::{BUMP_MS, GameEvent, GamePhase, GameState, ParticleKind};
use crate::consts::*;
use crate::frame_scale;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub crouch: bool,
    pub jump: bool,
    pub run: bool,
    pub throw: bool,
    /// Start / continue (one-shot)
    pub confirm: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Controls overlay toggle (one-shot)
    pub toggle_help: bool,
}

impl TickInput {
    /// -1 for left, 1 for right, 0 for neither or both
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.events.clear();

    if input.toggle_help {
        state.show_controls = !state.show_controls;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if input.confirm {
        match state.phase {
            GamePhase::Title => {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Start);
                log::info!("Run started on level {}", state.level.meta.name);
            }
            GamePhase::LevelComplete => advance_level(state),
            GamePhase::GameOver => state.full_reset(),
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;
    let tuning = state.tuning;

    update_timer(state, dt_ms);
    state.spawn_enemies_in_window();
    handle_throw(state, input, &tuning);

    state
        .player
        .update(input, &state.level, dt_ms, &tuning.player);
    if state.player.jumped {
        state.events.push(GameEvent::Jump);
    }
    if let Some(hit) = state.player.block_hit {
        hit_block(state, hit, &tuning);
    }

    if state.player.dead && state.player.body.top() > LIFE_LOST_Y {
        lose_life(state);
        return;
    }

    update_enemies(state, dt_ms, &tuning);
    player_enemy_contacts(state, &tuning);
    update_items(state, dt_ms, &tuning);
    update_projectiles(state, dt_ms, &tuning);
    update_effects(state, dt_ms);
    update_camera(state);
    check_progress(state);
}

fn advance_level(state: &mut GameState) {
    let next = state.level_index + 1;
    if next >= levels::LEVEL_COUNT {
        log::info!("All levels cleared with score {}", state.score);
        state.full_reset();
    } else {
        state.load_level(next);
        state.phase = GamePhase::Playing;
        state.events.push(GameEvent::Start);
    }
}

fn update_timer(state: &mut GameState, dt_ms: f32) {
    if state.player.dead || state.time == 0 {
        return;
    }
    state.time_accum_ms += dt_ms;
    while state.time_accum_ms >= TIME_UNIT_MS && state.time > 0 {
        state.time_accum_ms -= TIME_UNIT_MS;
        state.time -= 1;
    }
    if state.time == 0 {
        kill_player(state);
    }
}

fn kill_player(state: &mut GameState) {
    if !state.player.dead {
        let tuning = state.tuning.player;
        state.player.die(&tuning);
        state.events.push(GameEvent::Die);
    }
}

fn handle_throw(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let pressed = input.throw && !state.prev_throw_held;
    state.prev_throw_held = input.throw;
    if !pressed || state.projectiles.len() >= tuning.projectile.max_live {
        return;
    }
    if state.player.size != SizeState::Fire || state.player.throw_cooldown_ms > 0.0 {
        return;
    }
    let id = state.next_entity_id();
    if let Some(fireball) =
        state
            .player
            .throw_projectile(id, tuning.player.throw_cooldown_ms, &tuning.projectile)
    {
        state.projectiles.push(fireball);
        state.events.push(GameEvent::Fireball);
    }
}

fn hit_block(state: &mut GameState, hit: TileHit, tuning: &Tuning) {
    let TileHit { column, row } = hit;
    let above = Vec2::new(column as f32 * TILE_SIZE, (row - 1) as f32 * TILE_SIZE);

    match state.level.tile_at_grid(column, row) {
        TileKind::Question => {
            state.level.set_tile_grid(column, row, TileKind::QuestionSpent);
            state.start_bump(column, row);
            match state.level.block_content_grid(column, row) {
                ItemKind::Coin => {
                    state.collect_coin();
                    state.award(SCORE_COIN, above);
                    state.spawn_coin_pop(column, row);
                    state.events.push(GameEvent::Coin);
                }
                item => {
                    let id = state.next_entity_id();
                    state.items.push(Item::emerge(id, item, column, row));
                    state.events.push(GameEvent::PowerUpAppears);
                }
            }
        }
        TileKind::Brick if state.player.size != SizeState::Small => {
            state.level.set_tile_grid(column, row, TileKind::Empty);
            state.award(SCORE_BRICK, above);
            state.spawn_debris(column, row);
            state.events.push(GameEvent::BreakBlock);
        }
        TileKind::Brick => {
            state.start_bump(column, row);
            state.events.push(GameEvent::Bump);
        }
        _ => {
            state.events.push(GameEvent::Bump);
            return;
        }
    }

    knock_enemies_on_block(state, column, row, tuning);
}

/// Enemies standing on a struck block are knocked out
fn knock_enemies_on_block(state: &mut GameState, column: i32, row: i32, tuning: &Tuning) {
    let block_top = row as f32 * TILE_SIZE;
    let block_left = column as f32 * TILE_SIZE;
    let block_right = block_left + TILE_SIZE;

    let mut knocked = Vec::new();
    for enemy in &mut state.enemies {
        let standing = (enemy.body.bottom() - block_top).abs() <= 1.0
            && enemy.body.left() < block_right
            && enemy.body.right() > block_left;
        if standing && enemy.kick(&tuning.enemy) {
            knocked.push(enemy.body.pos);
        }
    }
    for pos in knocked {
        state.award(SCORE_BUMP_KILL, pos);
        state.events.push(GameEvent::Kick);
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost);
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("Game over with score {}", state.score);
    } else {
        state.respawn();
    }
}

fn update_enemies(state: &mut GameState, dt_ms: f32, tuning: &Tuning) {
    let level = &state.level;
    state
        .enemies
        .retain_mut(|enemy| !enemy.update(level, dt_ms, &tuning.enemy));

    // Enemy against enemy
    let mut knocked = Vec::new();
    let count = state.enemies.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = state.enemies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            if a.dead() || b.dead() || !a.body.overlaps(&b.body) {
                continue;
            }
            match (a.is_moving_shell(), b.is_moving_shell()) {
                (true, true) => {
                    knock_into(a, tuning, &mut knocked);
                    knock_into(b, tuning, &mut knocked);
                }
                (true, false) => knock_into(b, tuning, &mut knocked),
                (false, true) => knock_into(a, tuning, &mut knocked),
                (false, false) => {
                    let (ax, bx) = (a.body.pos.x, b.body.pos.x);
                    if a.is_walking() {
                        a.turn_away_from(bx);
                    }
                    if b.is_walking() {
                        b.turn_away_from(ax);
                    }
                }
            }
        }
    }
    for pos in knocked {
        state.award(SCORE_SHELL_CHAIN, pos);
        state.events.push(GameEvent::Kick);
    }
}

fn knock_into(enemy: &mut Enemy, tuning: &Tuning, knocked: &mut Vec<Vec2>) {
    if enemy.kick(&tuning.enemy) {
        knocked.push(enemy.body.pos);
    }
}

/// Outcome of the player touching one enemy
enum Contact {
    None,
    Stomp(Vec2),
    Kick(Vec2),
    Hurt,
}

fn resolve_contact(enemy: &mut Enemy, player: &Player, stomped: bool, tuning: &Tuning) -> Contact {
    if enemy.dead() || !enemy.body.overlaps(&player.body) {
        return Contact::None;
    }
    let actor_x = player.body.center().x;

    if is_stomp(
        &player.body,
        player.prev_bottom,
        player.vel.y,
        &enemy.body,
        &tuning.stomp,
    ) {
        enemy.stomp(actor_x, &tuning.enemy);
        return Contact::Stomp(enemy.body.pos);
    }
    if player.invincible || stomped || enemy.contact_grace_ms > 0.0 {
        return Contact::None;
    }
    if enemy.is_stationary_shell() {
        enemy.stomp(actor_x, &tuning.enemy);
        return Contact::Kick(enemy.body.pos);
    }
    Contact::Hurt
}

fn player_enemy_contacts(state: &mut GameState, tuning: &Tuning) {
    let mut stomped = false;
    for index in 0..state.enemies.len() {
        if state.player.dead {
            return;
        }
        let contact = resolve_contact(&mut state.enemies[index], &state.player, stomped, tuning);
        match contact {
            Contact::None => {}
            Contact::Stomp(pos) => {
                stomped = true;
                state.player.bounce(tuning.player.stomp_bounce);
                state.award(SCORE_STOMP, pos);
                state.events.push(GameEvent::Stomp);
            }
            Contact::Kick(pos) => {
                state.award(SCORE_SHELL_KICK, pos);
                state.events.push(GameEvent::Kick);
            }
            Contact::Hurt => {
                state.player.shrink(&tuning.player);
                if state.player.dead {
                    state.events.push(GameEvent::Die);
                } else {
                    state.events.push(GameEvent::PowerDown);
                }
            }
        }
    }
}

fn update_items(state: &mut GameState, dt_ms: f32, tuning: &Tuning) {
    let level = &state.level;
    state
        .items
        .retain_mut(|item| !item.update(level, dt_ms, &tuning.enemy));

    if state.player.dead {
        return;
    }
    let player_box = state.player.body;
    let mut collected = Vec::new();
    state.items.retain(|item| {
        let taken = item.collectable() && item.body.overlaps(&player_box);
        if taken {
            collected.push(item.body.pos);
        }
        !taken
    });
    for pos in collected {
        state.player.grow();
        state.award(SCORE_POWERUP, pos);
        state.events.push(GameEvent::PowerUp);
    }
}

fn update_projectiles(state: &mut GameState, dt_ms: f32, tuning: &Tuning) {
    let level = &state.level;
    state
        .projectiles
        .retain_mut(|p| !p.update(level, dt_ms, &tuning.projectile));

    let mut knocked = Vec::new();
    for projectile in &mut state.projectiles {
        let target = state
            .enemies
            .iter_mut()
            .find(|e| !e.dead() && e.body.overlaps(&projectile.body));
        if let Some(enemy) = target {
            projectile.dead = true;
            if enemy.kick(&tuning.enemy) {
                knocked.push(enemy.body.pos);
            }
        }
    }
    state.projectiles.retain(|p| !p.dead);
    for pos in knocked {
        state.award(SCORE_FIREBALL, pos);
        state.events.push(GameEvent::Kick);
    }
}

fn update_effects(state: &mut GameState, dt_ms: f32) {
    let scale = frame_scale(dt_ms);

    for particle in &mut state.particles {
        let gravity = match particle.kind {
            ParticleKind::CoinPop => 0.5,
            ParticleKind::BrickDebris => 0.4,
        };
        particle.vel.y += gravity * scale;
        particle.pos += particle.vel * scale;
        particle.life_ms -= dt_ms;
    }
    state.particles.retain(|p| p.life_ms > 0.0);

    for label in &mut state.floating_scores {
        label.pos.y -= 0.5 * scale;
        label.life_ms -= dt_ms;
    }
    state.floating_scores.retain(|s| s.life_ms > 0.0);

    for bump in &mut state.bumping_blocks {
        bump.timer_ms += dt_ms;
    }
    state
        .bumping_blocks
        .retain(|b| b.timer_ms < BUMP_MS);
}

fn update_camera(state: &mut GameState) {
    let target = state.camera_target(state.player.body.pos.x);
    if target > state.camera_x {
        state.camera_x = target;
    }
    if state.player.body.pos.x < state.camera_x {
        state.player.body.pos.x = state.camera_x;
        state.player.vel.x = 0.0;
    }
}

fn check_progress(state: &mut GameState) {
    if state.player.dead {
        return;
    }
    let checkpoint_column = state.level.meta.checkpoint_column;
    let finish_x = state.level.meta.finish_column as f32 * TILE_SIZE;
    let checkpoint_x = checkpoint_column as f32 * TILE_SIZE;

    if !state.checkpoint.reached && state.player.body.left() >= checkpoint_x {
        state.checkpoint.reached = true;
        state.checkpoint.spawn_x = checkpoint_x;
        state.checkpoint.spawn_y = state
            .level
            .spawn_y_for_column(checkpoint_column, SMALL_HEIGHT);
        let at = state.player.body.pos;
        state.award(SCORE_CHECKPOINT, at);
        state.events.push(GameEvent::Checkpoint);
        log::info!("Checkpoint reached in level {}", state.level.meta.name);
    }

    if state.player.body.right() >= finish_x {
        let bonus = state.time as u64 * TIME_BONUS_MULTIPLIER;
        state.score += bonus;
        state.phase = GamePhase::LevelComplete;
        state.events.push(GameEvent::LevelComplete);
        log::info!(
            "Level {} complete, time bonus {}, score {}",
            state.level.meta.name,
            bonus,
            state.score
        );
    }
}
