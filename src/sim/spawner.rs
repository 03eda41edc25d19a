//! Enemy spawning
//!
//! Difficulty grows with play time: the chance of a new enemy each step is
//! `1 - 0.993^game_time`, zero at the start and approaching one after a few
//! minutes.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState, sheet};
use crate::config::SpawnPolicy;
use crate::consts::SPAWN_BASE;

/// Chance that a single frame spawns an enemy, ignoring frame length
#[inline]
pub fn frame_spawn_chance(game_time: f32) -> f32 {
    1.0 - SPAWN_BASE.powf(game_time)
}

/// Chance that a step of length `dt` spawns an enemy under `policy`
pub fn spawn_probability(policy: SpawnPolicy, game_time: f32, dt: f32) -> f32 {
    let per_frame = frame_spawn_chance(game_time);
    match policy {
        SpawnPolicy::PerFrame => per_frame,
        SpawnPolicy::RateNormalized { reference_hz } => {
            let frames = (dt * reference_hz).max(0.0);
            1.0 - (1.0 - per_frame).powf(frames)
        }
        SpawnPolicy::Disabled => 0.0,
    }
}

/// Roll for a new enemy; returns true if one was created
///
/// Enemies enter at the right edge at a random height that keeps the whole
/// frame on the canvas.
pub fn maybe_spawn(state: &mut GameState, dt: f32) -> bool {
    let chance = spawn_probability(state.config.spawn_policy, state.game_time, dt);
    let roll: f32 = state.rng().random();
    if roll >= chance {
        return false;
    }

    let max_y = (state.config.canvas_height - sheet::ENEMY_FRAME.y).max(0.0);
    let y = state.rng().random::<f32>() * max_y;
    let pos = Vec2::new(state.config.canvas_width, y);

    state.enemies.push(Enemy::new(pos));
    state.events.push(GameEvent::EnemySpawned { pos });
    log::debug!("Enemy spawned at y={:.1} (t={:.1}s)", y, state.game_time);
    true
}
