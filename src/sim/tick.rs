//! Simulation step
//!
//! Advances every entity by a measured time delta, then spawns and resolves
//! collisions.

use glam::Vec2;

use super::spawner::maybe_spawn;
use super::state::{Bullet, Entity, GameEvent, GamePhase, GameState};
use crate::platform::input::{Key, KeyboardState};

/// Held inputs for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Snapshot the keyboard (arrows or WASD, space to fire)
    pub fn from_keyboard(keys: &impl KeyboardState) -> Self {
        Self {
            up: keys.is_down(Key::Up) || keys.is_down(Key::W),
            down: keys.is_down(Key::Down) || keys.is_down(Key::S),
            left: keys.is_down(Key::Left) || keys.is_down(Key::A),
            right: keys.is_down(Key::Right) || keys.is_down(Key::D),
            fire: keys.is_down(Key::Space),
        }
    }
}

/// Advance the game state by `dt` seconds
///
/// Game over only stops firing and further game-over transitions; the
/// player can still move and enemies, explosions and spawning carry on.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    debug_assert!(dt >= 0.0, "negative frame delta {dt}");

    state.time_ticks += 1;
    state.game_time += dt;
    state.since_last_fire += dt;

    // Movement. Axes are independent, so diagonals are faster by sqrt(2).
    let step = state.config.player_speed * dt;
    if input.down {
        state.player.pos.y += step;
    }
    if input.up {
        state.player.pos.y -= step;
    }
    if input.left {
        state.player.pos.x -= step;
    }
    if input.right {
        state.player.pos.x += step;
    }

    // Firing, rate limited
    if input.fire
        && state.phase == GamePhase::Playing
        && state.since_last_fire >= state.config.fire_interval
    {
        let muzzle = state.player.muzzle();
        state.bullets.push(Bullet::new(muzzle));
        state.since_last_fire = 0.0;
        state.events.push(GameEvent::BulletFired);
    }

    clamp_player(state);

    state.player.sprite.advance(dt);

    let width = state.config.canvas_width;

    // Bullets
    let bullet_step = state.config.bullet_speed * dt;
    state.bullets.retain_mut(|bullet| {
        bullet.pos.x += bullet_step;
        bullet.pos.x <= width
    });

    // Enemies
    let enemy_step = state.config.enemy_speed * dt;
    state.enemies.retain_mut(|enemy| {
        enemy.pos.x -= enemy_step;
        enemy.sprite.advance(dt);
        enemy.pos.x + enemy.size().x >= 0.0
    });

    // Explosions
    state.explosions.retain_mut(|explosion| {
        explosion.sprite.advance(dt);
        !explosion.sprite.finished()
    });

    maybe_spawn(state, dt);

    resolve_collisions(state);
}

/// Keep the player's canonical box inside the canvas
pub fn clamp_player(state: &mut GameState) {
    let size = state.player.hitbox_size(state.config.player_hitbox);
    let max = (state.config.canvas_size() - size).max(Vec2::ZERO);
    state.player.pos = state.player.pos.clamp(Vec2::ZERO, max);
}

/// Bullets against enemies, then surviving enemies against the player
///
/// For each enemy in order, the first overlapping bullet destroys it: both are
/// removed and an explosion takes the enemy's place. A bullet is spent on the
/// first enemy it hits, even if it overlaps several. Any remaining enemy that
/// overlaps the player ends the game.
pub fn resolve_collisions(state: &mut GameState) {
    let player_box = state.player_hitbox();
    let mut player_hit = false;

    let mut i = 0;
    while i < state.enemies.len() {
        let enemy_box = state.enemies[i].bounds();

        let hit = state
            .bullets
            .iter()
            .position(|bullet| super::collides(&enemy_box, &bullet.bounds()));

        if let Some(j) = hit {
            state.bullets.remove(j);
            let enemy = state.enemies.remove(i);
            state.spawn_explosion(enemy.pos);
            state.events.push(GameEvent::EnemyDestroyed { pos: enemy.pos });
            log::debug!("Enemy destroyed at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
            // Index i now holds the next enemy
            continue;
        }

        if super::collides(&enemy_box, &player_box) {
            player_hit = true;
        }
        i += 1;
    }

    if player_hit && state.enter_game_over() {
        log::info!("Game over at {:.1}s", state.game_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, PlayerHitbox, SpawnPolicy};
    use crate::platform::input::KeySet;
    use crate::sim::state::{Enemy, Explosion};
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// State with spawning off so entity counts stay exact
    fn quiet_state() -> GameState {
        let config = Config {
            spawn_policy: SpawnPolicy::Disabled,
            ..Config::default()
        };
        let mut state = GameState::new(config, 12345);
        state.drain_events();
        state
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_input_from_keyboard() {
        let mut keys = KeySet::default();
        keys.press(Key::W);
        keys.press(Key::Right);
        keys.press(Key::Space);
        let input = TickInput::from_keyboard(&keys);
        assert!(input.up && input.right && input.fire);
        assert!(!input.down && !input.left);
    }

    #[test]
    fn test_game_time_accumulates() {
        let mut state = quiet_state();
        tick(&mut state, &TickInput::default(), 0.25);
        tick(&mut state, &TickInput::default(), 0.25);
        assert_eq!(state.game_time, 0.5);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_movement_is_not_normalized() {
        let mut state = quiet_state();
        state.player.pos = Vec2::new(200.0, 200.0);
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);
        // 200 px/s on both axes
        assert_eq!(state.player.pos, Vec2::new(220.0, 220.0));
    }

    #[test]
    fn test_player_clamped_to_canvas() {
        let mut state = quiet_state();
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input, 5.0);
        assert_eq!(state.player.pos, Vec2::ZERO);

        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 5.0);
        assert_eq!(state.player.pos, Vec2::new(512.0 - 39.0, 480.0 - 39.0));
    }

    #[test]
    fn test_display_box_clamp() {
        let config = Config {
            player_hitbox: PlayerHitbox::DisplayBox,
            ..Config::default()
        };
        let mut state = GameState::new(config, 1);
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, 5.0);
        assert_eq!(state.player.pos, Vec2::new(412.0, 380.0));
    }

    #[test]
    fn test_fire_rate_limited() {
        let mut state = quiet_state();
        tick(&mut state, &fire(), 0.05);
        assert_eq!(state.bullets.len(), 1);
        // 50ms later: still cooling down
        tick(&mut state, &fire(), 0.05);
        assert_eq!(state.bullets.len(), 1);
        // 100ms after the first shot
        tick(&mut state, &fire(), 0.05);
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_fire_every_interval_while_held() {
        let mut state = quiet_state();
        for _ in 0..5 {
            tick(&mut state, &fire(), 0.1);
        }
        assert_eq!(state.bullets.len(), 5);
    }

    #[test]
    fn test_bullet_spawns_at_sprite_center() {
        let mut state = quiet_state();
        tick(&mut state, &fire(), 0.0);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, Vec2::new(50.0 + 19.5, 240.0 + 19.5));
    }

    #[test]
    fn test_no_fire_after_game_over() {
        let mut state = quiet_state();
        state.enter_game_over();
        tick(&mut state, &fire(), 0.2);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_movement_continues_after_game_over() {
        let mut state = quiet_state();
        state.enter_game_over();
        state.enemies.push(Enemy::new(Vec2::new(400.0, 10.0)));
        let input = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);
        assert_eq!(state.player.pos.y, 260.0);
        assert_eq!(state.enemies[0].pos.x, 390.0);
    }

    #[test]
    fn test_bullet_leaves_right_edge() {
        let mut state = quiet_state();
        state.bullets.push(Bullet::new(Vec2::new(500.0, 10.0)));
        state.bullets.push(Bullet::new(Vec2::new(100.0, 10.0)));
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 150.0);
    }

    #[test]
    fn test_enemy_leaves_left_edge() {
        let mut state = quiet_state();
        state.enemies.push(Enemy::new(Vec2::new(-75.0, 10.0)));
        state.enemies.push(Enemy::new(Vec2::new(-85.0, 10.0)));
        state.enemies.push(Enemy::new(Vec2::new(300.0, 10.0)));
        tick(&mut state, &TickInput::default(), 0.1);
        // Both left-edge enemies end the step with their right edge below zero
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.x, 290.0);
    }

    #[test]
    fn test_finished_explosions_removed() {
        let mut state = quiet_state();
        state.explosions.push(Explosion::new(Vec2::new(10.0, 10.0)));
        tick(&mut state, &TickInput::default(), 0.5);
        assert_eq!(state.explosions.len(), 1);
        // 13 frames at 16 fps = 0.8125s
        tick(&mut state, &TickInput::default(), 0.5);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_bullet_destroys_enemy_in_same_step() {
        let mut state = quiet_state();
        state.enemies.push(Enemy::new(Vec2::new(300.0, 100.0)));
        state.bullets.push(Bullet::new(Vec2::new(290.0, 110.0)));
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.explosions.len(), 1);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::EnemyDestroyed { .. }]
        ));
    }

    #[test]
    fn test_one_bullet_destroys_one_enemy() {
        let mut state = quiet_state();
        // Two stacked enemies both overlapping one bullet
        state.enemies.push(Enemy::new(Vec2::new(300.0, 100.0)));
        state.enemies.push(Enemy::new(Vec2::new(300.0, 110.0)));
        state.bullets.push(Bullet::new(Vec2::new(310.0, 120.0)));
        resolve_collisions(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.y, 110.0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].pos, Vec2::new(300.0, 100.0));
    }

    #[test]
    fn test_one_enemy_consumes_one_bullet() {
        let mut state = quiet_state();
        state.enemies.push(Enemy::new(Vec2::new(300.0, 100.0)));
        state.bullets.push(Bullet::new(Vec2::new(310.0, 105.0)));
        state.bullets.push(Bullet::new(Vec2::new(320.0, 115.0)));
        resolve_collisions(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 320.0);
    }

    #[test]
    fn test_enemy_touching_player_ends_game() {
        let mut state = quiet_state();
        assert_eq!(state.player.pos, Vec2::new(50.0, 240.0));
        state.enemies.push(Enemy::new(Vec2::new(60.0, 240.0)));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // A second overlapping enemy is a no-op
        state.enemies.push(Enemy::new(Vec2::new(55.0, 245.0)));
        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_destroyed_enemy_does_not_hit_player() {
        let mut state = quiet_state();
        state.enemies.push(Enemy::new(Vec2::new(60.0, 240.0)));
        state.bullets.push(Bullet::new(Vec2::new(70.0, 250.0)));
        resolve_collisions(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut state = quiet_state();
        state.enemies.push(Enemy::new(Vec2::new(60.0, 240.0)));
        tick(&mut state, &fire(), 0.5);
        assert!(state.is_game_over());

        state.reset();
        assert_eq!(state.game_time, 0.0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos, Vec2::new(50.0, 240.0));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(Config::default(), 99999);
        let mut state2 = GameState::new(Config::default(), 99999);
        state1.game_time = 120.0;
        state2.game_time = 120.0;

        let inputs = [
            fire(),
            TickInput {
                up: true,
                ..Default::default()
            },
            TickInput {
                down: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.bullets.len(), state2.bullets.len());
        assert_eq!(state1.explosions.len(), state2.explosions.len());
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right, fire)| TickInput {
                up,
                down,
                left,
                right,
                fire,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            steps in prop::collection::vec((input_strategy(), 0.0f32..2.0), 1..40)
        ) {
            let mut state = GameState::new(Config::default(), 7);
            for (input, dt) in &steps {
                tick(&mut state, input, *dt);
                let pos = state.player.pos;
                prop_assert!(pos.x >= 0.0 && pos.x <= 512.0 - 39.0);
                prop_assert!(pos.y >= 0.0 && pos.y <= 480.0 - 39.0);
            }
        }

        #[test]
        fn prop_game_time_never_decreases(dts in prop::collection::vec(0.0f32..1.0, 1..50)) {
            let mut state = GameState::new(Config::default(), 7);
            let mut last = state.game_time;
            for dt in dts {
                tick(&mut state, &TickInput::default(), dt);
                prop_assert!(state.game_time >= last);
                last = state.game_time;
            }
        }
    }
}
