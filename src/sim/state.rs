//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one `GameState` aggregate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::sprite::Sprite;
use crate::config::{Config, PlayerHitbox};
use crate::consts::*;

/// Sprite sheet layout
pub mod sheet {
    use glam::Vec2;

    use crate::sim::sprite::SheetLayout;

    /// Animation frames run left to right on `img/sprites.png`
    pub const LAYOUT: SheetLayout = SheetLayout::Horizontal;

    pub const PLAYER_OFFSET: Vec2 = Vec2::new(0.0, 0.0);
    pub const PLAYER_FRAME: Vec2 = Vec2::new(39.0, 39.0);
    pub const PLAYER_FPS: f32 = 16.0;
    pub const PLAYER_FRAMES: &[u16] = &[0, 1];

    pub const BULLET_OFFSET: Vec2 = Vec2::new(0.0, 39.0);
    pub const BULLET_FRAME: Vec2 = Vec2::new(18.0, 8.0);

    pub const ENEMY_OFFSET: Vec2 = Vec2::new(0.0, 78.0);
    pub const ENEMY_FRAME: Vec2 = Vec2::new(80.0, 39.0);
    pub const ENEMY_FPS: f32 = 6.0;
    pub const ENEMY_FRAMES: &[u16] = &[0, 1, 2, 3, 2, 1];

    pub const EXPLOSION_OFFSET: Vec2 = Vec2::new(0.0, 117.0);
    pub const EXPLOSION_FRAME: Vec2 = Vec2::new(39.0, 39.0);
    pub const EXPLOSION_FPS: f32 = 16.0;
    pub const EXPLOSION_FRAMES: &[u16] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// An enemy reached the player; waiting for "play again"
    GameOver,
}

/// Facing of a player or bullet (render rotation only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Left,
    Down,
    #[default]
    Right,
}

impl Direction {
    /// Rotation applied to right-facing art, in radians
    pub fn rotation(&self) -> f32 {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            Direction::Up => -FRAC_PI_2,
            Direction::Left => PI,
            Direction::Down => FRAC_PI_2,
            Direction::Right => 0.0,
        }
    }
}

/// Anything placed on the field as a box
pub trait Entity {
    /// Top-left corner
    fn pos(&self) -> Vec2;
    fn size(&self) -> Vec2;

    fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos(), self.size())
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub direction: Direction,
    pub sprite: Sprite,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            direction: Direction::Right,
            sprite: Sprite::animated(
                sheet::PLAYER_OFFSET,
                sheet::PLAYER_FRAME,
                sheet::PLAYER_FPS,
                sheet::PLAYER_FRAMES,
            )
            .with_layout(sheet::LAYOUT),
        }
    }
}

impl Player {
    /// Box used for bounds-clamping and collision
    pub fn hitbox_size(&self, hitbox: PlayerHitbox) -> Vec2 {
        match hitbox {
            PlayerHitbox::SpriteFrame => self.sprite.frame_size,
            PlayerHitbox::DisplayBox => Vec2::from_array(PLAYER_DISPLAY_SIZE),
        }
    }

    pub fn hitbox(&self, hitbox: PlayerHitbox) -> Rect {
        Rect::from_pos_size(self.pos, self.hitbox_size(hitbox))
    }

    /// Center of the sprite frame (bullet muzzle)
    pub fn muzzle(&self) -> Vec2 {
        self.pos + self.sprite.frame_size / 2.0
    }
}

impl Entity for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.sprite.frame_size
    }
}

/// A player bullet travelling right
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub direction: Direction,
}

impl Bullet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            direction: Direction::default(),
        }
    }
}

impl Entity for Bullet {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    /// All bullets share one sprite
    fn size(&self) -> Vec2 {
        sheet::BULLET_FRAME
    }
}

/// An enemy flying left
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub sprite: Sprite,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            sprite: Sprite::animated(
                sheet::ENEMY_OFFSET,
                sheet::ENEMY_FRAME,
                sheet::ENEMY_FPS,
                sheet::ENEMY_FRAMES,
            )
            .with_layout(sheet::LAYOUT),
        }
    }
}

impl Entity for Enemy {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.sprite.frame_size
    }
}

/// A one-shot explosion left where an enemy was destroyed
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub sprite: Sprite,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            sprite: Sprite::animated(
                sheet::EXPLOSION_OFFSET,
                sheet::EXPLOSION_FRAME,
                sheet::EXPLOSION_FPS,
                sheet::EXPLOSION_FRAMES,
            )
            .with_layout(sheet::LAYOUT)
            .once(),
        }
    }
}

impl Entity for Explosion {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.sprite.frame_size
    }
}

/// Things that happened during a step, drained by the lifecycle controller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BulletFired,
    EnemySpawned { pos: Vec2 },
    EnemyDestroyed { pos: Vec2 },
    /// Playing -> GameOver
    GameOver { game_time: f32 },
    /// GameOver/startup -> Playing
    Reset,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub config: Config,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds of play since the last reset
    pub game_time: f32,
    /// Simulation step counter (never reset)
    pub time_ticks: u64,
    /// Seconds since the last shot (never reset)
    pub since_last_fire: f32,
    pub player: Player,
    /// Shared sprite for every bullet
    pub bullet_sprite: Sprite,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state, already reset into `Playing`
    pub fn new(config: Config, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            game_time: 0.0,
            time_ticks: 0,
            since_last_fire: config.fire_interval,
            player: Player::default(),
            bullet_sprite: Sprite::new(sheet::BULLET_OFFSET, sheet::BULLET_FRAME),
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            config,
        };

        state.reset();

        state
    }

    /// Random source for spawning
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Canonical player box under the configured hitbox mode
    pub fn player_hitbox(&self) -> Rect {
        self.player.hitbox(self.config.player_hitbox)
    }

    /// Enter `Playing` with a cleared field
    ///
    /// Explosions keep animating unless `clear_explosions_on_reset` is set.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.game_time = 0.0;

        self.enemies.clear();
        self.bullets.clear();
        if self.config.clear_explosions_on_reset {
            self.explosions.clear();
        }

        self.player.pos = Vec2::new(PLAYER_START_X, self.config.canvas_height / 2.0);
        self.events.push(GameEvent::Reset);
    }

    /// Playing -> GameOver. Returns false (and does nothing) if already over.
    pub fn enter_game_over(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::GameOver;
                self.events.push(GameEvent::GameOver {
                    game_time: self.game_time,
                });
                true
            }
            GamePhase::GameOver => false,
        }
    }

    /// Explosion where an enemy used to be
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        self.explosions.push(Explosion::new(pos));
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
