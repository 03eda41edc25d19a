//! Sprite Shooter - a side-scrolling sprite-sheet arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, game state)
//! - `renderer`: 2D canvas drawing of a simulation snapshot
//! - `platform`: Keyboard state, asset cache and browser bindings
//! - `config`: Data-driven game tuning
//! - `frame`: Frame driver pacing simulation and render

pub mod config;
pub mod frame;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{Config, PlayerHitbox, SpawnPolicy};
pub use frame::FrameDriver;

/// Game configuration constants
pub mod consts {
    /// Drawing surface dimensions
    pub const CANVAS_WIDTH: f32 = 512.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Speeds in pixels per second
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const BULLET_SPEED: f32 = 500.0;
    pub const ENEMY_SPEED: f32 = 100.0;

    /// Minimum seconds between two shots while fire is held
    pub const FIRE_INTERVAL: f32 = 0.1;

    /// Base of the difficulty curve: spawn chance is `1 - SPAWN_BASE^game_time`
    pub const SPAWN_BASE: f32 = 0.993;

    /// Player start/reset position (y is half the canvas height)
    pub const PLAYER_START_X: f32 = 50.0;

    /// Player's declared display box, larger than its sprite frame
    pub const PLAYER_DISPLAY_SIZE: [f32; 2] = [100.0, 100.0];

    /// Largest frame delta fed to the simulation by default (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Asset identifiers
    pub const SPRITE_SHEET: &str = "img/sprites.png";
    pub const TERRAIN: &str = "img/terrain.png";
}
