//! Simulation module
//!
//! All gameplay logic lives here:
//! - Caller-measured timestep
//! - Seeded RNG only
//! - Insertion-ordered entity collections
//! - No rendering or platform dependencies beyond the keyboard query trait

pub mod collision;
pub mod lifecycle;
pub mod spawner;
pub mod sprite;
pub mod state;
pub mod tick;

pub use collision::{Rect, box_collides, collides};
pub use lifecycle::{GameOverUi, HeadlessUi, Lifecycle};
pub use spawner::{frame_spawn_chance, maybe_spawn, spawn_probability};
pub use sprite::{SheetLayout, Sprite};
pub use state::{
    Bullet, Direction, Enemy, Entity, Explosion, GameEvent, GamePhase, GameState, Player,
};
pub use tick::{TickInput, clamp_player, resolve_collisions, tick};
