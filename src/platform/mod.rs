//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard state
//! - Image assets
//! - Canvas, DOM and LocalStorage access (web only)

pub mod assets;
pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use assets::AssetCache;
pub use input::{Key, KeySet, KeyboardState};
