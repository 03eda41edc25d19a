//! Game tuning and behavior switches
//!
//! Read as JSON from LocalStorage on web or from the file named by
//! `SPRITE_SHOOTER_CONFIG` on native. Missing fields take defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the per-step spawn chance relates to the step length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum SpawnPolicy {
    /// `1 - 0.993^game_time` used directly as the chance for every step,
    /// so faster frame rates spawn more often
    #[default]
    PerFrame,
    /// The per-frame chance is treated as belonging to a `reference_hz`
    /// frame and rescaled to the actual step length
    RateNormalized { reference_hz: f32 },
    /// No enemies (debug/testing)
    Disabled,
}

/// Which box stands for the player in bounds-clamping and collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayerHitbox {
    /// The 39x39 animation frame
    #[default]
    SpriteFrame,
    /// The declared 100x100 display box
    DisplayBox,
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Play field ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Speeds (pixels per second) ===
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub enemy_speed: f32,

    // === Rules ===
    /// Seconds between shots while fire is held
    pub fire_interval: f32,
    pub spawn_policy: SpawnPolicy,
    pub player_hitbox: PlayerHitbox,
    /// Drop explosions still animating when the game resets
    pub clear_explosions_on_reset: bool,

    // === Frame pacing ===
    /// Upper bound on a single frame delta (None = unbounded)
    pub max_frame_dt: Option<f32>,

    /// Fixed RNG seed (None = seeded from the clock)
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            enemy_speed: ENEMY_SPEED,

            fire_interval: FIRE_INTERVAL,
            spawn_policy: SpawnPolicy::PerFrame,
            player_hitbox: PlayerHitbox::SpriteFrame,
            clear_explosions_on_reset: false,

            max_frame_dt: Some(MAX_FRAME_DT),

            seed: None,
        }
    }
}

impl Config {
    /// Canvas dimensions as a vector
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }

    /// Clamp a raw frame delta to the configured bound
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        match self.max_frame_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Parse from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key holding the config JSON
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "sprite_shooter_config";
    /// Environment variable naming the native config file
    pub const ENV_VAR: &'static str = "SPRITE_SHOOTER_CONFIG";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from the file named by `SPRITE_SHOOTER_CONFIG`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };
        match Self::load_file(std::path::Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }
}
