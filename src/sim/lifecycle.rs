//! Playing / GameOver state machine
//!
//! `Lifecycle` owns the `GameState`, runs steps through it and mirrors phase
//! changes onto the game-over UI. The only way back to `Playing` is
//! `play_again`.

use super::state::{GameEvent, GamePhase, GameState};
use super::tick::{TickInput, tick};
use crate::config::Config;

/// Visibility of the game-over panel and its overlay
pub trait GameOverUi {
    fn show_game_over(&mut self);
    fn hide_game_over(&mut self);
}

/// UI stand-in that only remembers what it was told
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    pub visible: bool,
    pub times_shown: u32,
}

impl GameOverUi for HeadlessUi {
    fn show_game_over(&mut self) {
        self.visible = true;
        self.times_shown += 1;
    }

    fn hide_game_over(&mut self) {
        self.visible = false;
    }
}

/// Owner of the game state and its phase transitions
pub struct Lifecycle<U: GameOverUi> {
    state: GameState,
    ui: U,
}

impl<U: GameOverUi> Lifecycle<U> {
    /// Start a run in `Playing` with the panel hidden
    pub fn new(config: Config, seed: u64, mut ui: U) -> Self {
        ui.hide_game_over();
        let mut state = GameState::new(config, seed);
        state.drain_events();
        log::info!("Game started with seed {}", seed);
        Self { state, ui }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Advance one step and apply any transition it caused
    pub fn step(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt);

        let events = self.state.drain_events();
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
        {
            self.ui.show_game_over();
        }
        events
    }

    /// GameOver -> Playing. Ignored while still playing.
    pub fn play_again(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return false;
        }
        self.ui.hide_game_over();
        self.state.reset();
        self.state.drain_events();
        log::info!("Game reset");
        true
    }
}
