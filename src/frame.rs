//! Frame driver
//!
//! Turns host timestamps into simulation steps: measures the delta since the
//! previous frame, clamps it, steps the lifecycle and draws the result.

use crate::config::Config;
use crate::renderer::{Canvas, FrameImages, render_frame};
use crate::sim::{GameEvent, GameOverUi, GameState, Lifecycle, TickInput};

const FPS_SAMPLES: usize = 60;

/// Per-frame pacing around a `Lifecycle`
pub struct FrameDriver<U: GameOverUi> {
    lifecycle: Lifecycle<U>,
    /// Timestamp of the previous frame (ms)
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_SAMPLES],
    frame_index: usize,
    fps: u32,
    frames: u64,
}

impl<U: GameOverUi> FrameDriver<U> {
    pub fn new(config: Config, seed: u64, ui: U) -> Self {
        Self::from_lifecycle(Lifecycle::new(config, seed, ui))
    }

    pub fn from_lifecycle(lifecycle: Lifecycle<U>) -> Self {
        Self {
            lifecycle,
            last_time: None,
            frame_times: [0.0; FPS_SAMPLES],
            frame_index: 0,
            fps: 0,
            frames: 0,
        }
    }

    /// Step the simulation for a frame at `now_ms`
    ///
    /// The first frame steps with `dt = 0`. A clock that runs backwards also
    /// yields 0.
    pub fn advance(&mut self, now_ms: f64, input: &TickInput) -> Vec<GameEvent> {
        let raw = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        let dt = self.lifecycle.state().config.clamp_dt(raw);

        self.track_fps(now_ms);
        self.frames += 1;

        self.lifecycle.step(input, dt)
    }

    /// Step, then draw the new state
    pub fn frame<C: Canvas>(
        &mut self,
        now_ms: f64,
        input: &TickInput,
        canvas: &mut C,
        images: FrameImages<'_, C::Image>,
    ) -> Vec<GameEvent> {
        let events = self.advance(now_ms, input);
        render_frame(self.lifecycle.state(), canvas, images);
        events
    }

    /// "Play again" pressed
    pub fn play_again(&mut self) -> bool {
        self.lifecycle.play_again()
    }

    pub fn state(&self) -> &GameState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &Lifecycle<U> {
        &self.lifecycle
    }

    pub fn lifecycle_mut(&mut self) -> &mut Lifecycle<U> {
        &mut self.lifecycle
    }

    /// Frames per second over the last 60 frames (0 until the ring fills)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames driven so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn track_fps(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_SAMPLES;

        // Oldest sample is the one about to be overwritten
        if self.frames + 1 < FPS_SAMPLES as u64 {
            return;
        }
        let elapsed = now_ms - self.frame_times[self.frame_index];
        if elapsed > 0.0 {
            self.fps = ((FPS_SAMPLES - 1) as f64 * 1000.0 / elapsed).round() as u32;
        }
    }
}
