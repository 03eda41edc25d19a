//! Sprite-sheet animation state
//!
//! A sprite is a window onto the shared sheet image:
//! - sheet_offset: top-left of frame 0 on the sheet
//! - frame_size: size of one frame (also the entity's collision size)
//! - speed: frames per second (0 = static frame)
//! - frames: index sequence played in order, wrapping unless `once`

use glam::Vec2;

use super::collision::Rect;

/// Direction in which successive frames are laid out on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetLayout {
    #[default]
    Horizontal,
    Vertical,
}

/// Animation phase of one entity
#[derive(Debug, Clone)]
pub struct Sprite {
    pub sheet_offset: Vec2,
    pub frame_size: Vec2,
    /// Frames per second
    pub speed: f32,
    pub frames: &'static [u16],
    pub layout: SheetLayout,
    /// Play the sequence a single time then report finished
    pub once: bool,
    index: f32,
    finished: bool,
}

impl Sprite {
    /// Static single-frame sprite
    pub fn new(sheet_offset: Vec2, frame_size: Vec2) -> Self {
        Self {
            sheet_offset,
            frame_size,
            speed: 0.0,
            frames: &[],
            layout: SheetLayout::Horizontal,
            once: false,
            index: 0.0,
            finished: false,
        }
    }

    /// Looping animation over `frames` at `speed` frames per second
    pub fn animated(
        sheet_offset: Vec2,
        frame_size: Vec2,
        speed: f32,
        frames: &'static [u16],
    ) -> Self {
        Self {
            speed,
            frames,
            ..Self::new(sheet_offset, frame_size)
        }
    }

    /// Make the sequence non-looping
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn with_layout(mut self, layout: SheetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Advance the animation clock by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        self.index += self.speed * dt;
        let len = self.frames.len();
        if self.once {
            if self.frame_step() >= len {
                self.finished = true;
            }
        } else if len > 0 {
            // Stay small so f32 steps keep registering in long sessions
            self.index = self.index.rem_euclid(len as f32);
        }
    }

    /// True once a non-looping sequence has played through (never for looping sprites)
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Sheet frame currently shown
    pub fn current_frame(&self) -> u16 {
        if self.speed <= 0.0 || self.frames.is_empty() {
            return 0;
        }
        let step = self.frame_step();
        if self.once && step >= self.frames.len() {
            // Hold the last frame
            return self.frames[self.frames.len() - 1];
        }
        self.frames[step % self.frames.len()]
    }

    /// Rectangle on the sheet covering the current frame
    pub fn source_rect(&self) -> Rect {
        let frame = self.current_frame() as f32;
        let offset = match self.layout {
            SheetLayout::Horizontal => Vec2::new(frame * self.frame_size.x, 0.0),
            SheetLayout::Vertical => Vec2::new(0.0, frame * self.frame_size.y),
        };
        Rect::from_pos_size(self.sheet_offset + offset, self.frame_size)
    }

    fn frame_step(&self) -> usize {
        self.index.max(0.0).floor() as usize
    }
}
