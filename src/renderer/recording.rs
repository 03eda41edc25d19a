//! Recording canvas
//!
//! Stores draw calls instead of rasterizing them. Used by the native headless
//! loop and by render tests.

use glam::Vec2;

use super::Canvas;
use crate::sim::Rect;

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    DrawImage {
        image: &'static str,
        src: Rect,
        /// Destination with the accumulated translation applied
        dest: Rect,
    },
    FillPattern {
        image: &'static str,
        area: Rect,
    },
}

/// Canvas that images are asset identifiers for
#[derive(Debug, Clone, Default)]
pub struct CommandCanvas {
    pub commands: Vec<DrawCommand>,
    offset: Vec2,
    saved: Vec<Vec2>,
}

impl CommandCanvas {
    /// Forget the recorded frame
    pub fn clear(&mut self) {
        self.commands.clear();
        self.offset = Vec2::ZERO;
        self.saved.clear();
    }

    /// Image draws as (destination origin, source rect)
    pub fn draws(&self) -> impl Iterator<Item = (Vec2, Rect)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::DrawImage { src, dest, .. } => Some((dest.origin(), *src)),
            _ => None,
        })
    }

    /// Every save has a matching restore
    pub fn is_balanced(&self) -> bool {
        let mut depth: i32 = 0;
        for command in &self.commands {
            match command {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Canvas for CommandCanvas {
    type Image = &'static str;

    fn save(&mut self) {
        self.saved.push(self.offset);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
        self.commands.push(DrawCommand::Translate(offset));
    }

    // Rotation is recorded but not folded into `offset`
    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn draw_image(&mut self, image: &Self::Image, src: Rect, dest: Rect) {
        let size = Vec2::new(dest.width(), dest.height());
        let dest = Rect::from_pos_size(dest.origin() + self.offset, size);
        self.commands.push(DrawCommand::DrawImage {
            image: *image,
            src,
            dest,
        });
    }

    fn fill_pattern(&mut self, image: &Self::Image, area: Rect) {
        self.commands.push(DrawCommand::FillPattern {
            image: *image,
            area,
        });
    }
}
