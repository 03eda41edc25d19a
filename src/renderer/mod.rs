//! 2D canvas rendering
//!
//! Draws a `GameState` through an immediate-mode canvas. Each entity is drawn
//! inside a save/translate/restore bracket so sprites render at the origin.

pub mod recording;

pub use recording::{CommandCanvas, DrawCommand};

use glam::Vec2;

use crate::sim::{Entity, GameState, Rect, Sprite};

/// Immediate-mode drawing surface (CanvasRenderingContext2d shaped)
pub trait Canvas {
    /// Decoded image handle
    type Image;

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    /// Copy `src` from `image` into `dest` (in the current transform)
    fn draw_image(&mut self, image: &Self::Image, src: Rect, dest: Rect);
    /// Tile `image` over `area`
    fn fill_pattern(&mut self, image: &Self::Image, area: Rect);
}

impl Sprite {
    /// Draw the current frame at the canvas origin
    pub fn render<C: Canvas>(&self, canvas: &mut C, sheet: &C::Image) {
        if self.finished() {
            return;
        }
        let dest = Rect::from_pos_size(Vec2::ZERO, self.frame_size);
        canvas.draw_image(sheet, self.source_rect(), dest);
    }
}

/// Images the frame is drawn from
pub struct FrameImages<'a, I> {
    pub sheet: &'a I,
    pub terrain: &'a I,
}

// Copy/Clone by hand: derive would require `I: Copy`
impl<I> Clone for FrameImages<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for FrameImages<'_, I> {}

fn draw_at<C: Canvas>(canvas: &mut C, pos: Vec2, draw: impl FnOnce(&mut C)) {
    canvas.save();
    canvas.translate(pos);
    draw(canvas);
    canvas.restore();
}

/// Draw everything: terrain, player (unless game over), bullets, enemies,
/// explosions
pub fn render_frame<C: Canvas>(
    state: &GameState,
    canvas: &mut C,
    images: FrameImages<'_, C::Image>,
) {
    let field = Rect::from_pos_size(Vec2::ZERO, state.config.canvas_size());
    canvas.fill_pattern(images.terrain, field);

    if !state.is_game_over() {
        draw_at(canvas, state.player.pos(), |c| {
            state.player.sprite.render(c, images.sheet)
        });
    }

    for bullet in &state.bullets {
        draw_at(canvas, bullet.pos(), |c| {
            let rotation = bullet.direction.rotation();
            if rotation != 0.0 {
                c.rotate(rotation);
            }
            state.bullet_sprite.render(c, images.sheet);
        });
    }

    for enemy in &state.enemies {
        draw_at(canvas, enemy.pos(), |c| enemy.sprite.render(c, images.sheet));
    }

    for explosion in &state.explosions {
        draw_at(canvas, explosion.pos(), |c| {
            explosion.sprite.render(c, images.sheet)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SpawnPolicy};
    use crate::consts::{SPRITE_SHEET, TERRAIN};
    use crate::sim::{Bullet, Direction, Enemy, Explosion};

    const IMAGES: FrameImages<'static, &'static str> = FrameImages {
        sheet: &SPRITE_SHEET,
        terrain: &TERRAIN,
    };

    fn state() -> GameState {
        let config = Config {
            spawn_policy: SpawnPolicy::Disabled,
            ..Config::default()
        };
        GameState::new(config, 1)
    }

    #[test]
    fn test_draw_order() {
        let mut state = state();
        state.bullets.push(Bullet::new(Vec2::new(100.0, 100.0)));
        state.enemies.push(Enemy::new(Vec2::new(300.0, 50.0)));
        state.explosions.push(Explosion::new(Vec2::new(200.0, 200.0)));

        let mut canvas = CommandCanvas::default();
        render_frame(&state, &mut canvas, IMAGES);

        assert!(matches!(
            canvas.commands.first(),
            Some(DrawCommand::FillPattern { image: TERRAIN, .. })
        ));
        let origins: Vec<Vec2> = canvas.draws().map(|(origin, _)| origin).collect();
        assert_eq!(
            origins,
            vec![
                Vec2::new(50.0, 240.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(300.0, 50.0),
                Vec2::new(200.0, 200.0),
            ]
        );
        assert!(canvas.is_balanced());
    }

    #[test]
    fn test_player_hidden_after_game_over() {
        let mut state = state();
        state.enter_game_over();
        let mut canvas = CommandCanvas::default();
        render_frame(&state, &mut canvas, IMAGES);
        assert_eq!(canvas.draws().count(), 0);
    }

    #[test]
    fn test_bullet_rotation_by_direction() {
        let mut state = state();
        let mut up = Bullet::new(Vec2::new(10.0, 10.0));
        up.direction = Direction::Up;
        state.bullets.push(up);
        state.bullets.push(Bullet::new(Vec2::new(20.0, 20.0)));

        let mut canvas = CommandCanvas::default();
        render_frame(&state, &mut canvas, IMAGES);
        let rotations: Vec<f32> = canvas
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rotate(r) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(rotations, vec![-std::f32::consts::FRAC_PI_2]);
    }

    #[test]
    fn test_sprite_source_frames() {
        let mut state = state();
        state.enemies.push(Enemy::new(Vec2::new(300.0, 50.0)));
        // 0.5s at 6 fps -> sequence step 3 -> sheet frame 3
        state.enemies[0].sprite.advance(0.5);

        let mut canvas = CommandCanvas::default();
        render_frame(&state, &mut canvas, IMAGES);
        let (_, src) = canvas.draws().nth(1).unwrap();
        assert_eq!(src, Rect::new(240.0, 78.0, 320.0, 117.0));
    }
}
