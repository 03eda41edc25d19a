//! Sprite Shooter entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlImageElement};

    use sprite_shooter::consts::*;
    use sprite_shooter::platform::web::{
        DomGameOverUi, WebCanvas, install_keyboard, load_images, on_click,
    };
    use sprite_shooter::platform::{AssetCache, KeySet};
    use sprite_shooter::renderer::FrameImages;
    use sprite_shooter::sim::TickInput;
    use sprite_shooter::{Config, FrameDriver};

    /// Everything the animation frame callback needs
    struct Game {
        driver: FrameDriver<DomGameOverUi>,
        canvas: WebCanvas,
        keys: Rc<RefCell<KeySet>>,
        sheet: HtmlImageElement,
        terrain: HtmlImageElement,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        // Already initialized on a hot reload
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Sprite Shooter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = Config::load();
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let canvas = WebCanvas::create(
            &document,
            config.canvas_width as u32,
            config.canvas_height as u32,
        )?;

        let keys = Rc::new(RefCell::new(KeySet::default()));
        install_keyboard(keys.clone())?;

        // Game starts once both images have decoded
        let assets = Rc::new(RefCell::new(AssetCache::<HtmlImageElement>::new()));
        load_images(&assets, &[SPRITE_SHEET, TERRAIN])?;
        assets.borrow_mut().on_ready(move |assets| {
            let (Some(sheet), Some(terrain)) = (
                assets.get(SPRITE_SHEET).cloned(),
                assets.get(TERRAIN).cloned(),
            ) else {
                log::error!("Assets reported ready without images");
                return;
            };
            let game = Game {
                driver: FrameDriver::new(config, seed, DomGameOverUi::new(&document)),
                canvas,
                keys,
                sheet,
                terrain,
            };
            start(&document, Rc::new(RefCell::new(game)));
        });

        Ok(())
    }

    fn start(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let result = on_click(document, DomGameOverUi::PLAY_AGAIN_ID, move || {
                game.borrow_mut().driver.play_again();
            });
            if let Err(e) = result {
                log::error!("Could not wire play-again button: {:?}", e);
            }
        }

        log::info!("Sprite Shooter running!");
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            let input = TickInput::from_keyboard(&*g.keys.borrow());
            let images = FrameImages {
                sheet: &g.sheet,
                terrain: &g.terrain,
            };
            g.driver.frame(time, &input, &mut g.canvas, images);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Length of the native headless run, in seconds
#[cfg(not(target_arch = "wasm32"))]
const SECONDS_VAR: &str = "SPRITE_SHOOTER_SECONDS";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sprite_shooter::consts::{SPRITE_SHEET, TERRAIN};
    use sprite_shooter::platform::{Key, KeySet};
    use sprite_shooter::renderer::{CommandCanvas, FrameImages};
    use sprite_shooter::sim::{GameEvent, HeadlessUi, TickInput};
    use sprite_shooter::{Config, FrameDriver};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sprite Shooter (native, headless) starting...");

    let config = Config::load();
    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let seconds: f64 = std::env::var(SECONDS_VAR)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10.0);

    let mut driver = FrameDriver::new(config, seed, HeadlessUi::default());
    let mut canvas = CommandCanvas::default();
    let images = FrameImages {
        sheet: &SPRITE_SHEET,
        terrain: &TERRAIN,
    };

    // Scripted pilot: fire held, weaving up and down every half second
    let mut keys = KeySet::default();
    keys.press(Key::Space);

    let frame_ms = 1000.0 / 60.0;
    let total_frames = (seconds * 60.0).round().max(0.0) as u64;
    let mut game_over_at: Option<f64> = None;
    let (mut shots, mut kills, mut game_overs) = (0u32, 0u32, 0u32);

    for frame in 0..total_frames {
        let now = frame as f64 * frame_ms;
        let going_up = (now / 500.0) as u64 % 2 == 0;
        keys.set(Key::Up, going_up);
        keys.set(Key::Down, !going_up);

        canvas.clear();
        let input = TickInput::from_keyboard(&keys);
        for event in driver.frame(now, &input, &mut canvas, images) {
            match event {
                GameEvent::BulletFired => shots += 1,
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::GameOver { game_time } => {
                    game_overs += 1;
                    game_over_at = Some(now);
                    log::info!("Survived {:.1}s", game_time);
                }
                _ => {}
            }
        }

        // Press "play again" a second after losing
        if game_over_at.is_some_and(|at| now - at >= 1000.0) {
            driver.play_again();
            game_over_at = None;
        }
    }

    log::info!(
        "Ran {} frames at {} fps: {} shots, {} enemies destroyed, {} game overs, {} draw calls in last frame",
        driver.frames(),
        driver.fps(),
        shots,
        kills,
        game_overs,
        canvas.draws().count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
