//! Browser bindings
//!
//! Canvas 2D drawing, the game-over panel, keyboard listeners and image
//! loading. Everything here talks to the DOM through web-sys.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
};

use super::assets::AssetCache;
use super::input::{Key, KeySet};
use crate::renderer::Canvas;
use crate::sim::{GameOverUi, Rect};

/// `Canvas` over a CanvasRenderingContext2d
pub struct WebCanvas {
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Create a `width x height` canvas and append it to the body
    pub fn create(document: &Document, width: u32, height: u32) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(width);
        canvas.set_height(height);
        if let Some(body) = document.body() {
            body.append_child(&canvas)?;
        }
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Canvas for WebCanvas {
    type Image = HtmlImageElement;

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = self.ctx.rotate(radians as f64);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, src: Rect, dest: Rect) {
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                src.left as f64,
                src.top as f64,
                src.width() as f64,
                src.height() as f64,
                dest.left as f64,
                dest.top as f64,
                dest.width() as f64,
                dest.height() as f64,
            );
    }

    fn fill_pattern(&mut self, image: &HtmlImageElement, area: Rect) {
        match self.ctx.create_pattern_with_html_image_element(image, "repeat") {
            Ok(Some(pattern)) => {
                self.ctx.set_fill_style_canvas_pattern(&pattern);
                self.ctx.fill_rect(
                    area.left as f64,
                    area.top as f64,
                    area.width() as f64,
                    area.height() as f64,
                );
            }
            _ => log::warn!("Could not create terrain pattern"),
        }
    }
}

/// Game-over panel (`#game-over`) and its overlay (`#game-over-overlay`)
pub struct DomGameOverUi {
    elements: Vec<HtmlElement>,
}

impl DomGameOverUi {
    pub const PANEL_ID: &'static str = "game-over";
    pub const OVERLAY_ID: &'static str = "game-over-overlay";
    pub const PLAY_AGAIN_ID: &'static str = "play-again";

    /// Look up both elements; missing ones are skipped with a warning
    pub fn new(document: &Document) -> Self {
        let elements = [Self::PANEL_ID, Self::OVERLAY_ID]
            .into_iter()
            .filter_map(|id| {
                let element = document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                if element.is_none() {
                    log::warn!("Missing #{} element", id);
                }
                element
            })
            .collect();
        Self { elements }
    }

    fn set_display(&self, display: &str) {
        for element in &self.elements {
            let _ = element.style().set_property("display", display);
        }
    }
}

impl GameOverUi for DomGameOverUi {
    fn show_game_over(&mut self) {
        self.set_display("block");
    }

    fn hide_game_over(&mut self) {
        self.set_display("none");
    }
}

/// Keep `keys` in sync with keydown/keyup; drop everything on blur
pub fn install_keyboard(keys: Rc<RefCell<KeySet>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    for (event_name, down) in [("keydown", true), ("keyup", false)] {
        let keys = keys.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(key) = Key::from_dom_key(&event.key()) {
                // Arrows and space would scroll the page
                event.prevent_default();
                keys.borrow_mut().set(key, down);
            }
        });
        window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
        keys.borrow_mut().clear();
    });
    window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
    closure.forget();

    Ok(())
}

/// Call `on_click` whenever the element with `id` is clicked
pub fn on_click(
    document: &Document,
    id: &str,
    mut on_click: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let Some(element) = document.get_element_by_id(id) else {
        log::warn!("Missing #{} element", id);
        return Ok(());
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| on_click());
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Fetch every identifier `cache` has not seen yet as an `HtmlImageElement`
pub fn load_images(
    cache: &Rc<RefCell<AssetCache<HtmlImageElement>>>,
    urls: &[&str],
) -> Result<(), JsValue> {
    let new_urls = cache.borrow_mut().load(urls);
    for url in new_urls {
        let image = HtmlImageElement::new()?;

        let onload = {
            let cache = cache.clone();
            let image = image.clone();
            let url = url.clone();
            Closure::once(move || cache.borrow_mut().insert(&url, image))
        };
        let onerror = {
            let cache = cache.clone();
            let url = url.clone();
            Closure::once(move || cache.borrow_mut().mark_failed(&url))
        };
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();

        image.set_src(&url);
    }
    Ok(())
}
