//! Browser bindings
//!
//! Thin `wasm_bindgen` wrapper around `GameController`. The page measures the
//! DOM, forwards events with `performance.now()`, and arms one `setTimeout`
//! for `next_deadline()`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::{Settings, SettingsError};
use crate::sim::{ClickTarget, GameController};

/// Installs the panic hook and console logger when the module loads
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Layout Shift starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    inner: GameController,
}

#[wasm_bindgen]
impl WebGame {
    /// New game seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        WebGame {
            inner: GameController::new(seed),
        }
    }

    /// New game with JSON settings and an explicit seed
    pub fn with_settings(settings_json: &str, seed: u64) -> Result<WebGame, JsValue> {
        let to_js = |e: SettingsError| JsValue::from_str(&e.to_string());
        let settings = Settings::from_json(settings_json).map_err(to_js)?;
        let inner = GameController::with_settings(settings, seed).map_err(to_js)?;
        Ok(WebGame { inner })
    }

    pub fn resize(&mut self, container_w: f32, container_h: f32, button_w: f32, button_h: f32) {
        self.inner
            .on_resize(Vec2::new(container_w, container_h), Vec2::new(button_w, button_h));
    }

    pub fn button_hover(&mut self, now_ms: f64) {
        self.inner.on_button_hover(to_ms(now_ms));
    }

    pub fn button_click(&mut self, now_ms: f64) {
        self.inner.on_button_click(to_ms(now_ms));
    }

    /// `on_button` is true when the event target was the button itself
    pub fn container_click(&mut self, on_button: bool, now_ms: f64) {
        let target = if on_button {
            ClickTarget::Button
        } else {
            ClickTarget::Container
        };
        self.inner.on_container_click(target, to_ms(now_ms));
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.inner.reset(to_ms(now_ms));
    }

    pub fn teardown(&mut self) {
        self.inner.teardown();
    }

    /// Fire due timers; returns true if anything changed
    pub fn advance(&mut self, now_ms: f64) -> bool {
        self.inner.advance_to(to_ms(now_ms)) > 0
    }

    /// Next timer deadline in ms, or -1 when idle
    pub fn next_deadline(&self) -> f64 {
        self.inner.next_deadline().map(|d| d as f64).unwrap_or(-1.0)
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f32 {
        self.inner.position().x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f32 {
        self.inner.position().y
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> u32 {
        self.inner.state().level
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.inner.state().score
    }

    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.state().attempts
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.inner.state().game_active
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.inner.state().message.clone()
    }

    /// "hit", "miss" or empty
    #[wasm_bindgen(getter)]
    pub fn feedback(&self) -> String {
        self.inner
            .feedback()
            .map(|f| f.as_str().to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn moving(&self) -> bool {
        self.inner.is_moving()
    }

    /// Events since the last call, as JSON
    pub fn drain_events(&mut self) -> String {
        let events = self.inner.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Failed to encode events: {:?}", e);
            "[]".to_string()
        })
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_ms(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as u64
    } else {
        0
    }
}
