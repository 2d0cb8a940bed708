//! Layout Shift - catch the evasive button
//!
//! Core modules:
//! - `sim`: Deterministic game core (difficulty, evasion, state machine, timers)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `web`: `wasm_bindgen` facade for the host page (wasm32 only)

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{Settings, SettingsError};
pub use sim::{GameController, GameState};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Gap kept between the button and every container edge (pixels)
    pub const PADDING: f32 = 8.0;

    /// Delay between a hit and the level advance (ms)
    pub const LEVEL_ADVANCE_DELAY_MS: u64 = 1000;
    /// How long the miss flash stays up (ms)
    pub const MISS_FEEDBACK_MS: u64 = 300;

    /// Button size used until the host measures the real one
    pub const DEFAULT_BUTTON_WIDTH: f32 = 100.0;
    pub const DEFAULT_BUTTON_HEIGHT: f32 = 50.0;

    /// Evasion distance is `range * [MIN_DISTANCE_FACTOR, 1.0)`
    pub const MIN_DISTANCE_FACTOR: f32 = 0.5;

    pub const START_MESSAGE: &str = "Try to click the button!";
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Top-left position that centers `inner` inside `outer`.
///
/// Sizes are `(width, height)` packed in a `Vec2`. The result is not clamped:
/// a button wider than its container gets a negative offset, same as the page
/// layout would produce.
#[inline]
pub fn centered_in(outer: Vec2, inner: Vec2) -> Vec2 {
    outer / 2.0 - inner / 2.0
}
