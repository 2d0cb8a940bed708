//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes from the host, never from a wall clock
//! - No DOM or platform dependencies

pub mod controller;
pub mod difficulty;
pub mod evasion;
pub mod state;
pub mod timers;

pub use controller::{ClickTarget, GameController};
pub use difficulty::{
    DEFAULT_BANDS, DifficultyBand, DifficultyError, DifficultyParams, DifficultyTable,
    difficulty_for_level,
};
pub use evasion::{CARDINAL_ANGLES, clamp_to_container, evade, max_position, pick_angle, pick_distance};
pub use state::{Feedback, GameEvent, GamePhase, GameState, Geometry, RngState};
pub use timers::{Task, TimerId, TimerQueue};
