//! Game state and core types
//!
//! Everything the host reads back for display lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::centered_in;
use crate::consts::START_MESSAGE;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Button is live and evading
    Playing,
    /// Button was caught, waiting for the next level to start
    LevelTransition,
}

/// Transient hit/miss flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Hit,
    Miss,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Hit => "hit",
            Feedback::Miss => "miss",
        }
    }
}

/// Things that happened, drained by the host after each call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hit { level: u32, score: u32 },
    Miss { attempts: u32 },
    MoveScheduled { delay_ms: u64 },
    Moved { from: Vec2, to: Vec2 },
    LevelUp { level: u32 },
    FeedbackCleared,
    Recentered { pos: Vec2 },
    Reset,
}

/// Player-visible progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current level (starts at 1)
    pub level: u32,
    /// Successful clicks this run
    pub score: u32,
    /// Misses on the current level
    pub attempts: u32,
    /// Whether clicks and hovers are accepted
    pub game_active: bool,
    /// Status line shown under the play area
    pub message: String,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            attempts: 0,
            game_active: true,
            message: START_MESSAGE.to_string(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Measured container and button sizes (width, height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub container: Vec2,
    pub button: Vec2,
}

impl Geometry {
    pub fn new(container: Vec2, button: Vec2) -> Self {
        Self { container, button }
    }

    /// Top-left that centers the button in the container
    pub fn center(&self) -> Vec2 {
        centered_in(self.container, self.button)
    }
}

/// RNG seed record so a run can be replayed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
