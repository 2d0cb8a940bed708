//! Game controller
//!
//! Owns all mutable game state: progress, button position, measured geometry,
//! the seeded RNG and the pending timers. The host forwards DOM events here
//! together with its current time in milliseconds, then reads back the
//! position and display state.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyParams;
use super::evasion::{clamp_to_container, evade};
use super::state::{Feedback, GameEvent, GamePhase, GameState, Geometry, RngState};
use super::timers::{Task, TimerId, TimerQueue};
use crate::settings::{Settings, SettingsError};

/// What a click on the play area landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The evasive button itself (bubbled up to the container)
    Button,
    /// Anywhere else in the container
    Container,
}

/// Single owner of the game's mutable state
#[derive(Debug, Clone)]
pub struct GameController {
    settings: Settings,
    state: GameState,
    phase: GamePhase,
    feedback: Option<Feedback>,
    /// Button top-left, relative to the container; (0, 0) until measured
    position: Vec2,
    button: Vec2,
    container: Option<Vec2>,
    rng_state: RngState,
    rng: Pcg32,
    timers: TimerQueue,
    move_timer: Option<TimerId>,
    miss_timer: Option<TimerId>,
    advance_timer: Option<TimerId>,
    /// Latest host time seen (ms)
    now_ms: u64,
    events: Vec<GameEvent>,
}

impl GameController {
    /// New game with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(Settings::default(), seed)
    }

    /// New game with custom settings, rejected if they fail validation
    pub fn with_settings(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(settings, seed))
    }

    fn build(settings: Settings, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        let button = settings.default_button_size();
        log::info!("Game created with seed: {}", seed);
        Self {
            settings,
            state: GameState::new(),
            phase: GamePhase::Playing,
            feedback: None,
            position: Vec2::ZERO,
            button,
            container: None,
            rng_state,
            rng,
            timers: TimerQueue::new(),
            move_timer: None,
            miss_timer: None,
            advance_timer: None,
            now_ms: 0,
            events: Vec::new(),
        }
    }

    // === Host events ===

    /// Container or button was (re)measured: resize, orientation change, first layout
    pub fn on_resize(&mut self, container: Vec2, button: Vec2) {
        self.button = button;
        self.container = Some(container);
        log::debug!(
            "Geometry: container {}x{}, button {}x{}",
            container.x,
            container.y,
            button.x,
            button.y
        );
        self.recenter();
    }

    /// Pointer entered or touched the button
    pub fn on_button_hover(&mut self, now_ms: u64) {
        self.advance_to(now_ms);
        if !self.accepts_input() || self.move_timer.is_some() {
            return;
        }

        if self.feedback.take().is_some() {
            self.events.push(GameEvent::FeedbackCleared);
        }
        if let Some(id) = self.miss_timer.take() {
            self.timers.cancel(id);
        }

        let delay_ms = self.difficulty().reaction_time_ms;
        self.move_timer = Some(self.timers.schedule(self.now_ms, delay_ms, Task::Move));
        self.events.push(GameEvent::MoveScheduled { delay_ms });
    }

    /// Button was clicked
    pub fn on_button_click(&mut self, now_ms: u64) {
        self.advance_to(now_ms);
        if !self.accepts_input() {
            return;
        }

        // Caught: the pending dodge no longer applies
        if let Some(id) = self.move_timer.take() {
            self.timers.cancel(id);
        }
        if let Some(id) = self.miss_timer.take() {
            self.timers.cancel(id);
        }

        self.state.score += 1;
        self.state.message = format!("Level {} Complete! 🎉", self.state.level);
        self.feedback = Some(Feedback::Hit);
        self.phase = GamePhase::LevelTransition;
        self.events.push(GameEvent::Hit {
            level: self.state.level,
            score: self.state.score,
        });
        log::info!("Level {} cleared (score {})", self.state.level, self.state.score);

        let delay = self.settings.level_advance_delay_ms;
        self.advance_timer = Some(self.timers.schedule(self.now_ms, delay, Task::AdvanceLevel));
    }

    /// Click landed in the play area. Clicks on the button itself are ignored here.
    pub fn on_container_click(&mut self, target: ClickTarget, now_ms: u64) {
        self.advance_to(now_ms);
        if target == ClickTarget::Button || !self.accepts_input() {
            return;
        }

        self.state.attempts += 1;
        self.state.message = format!("Missed! Attempts: {}", self.state.attempts);
        self.feedback = Some(Feedback::Miss);
        self.events.push(GameEvent::Miss {
            attempts: self.state.attempts,
        });

        // Newest miss owns the flash
        if let Some(id) = self.miss_timer.take() {
            self.timers.cancel(id);
        }
        let delay = self.settings.miss_feedback_ms;
        self.miss_timer = Some(self.timers.schedule(self.now_ms, delay, Task::ClearMissFeedback));
    }

    /// Back to level 1, whatever the current state
    pub fn reset(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        self.cancel_timers();
        self.state = GameState::new();
        self.phase = GamePhase::Playing;
        self.feedback = None;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset");
        self.recenter();
    }

    /// Component is going away: drop timers and stop accepting input
    pub fn teardown(&mut self) {
        self.cancel_timers();
        self.state.game_active = false;
        log::debug!("Game torn down");
    }

    /// Fire every timer due at or before `now_ms`. Returns how many fired.
    pub fn advance_to(&mut self, now_ms: u64) -> usize {
        self.now_ms = self.now_ms.max(now_ms);
        let mut fired = 0;
        while let Some((id, task)) = self.timers.pop_due(self.now_ms) {
            self.run_task(id, task);
            fired += 1;
        }
        fired
    }

    /// When the host should call `advance_to` next
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Read-only views ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// A dodge is scheduled and has not happened yet
    pub fn is_moving(&self) -> bool {
        self.move_timer.is_some()
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.container.map(|c| Geometry::new(c, self.button))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Tuning for the current level
    pub fn difficulty(&self) -> DifficultyParams {
        self.settings.difficulty.params_for(self.state.level)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // === Internals ===

    fn accepts_input(&self) -> bool {
        self.state.game_active && self.phase == GamePhase::Playing
    }

    fn run_task(&mut self, id: TimerId, task: Task) {
        log::trace!("timer {:?} fired: {:?}", id, task);
        match task {
            Task::Move => {
                if self.move_timer == Some(id) {
                    self.move_timer = None;
                    self.move_button();
                }
            }
            Task::ClearMissFeedback => {
                if self.miss_timer == Some(id) {
                    self.miss_timer = None;
                    if self.feedback == Some(Feedback::Miss) {
                        self.feedback = None;
                        self.events.push(GameEvent::FeedbackCleared);
                    }
                }
            }
            Task::AdvanceLevel => {
                if self.advance_timer == Some(id) {
                    self.advance_timer = None;
                    self.advance_level();
                }
            }
        }
    }

    fn move_button(&mut self) {
        let Some(container) = self.container else {
            log::debug!("Move skipped: container not measured yet");
            return;
        };

        let params = self.difficulty();
        let from = self.position;
        let to = evade(
            from,
            container,
            self.button,
            &params,
            self.settings.padding,
            &mut self.rng,
        );
        self.position = to;
        self.events.push(GameEvent::Moved { from, to });
        log::debug!("Button moved ({:.1}, {:.1}) -> ({:.1}, {:.1})", from.x, from.y, to.x, to.y);
    }

    fn advance_level(&mut self) {
        self.state.level += 1;
        self.state.attempts = 0;
        self.state.message = format!("Level {} - Get ready!", self.state.level);
        self.feedback = None;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::FeedbackCleared);
        self.events.push(GameEvent::LevelUp {
            level: self.state.level,
        });
        log::info!("Level {} started", self.state.level);
        self.recenter();
    }

    fn recenter(&mut self) {
        let Some(geometry) = self.geometry() else {
            return;
        };
        let pos = clamp_to_container(
            geometry.center(),
            geometry.container,
            geometry.button,
            self.settings.padding,
        );
        self.position = pos;
        self.events.push(GameEvent::Recentered { pos });
    }

    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
        self.move_timer = None;
        self.miss_timer = None;
        self.advance_timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEVEL_ADVANCE_DELAY_MS, MISS_FEEDBACK_MS, PADDING, START_MESSAGE};

    const CONTAINER: Vec2 = Vec2::new(400.0, 300.0);
    const BUTTON: Vec2 = Vec2::new(100.0, 50.0);

    fn measured(seed: u64) -> GameController {
        let mut game = GameController::new(seed);
        game.on_resize(CONTAINER, BUTTON);
        game.drain_events();
        game
    }

    #[test]
    fn test_resize_centers_button() {
        let mut game = GameController::new(1);
        assert_eq!(game.position(), Vec2::ZERO);
        game.on_resize(CONTAINER, BUTTON);
        assert_eq!(game.position(), Vec2::new(150.0, 125.0));
    }

    #[test]
    fn test_hit_then_level_up() {
        let mut game = measured(1);
        game.on_container_click(ClickTarget::Container, 0);
        assert_eq!(game.state().attempts, 1);

        game.on_button_click(100);
        assert_eq!(game.state().score, 1);
        assert_eq!(game.state().level, 1);
        assert_eq!(game.feedback(), Some(Feedback::Hit));
        assert_eq!(game.phase(), GamePhase::LevelTransition);
        assert_eq!(game.state().message, "Level 1 Complete! 🎉");

        game.advance_to(100 + LEVEL_ADVANCE_DELAY_MS - 1);
        assert_eq!(game.state().level, 1);

        game.advance_to(100 + LEVEL_ADVANCE_DELAY_MS);
        assert_eq!(game.state().level, 2);
        assert_eq!(game.state().attempts, 0);
        assert_eq!(game.state().score, 1);
        assert_eq!(game.feedback(), None);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().message, "Level 2 - Get ready!");
        assert_eq!(game.position(), Vec2::new(150.0, 125.0));
    }

    #[test]
    fn test_clicks_during_transition_are_ignored() {
        let mut game = measured(1);
        game.on_button_click(0);
        game.on_button_click(10);
        game.on_container_click(ClickTarget::Container, 20);
        game.on_button_hover(30);
        assert_eq!(game.state().score, 1);
        assert_eq!(game.state().attempts, 0);
        assert!(!game.is_moving());

        game.advance_to(LEVEL_ADVANCE_DELAY_MS);
        assert_eq!(game.state().level, 2);
    }

    #[test]
    fn test_miss() {
        let mut game = measured(1);
        game.on_container_click(ClickTarget::Container, 0);
        assert_eq!(game.state().attempts, 1);
        assert_eq!(game.state().level, 1);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.feedback(), Some(Feedback::Miss));
        assert_eq!(game.state().message, "Missed! Attempts: 1");

        game.advance_to(MISS_FEEDBACK_MS);
        assert_eq!(game.feedback(), None);
    }

    #[test]
    fn test_click_on_button_is_not_a_miss() {
        let mut game = measured(1);
        game.on_container_click(ClickTarget::Button, 0);
        assert_eq!(game.state().attempts, 0);
        assert_eq!(game.feedback(), None);
    }

    #[test]
    fn test_newer_miss_extends_flash() {
        let mut game = measured(1);
        game.on_container_click(ClickTarget::Container, 0);
        game.on_container_click(ClickTarget::Container, 200);
        assert_eq!(game.pending_timers(), 1);

        game.advance_to(MISS_FEEDBACK_MS);
        assert_eq!(game.feedback(), Some(Feedback::Miss));
        game.advance_to(200 + MISS_FEEDBACK_MS);
        assert_eq!(game.feedback(), None);
        assert_eq!(game.state().attempts, 2);
    }

    #[test]
    fn test_hover_moves_after_reaction_time() {
        let mut game = measured(5);
        let start = game.position();
        let reaction = game.difficulty().reaction_time_ms;
        assert_eq!(reaction, 300);

        game.on_button_hover(1000);
        assert!(game.is_moving());
        assert_eq!(game.next_deadline(), Some(1000 + reaction));

        game.advance_to(1000 + reaction - 1);
        assert_eq!(game.position(), start);

        game.advance_to(1000 + reaction);
        assert!(!game.is_moving());
        assert_ne!(game.position(), start);
        let events = game.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Moved { .. })));
    }

    #[test]
    fn test_hover_while_pending_is_noop() {
        let mut game = measured(5);
        game.on_button_hover(0);
        game.on_button_hover(100);
        game.on_button_hover(200);
        assert_eq!(game.pending_timers(), 1);
        assert_eq!(game.next_deadline(), Some(300));

        game.advance_to(300);
        let moved = game
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Moved { .. }))
            .count();
        assert_eq!(moved, 1);

        // Free to dodge again once the move landed
        game.on_button_hover(400);
        assert!(game.is_moving());
    }

    #[test]
    fn test_hit_cancels_pending_move() {
        let mut game = measured(5);
        let start = game.position();
        let reaction = game.difficulty().reaction_time_ms;

        game.on_button_hover(0);
        assert!(game.is_moving());
        game.on_button_click(reaction / 2);
        assert!(!game.is_moving());

        game.advance_to(reaction + 10);
        assert_eq!(game.position(), start);
        let moved = game
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Moved { .. }));
        assert!(!moved);
    }

    #[test]
    fn test_with_settings_validates() {
        let mut settings = Settings::default();
        settings.padding = -4.0;
        assert!(matches!(
            GameController::with_settings(settings, 1),
            Err(SettingsError::InvalidGeometry("padding"))
        ));

        let mut settings = Settings::default();
        settings.default_button_width = f32::NAN;
        assert!(GameController::with_settings(settings, 1).is_err());

        assert!(GameController::with_settings(Settings::default(), 1).is_ok());
    }

    #[test]
    fn test_hover_clears_miss_flash() {
        let mut game = measured(5);
        game.on_container_click(ClickTarget::Container, 0);
        game.on_button_hover(10);
        assert_eq!(game.feedback(), None);
    }

    #[test]
    fn test_move_without_geometry_is_skipped() {
        let mut game = GameController::new(5);
        game.on_button_hover(0);
        game.advance_to(1000);
        assert_eq!(game.position(), Vec2::ZERO);
        assert!(!game.is_moving());
    }

    #[test]
    fn test_moves_stay_in_bounds() {
        let mut game = measured(77);
        let mut now = 0;
        for _ in 0..200 {
            game.on_button_hover(now);
            now += 500;
            game.advance_to(now);
            let pos = game.position();
            assert!(pos.x >= PADDING && pos.x <= 292.0, "x {}", pos.x);
            assert!(pos.y >= PADDING && pos.y <= 242.0, "y {}", pos.y);
        }
    }

    #[test]
    fn test_move_reads_latest_level() {
        let mut game = measured(5);
        for i in 0..4 {
            let t = i * 2000;
            game.on_button_click(t);
            game.advance_to(t + LEVEL_ADVANCE_DELAY_MS);
        }
        assert_eq!(game.state().level, 5);
        game.on_button_hover(10_000);
        assert_eq!(game.next_deadline(), Some(10_000 + 150));
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut game = measured(3);
        game.on_container_click(ClickTarget::Container, 0);
        game.on_button_click(10);
        game.advance_to(2000);
        game.on_button_hover(2100);
        game.on_container_click(ClickTarget::Container, 2200);
        game.on_button_click(2300);
        assert_eq!(game.state().score, 2);

        game.reset(2400);
        assert_eq!(game.state(), &GameState::new());
        assert_eq!(game.state().message, START_MESSAGE);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.feedback(), None);
        assert_eq!(game.pending_timers(), 0);
        assert_eq!(game.position(), Vec2::new(150.0, 125.0));

        // The hit's level-up must not leak into the new run
        game.advance_to(10_000);
        assert_eq!(game.state().level, 1);
    }

    #[test]
    fn test_teardown_stops_everything() {
        let mut game = measured(3);
        game.on_button_hover(0);
        game.teardown();
        assert_eq!(game.pending_timers(), 0);
        assert!(!game.state().game_active);

        let before = game.position();
        game.on_button_hover(100);
        game.on_button_click(200);
        game.advance_to(5000);
        assert_eq!(game.position(), before);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_tiny_container_recenters_to_padding() {
        let mut game = GameController::new(1);
        game.on_resize(Vec2::new(60.0, 40.0), BUTTON);
        assert_eq!(game.position(), Vec2::splat(PADDING));
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = measured(2024);
        let mut b = measured(2024);
        for i in 0..50u64 {
            let t = i * 400;
            a.on_button_hover(t);
            b.on_button_hover(t);
            a.advance_to(t + 350);
            b.advance_to(t + 350);
            assert_eq!(a.position(), b.position());
        }
    }
}
