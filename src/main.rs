//! Layout Shift entry point
//!
//! On the web the library's `web` module is the entry point (start hook plus
//! `WebGame`). Natively this runs a headless autoplay round and logs the result.

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is layout_shift::web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Layout Shift (native) starting...");
    log::info!("The playable version runs in the browser via the `web` bindings");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    autoplay(seed);
}

/// Simulated player: hovers, then clicks where the button *was* once its
/// reaction timer has run. Misses are retried until the level falls.
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(seed: u64) {
    use glam::Vec2;
    use layout_shift::sim::{ClickTarget, GameController, GameEvent};

    const PLAYER_DELAY_MS: u64 = 120;
    const TARGET_LEVEL: u32 = 12;
    const MAX_STEPS: u32 = 10_000;

    let mut game = GameController::new(seed);
    game.on_resize(Vec2::new(800.0, 384.0), Vec2::new(112.0, 56.0));

    let mut now: u64 = 0;
    let mut steps = 0;
    while game.state().level < TARGET_LEVEL && steps < MAX_STEPS {
        steps += 1;
        game.on_button_hover(now);
        now += PLAYER_DELAY_MS;

        // The player is quicker than the button's reaction
        if PLAYER_DELAY_MS < game.difficulty().reaction_time_ms {
            game.on_button_click(now);
        } else {
            game.advance_to(now);
            game.on_container_click(ClickTarget::Container, now);
            // Lucky catch every few tries
            if game.state().attempts >= 3 {
                game.on_button_click(now);
            }
        }

        while let Some(deadline) = game.next_deadline() {
            now = deadline;
            game.advance_to(now);
        }

        for event in game.drain_events() {
            if let GameEvent::LevelUp { level } = event {
                println!("reached level {} at {}ms", level, now);
            }
        }
    }

    let state = game.state();
    println!(
        "seed {}: level {}, score {}, final position ({:.1}, {:.1})",
        game.seed(),
        state.level,
        state.score,
        game.position().x,
        game.position().y
    );
}
