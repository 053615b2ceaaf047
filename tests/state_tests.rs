//! Headless unit tests for the [`GameState`] state machine.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering, no audio —
//! so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `MainMenu`.
//! 2. A `NextState` request transitions from `MainMenu` → `Playing`.
//! 3. `Playing` ⇄ `Paused` round-trips back to `Playing`.
//! 4. `Playing` → `GameOver` and back to `MainMenu`.
//! 5. `insert_state` can force-start directly in `Playing` (test-mode path).

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use rockstorm::menu::GameState;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with just the state registered via `init_state`.
///
/// `MinimalPlugins` provides the required scheduling infrastructure.
/// `StatesPlugin` adds the `StateTransition` schedule needed by `init_state`.
/// No window or rendering is created.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update(); // StateTransition fires before the next Update
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The default variant of `GameState` is `MainMenu`.
#[test]
fn default_state_is_main_menu() {
    let mut app = app_with_default_state();
    app.update(); // run one frame so StateTransition fires
    assert_eq!(
        current_state(&app),
        GameState::MainMenu,
        "initial state must be MainMenu"
    );
}

/// Requesting `Playing` via `NextState` transitions the state on the next
/// `StateTransition` pass (which Bevy runs before each `Update`).
#[test]
fn transition_main_menu_to_playing() {
    let mut app = app_with_default_state();
    app.update();

    set_state(&mut app, GameState::Playing);
    assert_eq!(current_state(&app), GameState::Playing);
}

/// A pause round trip lands back in `Playing` with no extra transitions.
#[test]
fn pause_round_trip_returns_to_playing() {
    let mut app = app_with_default_state();
    app.update();

    set_state(&mut app, GameState::Playing);
    set_state(&mut app, GameState::Paused);
    assert_eq!(current_state(&app), GameState::Paused);

    set_state(&mut app, GameState::Playing);
    assert_eq!(current_state(&app), GameState::Playing);

    // No pending transition: the state persists across further frames.
    app.update();
    app.update();
    assert_eq!(current_state(&app), GameState::Playing);
}

/// The losing path: `Playing` → `GameOver` → `MainMenu`.
#[test]
fn game_over_flows_back_to_main_menu() {
    let mut app = app_with_default_state();
    app.update();

    set_state(&mut app, GameState::Playing);
    set_state(&mut app, GameState::GameOver);
    assert_eq!(current_state(&app), GameState::GameOver);

    set_state(&mut app, GameState::MainMenu);
    assert_eq!(current_state(&app), GameState::MainMenu);
}

/// `insert_state` can force-start directly in `Playing` (test-mode path).
#[test]
fn insert_state_can_start_in_playing() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.update();
    assert_eq!(current_state(&app), GameState::Playing);
}
