//! Fixed-timestep bridge between Bevy and the session.
//!
//! The simulation itself is plain data ([`GameSession`]) advanced by one
//! call per fixed tick; Bevy's `FixedUpdate` schedule provides the 60 Hz
//! cadence and catch-up semantics. Rendering reads the session snapshot
//! whenever a frame happens to be drawn — the sim never waits for it.

use crate::audio::CueQueue;
use crate::config::GameConfig;
use crate::constants::TICK_RATE;
use crate::control::InputState;
use crate::menu::GameState;
use crate::scoreboard::append_score;
use crate::session::GameSession;
use bevy::prelude::*;

/// Registers the session resource and the fixed-tick driver.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
            .add_systems(
                Startup,
                init_session.after(crate::config::load_game_config),
            )
            .add_systems(
                FixedUpdate,
                tick_session.run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnEnter(GameState::GameOver), record_score);
    }
}

/// Build a new run from the configured seed; seed zero means a random run.
pub fn fresh_session(config: &GameConfig) -> GameSession {
    let seed = if config.rng_seed == 0 {
        rand::random()
    } else {
        config.rng_seed
    };
    info!("Starting session with seed {seed}");
    GameSession::new(seed)
}

/// Startup system: put an initial session in place so every system that
/// reads it has something to read before the first game starts.
pub fn init_session(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(fresh_session(&config));
}

/// Advance the session by exactly one tick and hand its sound cues to the
/// audio queue. Fires the game-over transition when the last life goes.
pub fn tick_session(
    mut session: ResMut<GameSession>,
    mut input: ResMut<InputState>,
    mut queue: ResMut<CueQueue>,
    time: Res<Time>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let cues = session.update(&input.0, time.delta_secs());
    queue.0.extend(cues);
    // Edge-triggered inputs are consumed by exactly one tick.
    input.0.reload_pressed = false;

    if session.game_over {
        next_state.set(GameState::GameOver);
    }
}

/// Persist the finished run to the local scoreboard.
pub fn record_score(session: Res<GameSession>, config: Res<GameConfig>) {
    if let Err(e) = append_score(&config.scoreboard_path, session.score, session.wave.wave) {
        error!("Failed to record score: {e}");
    }
}
