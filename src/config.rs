//! Runtime shell configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] holding the settings the shell reads
//! at runtime. At startup [`load_game_config`] reads `assets/game.toml` and
//! overwrites the defaults with any values present in the file; missing keys
//! fall back to the compiled defaults, so a minimal TOML can override just
//! the settings you care about.
//!
//! Gameplay balance itself lives in `src/constants.rs` and is compiled in:
//! the simulation must stay deterministic per seed, so it never reads this
//! resource mid-run.

use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable shell configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Master switch for sound playback; also toggled from the options menu.
    pub sound_enabled: bool,
    /// Draw the debug overlay (collision radii, velocity vectors, steering
    /// markers) over the world; also toggled from the options menu.
    pub debug_enabled: bool,
    /// Session RNG seed. Zero means "pick one from entropy at session start".
    pub rng_seed: u64,
    /// Where the local scoreboard CSV lives.
    pub scoreboard_path: String,
    /// Base font size for the in-game HUD.
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            debug_enabled: false,
            rng_seed: 0,
            scoreboard_path: "scoreboard.csv".to_string(),
            hud_font_size: 20.0,
        }
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. TOML parse errors are logged
/// but do not abort the game. A missing file is silently ignored (defaults
/// are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded config from {path}");
            }
            Err(e) => {
                warn!("Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            info!("No {path} found; using compiled defaults");
        }
    }

    // Sanity-check the compiled balance values once at startup so a bad edit
    // to constants.rs shows up in the log instead of as weird gameplay.
    use crate::constants::{ASTEROID_RESTITUTION, SAFE_SPAWN_DIST, SHIP_FRICTION};
    use crate::error::{validate_friction, validate_restitution, validate_safe_spawn_dist};
    for check in [
        validate_restitution(ASTEROID_RESTITUTION),
        validate_friction(SHIP_FRICTION),
        validate_safe_spawn_dist(SAFE_SPAWN_DIST),
    ] {
        if let Err(e) = check {
            warn!("{e}");
        }
    }
}
