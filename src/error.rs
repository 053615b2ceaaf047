//! Game-specific error types.
//!
//! Shell systems propagate errors through these types rather than panicking
//! where practical; a corrupt scoreboard or a bad tuning value should degrade
//! gracefully, not crash the session.

use std::fmt;

/// Top-level error enum for the game shell.
#[derive(Debug)]
pub enum GameError {
    /// The scoreboard file could not be read or written.
    ScoreboardIo {
        /// Path that was being accessed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A scoreboard row did not match the expected `score,wave,date` shape.
    ScoreboardFormat {
        /// 1-based line number of the malformed row.
        line: usize,
    },

    /// A tuning value is outside its safe operating range.
    /// Returned by validation helpers; not triggered at runtime by default.
    UnsafeConstant {
        /// Name of the value (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ScoreboardIo { path, source } => {
                write!(f, "scoreboard access failed for '{}': {}", path, source)
            }
            GameError::ScoreboardFormat { line } => {
                write!(f, "malformed scoreboard row at line {}", line)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "value '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `restitution` lands in `[0, 1]`: above 1 every
/// asteroid bounce injects energy and the arena never settles.
pub fn validate_restitution(value: f32) -> GameResult<()> {
    if !(0.0..=1.0).contains(&value) {
        Err(GameError::UnsafeConstant {
            name: "asteroid_restitution",
            value,
            safe_range: "[0.0, 1.0]",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `friction` would not decay speed each tick.
pub fn validate_friction(value: f32) -> GameResult<()> {
    if value <= 0.0 || value >= 1.0 {
        Err(GameError::UnsafeConstant {
            name: "ship_friction",
            value,
            safe_range: "(0.0, 1.0)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if `dist` cannot fit between the arena center and a wall,
/// which would make wave spawning spin forever in rejection sampling.
pub fn validate_safe_spawn_dist(value: f32) -> GameResult<()> {
    let max = crate::constants::ARENA_HEIGHT / 2.0;
    if value <= 0.0 || value >= max {
        Err(GameError::UnsafeConstant {
            name: "safe_spawn_dist",
            value,
            safe_range: "(0.0, half the arena height)",
        })
    } else {
        Ok(())
    }
}
