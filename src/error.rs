//! Errors for the fallible shell around the simulation.
//!
//! The simulation itself never fails: degenerate inputs are recovered inside
//! the frame. Only configuration loading and terminal I/O surface errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// A tuning value is outside the range the simulation can run with.
    #[error("config value '{field}' = {value} is invalid, expected {expected}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive and finite.
pub fn ensure_positive(field: &'static str, value: f64) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            value,
            expected: "a finite value > 0",
        })
    }
}

/// Returns an error unless `value` is a probability in `[0, 1]`.
pub fn ensure_probability(field: &'static str, value: f64) -> GameResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            value,
            expected: "a probability in [0, 1]",
        })
    }
}
