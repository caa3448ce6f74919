//! Error types for the simulation core

use thiserror::Error;

/// Simulation error type
#[derive(Error, Debug)]
pub enum SimError {
    /// `step` was called with an action outside the steering range.
    #[error("invalid action {0}, expected 0..=4")]
    InvalidAction(u8),

    /// `step` was called before `reset`.
    #[error("simulation not initialized, call reset first")]
    NotInitialized,

    /// A body reached a non-representable coordinate. Fatal, never retried.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
