use thiserror::Error;

use crate::mover::MoverState;

#[derive(Debug, Error)]
pub enum MoverError {
    /// Lifecycle calls arrived out of order — a Driver bug, never retried.
    #[error("{call} called in state {state}")]
    Lifecycle {
        call:  &'static str,
        state: MoverState,
    },

    #[error("{what} length {got} does not match expected {expected}")]
    BatchMismatch {
        what:     &'static str,
        got:      usize,
        expected: usize,
    },

    #[error("mover configuration error: {0}")]
    Config(String),
}

pub type MoverResult<T> = Result<T, MoverError>;
