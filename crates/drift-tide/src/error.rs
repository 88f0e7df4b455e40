use thiserror::Error;

#[derive(Debug, Error)]
pub enum TideError {
    #[error("tide series has no samples")]
    Empty,

    #[error("tide series timestamps must be strictly increasing (violated at sample {index})")]
    NonMonotonic { index: usize },

    #[error("tide series parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TideResult<T> = Result<T, TideError>;
