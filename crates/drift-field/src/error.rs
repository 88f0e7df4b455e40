use drift_core::{CellId, VertexId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    /// The query point is outside the current-field coverage.  Recovered
    /// per-LE by the mover: status flagged, delta zeroed, batch continues.
    #[error("point ({lat:.6}, {lon:.6}) is outside the current-field domain")]
    OutOfDomain { lat: f64, lon: f64 },

    #[error("cell {cell} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexOutOfRange {
        cell:         CellId,
        vertex:       VertexId,
        vertex_count: usize,
    },

    #[error("cell {cell} is degenerate (zero area)")]
    DegenerateCell { cell: CellId },

    #[error("topology parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FieldResult<T> = Result<T, FieldError>;
