//! `drift-tide` — tidal station time series and tide-state evaluation.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`series`] | `TideSample`, `TideState`, `ClampEdge`, `TidalTimeSeries`|
//! | [`loader`] | `load_series_csv`, `load_series_reader`                  |
//! | [`error`]  | `TideError`, `TideResult<T>`                             |
//!
//! The velocity factor returned by `state_at` scales the raw current field:
//! total current = field vector × tide velocity factor (× the mover's
//! pattern scale).  Out-of-range query times clamp to the boundary sample
//! and report the clamp — see the `series` module docs.

pub mod error;
pub mod loader;
pub mod series;


pub use error::{TideError, TideResult};
pub use loader::{load_series_csv, load_series_reader};
pub use series::{ClampEdge, TidalTimeSeries, TideSample, TideState};
