//! `drift-core` — foundational types for the `drift` trajectory framework.
//!
//! This crate is a dependency of every other `drift-*` crate.  It
//! intentionally has no `drift-*` dependencies and minimal external ones
//! (only `rand`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                                  |
//! |----------|-----------------------------------------------------------|
//! | [`ids`]  | `LeId`, `CellId`, `VertexId`                              |
//! | [`geo`]  | `GeoPoint`, `GeoPoint3`, `Delta3`, `Velocity`, conversions|
//! | [`time`] | `ModelTime`                                               |
//! | [`rng`]  | `LeRng` (per-LE deterministic RNG)                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{Delta3, GeoPoint, GeoPoint3, Velocity, METERS_PER_DEGREE_LAT, lon_to_lat_ratio};
pub use ids::{CellId, LeId, VertexId};
pub use rng::LeRng;
pub use time::ModelTime;
