//! `drift-field` — triangulated current-field topology and interpolation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`topology`] | `CurrentTopology`, `TopologyBuilder`                    |
//! | [`loader`]   | `load_topology_csv`, `load_topology_readers`            |
//! | [`error`]    | `FieldError`, `FieldResult<T>`                          |
//!
//! # Query model (summary)
//!
//! ```text
//! velocity_at(p) = Σ wᵢ · vertex_vel[i]   over the containing cell's vertices
//! ```
//!
//! where `wᵢ` are barycentric weights of `p` in the cell found by an R-tree
//! envelope query plus exact containment test.  Boundary points tie-break
//! to the lowest `CellId`; points outside every cell fail with
//! `OutOfDomain`.

pub mod error;
pub mod loader;
pub mod topology;

#[cfg(test)]
mod tests;

pub use error::{FieldError, FieldResult};
pub use loader::{load_topology_csv, load_topology_readers};
pub use topology::{CurrentTopology, TopologyBuilder};
