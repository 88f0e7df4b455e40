//! `drift-mover` — the tidal-current mover.
//!
//! Combines a [`drift_field::CurrentTopology`] lookup with a
//! [`drift_tide::TidalTimeSeries`] evaluation to displace one batch of LEs
//! per model step, for a deterministic forecast population and a perturbed
//! uncertainty population.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`mover`]   | `CatsMover`, `MoverState`, the four lifecycle calls    |
//! | [`batch`]   | `PopulationKind`, `LeStatus`                           |
//! | [`perturb`] | `UncertaintyPerturber`                                 |
//! | [`error`]   | `MoverError`, `MoverResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Rayon per-LE loop in `get_move` (identical results).    |
//! | `serde`    | Propagates serde derives through the stack.             |
//!
//! # Driver usage
//!
//! ```
//! use std::sync::Arc;
//! use drift_core::{Delta3, GeoPoint, GeoPoint3, ModelTime, Velocity};
//! use drift_field::TopologyBuilder;
//! use drift_tide::{TidalTimeSeries, TideSample};
//! use drift_mover::{CatsMover, LeStatus, PopulationKind};
//!
//! let mut b = TopologyBuilder::new();
//! let v0 = b.add_vertex(GeoPoint::new(41.0, -72.7), Velocity::new(0.3, 0.2));
//! let v1 = b.add_vertex(GeoPoint::new(41.0, -72.3), Velocity::new(0.3, 0.2));
//! let v2 = b.add_vertex(GeoPoint::new(41.4, -72.5), Velocity::new(0.3, 0.2));
//! b.add_triangle(v0, v1, v2);
//! let topology = Arc::new(b.build().unwrap());
//!
//! let tide = Arc::new(TidalTimeSeries::new("station", vec![
//!     TideSample { time: ModelTime(0), height: 0.3, velocity_factor: 1.0 },
//! ]).unwrap());
//!
//! let mut mover = CatsMover::new(topology, tide);
//! let positions = vec![GeoPoint3::surface(41.1, -72.5); 3];
//! let mut deltas = vec![Delta3::ZERO; 3];
//! let mut statuses = vec![LeStatus::InWater; 3];
//!
//! mover.prepare_for_model_run().unwrap();
//! mover.prepare_for_model_step(ModelTime(0), 3600.0, 0, 3).unwrap();
//! mover.get_move(ModelTime(0), 3600.0, &positions, &mut deltas, &mut statuses,
//!                PopulationKind::Forecast, 0).unwrap();
//! mover.model_step_is_done().unwrap();
//! assert!(deltas[0].lat != 0.0 && deltas[0].z == 0.0);
//! ```

pub mod batch;
pub mod error;
pub mod mover;
pub mod perturb;


pub use batch::{LeStatus, PopulationKind};
pub use error::{MoverError, MoverResult};
pub use mover::{CatsMover, MoverState};
pub use perturb::UncertaintyPerturber;
