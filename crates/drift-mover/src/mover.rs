//! The tidal-current mover: lifecycle state machine and displacement loop.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──prepare_for_model_run()──▶ RunPrepared
//! RunPrepared / StepDone ──prepare_for_model_step()──▶ StepPrepared
//! StepPrepared ──get_move() (any number of times)──▶ StepPrepared
//! StepPrepared ──model_step_is_done()──▶ StepDone
//! ```
//!
//! Out-of-order calls fail with [`MoverError::Lifecycle`] — a Driver bug,
//! surfaced immediately and never retried.
//!
//! # Step caching
//!
//! `prepare_for_model_step` evaluates the tide series **once** and caches
//! the resulting [`TideState`] for the step.  Every `get_move` in the step
//! — forecast and uncertainty alike, in any order — reads that one cached
//! factor, which is what makes forecast deltas at a shared position
//! bit-identical and population evaluation order irrelevant.
//!
//! # Per-LE loop
//!
//! Each LE's displacement depends only on its own position, the immutable
//! topology, and the cached tide factor, so the loop is data-parallel.
//! With the `parallel` feature it runs on Rayon with results identical to
//! the sequential path: uncertainty draws come from per-LE RNGs seeded by
//! (run seed, step, round, spill, LE index), never from shared state.

use std::fmt;
use std::sync::Arc;

use drift_core::{Delta3, GeoPoint3, LeId, LeRng, ModelTime};
use drift_field::CurrentTopology;
use drift_tide::{ClampEdge, TidalTimeSeries, TideState};

use crate::batch::{LeStatus, PopulationKind};
use crate::perturb::UncertaintyPerturber;
use crate::{MoverError, MoverResult};

// ── MoverState ────────────────────────────────────────────────────────────────

/// Lifecycle position of a mover, mutated only by the lifecycle calls.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoverState {
    Uninitialized,
    RunPrepared,
    StepPrepared,
    StepDone,
}

impl fmt::Display for MoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MoverState::Uninitialized => "Uninitialized",
            MoverState::RunPrepared => "RunPrepared",
            MoverState::StepPrepared => "StepPrepared",
            MoverState::StepDone => "StepDone",
        };
        write!(f, "{s}")
    }
}

// ── Per-step cache ────────────────────────────────────────────────────────────

/// State scoped to one prepared step, dropped by `model_step_is_done`.
struct StepState {
    /// Tide state evaluated once at step preparation and reused by every
    /// `get_move` within the step.
    tide: TideState,
    step_index: u32,
    /// Expected batch length, from `prepare_for_model_step`.
    population_size: usize,
    /// Number of uncertainty `get_move` calls already made this step.
    /// Feeds the per-LE seed, so consecutive uncertainty calls draw fresh
    /// perturbations while any given round stays replayable.
    uncertainty_round: u32,
}

// ── CatsMover ─────────────────────────────────────────────────────────────────

/// A 2-D surface-current mover driven by a static current pattern scaled
/// by a tidal time series.
///
/// Owns a read-only [`CurrentTopology`] and a read-only
/// [`TidalTimeSeries`] (shared via `Arc`), plus the lifecycle state for
/// one model run.  Vertical displacement is always zero.
pub struct CatsMover {
    topology: Arc<CurrentTopology>,
    tide: Arc<TidalTimeSeries>,

    /// Dimensionless calibration multiplier applied to every raw field
    /// vector, on top of the tide factor.
    scale: f64,

    /// Run-scoped seed for uncertainty perturbation streams.
    run_seed: u64,
    perturber: UncertaintyPerturber,

    state: MoverState,
    step: Option<StepState>,
}

impl CatsMover {
    /// Create a mover over a loaded topology and tide series.
    ///
    /// Defaults: pattern scale 1.0, run seed 0, default perturber bounds.
    pub fn new(topology: Arc<CurrentTopology>, tide: Arc<TidalTimeSeries>) -> Self {
        Self {
            topology,
            tide,
            scale: 1.0,
            run_seed: 0,
            perturber: UncertaintyPerturber::default(),
            state: MoverState::Uninitialized,
            step: None,
        }
    }

    /// Set the pattern calibration scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the run seed for uncertainty streams.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.run_seed = seed;
        self
    }

    /// Replace the default uncertainty perturber.
    pub fn with_perturber(mut self, perturber: UncertaintyPerturber) -> Self {
        self.perturber = perturber;
        self
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn state(&self) -> MoverState {
        self.state
    }

    /// Whether the tide evaluation for the current prepared step was
    /// clamped to a boundary sample.  `None` when no step is prepared or
    /// the step's query time was inside the tabulated range.
    pub fn last_tide_clamp(&self) -> Option<ClampEdge> {
        self.step.as_ref().and_then(|s| s.tide.clamp)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin a model run: validate bindings and reset run-scoped state.
    ///
    /// Valid from every state except `StepPrepared` (re-preparing a run
    /// mid-step is a Driver bug).
    pub fn prepare_for_model_run(&mut self) -> MoverResult<()> {
        if self.state == MoverState::StepPrepared {
            return Err(MoverError::Lifecycle {
                call: "prepare_for_model_run",
                state: self.state,
            });
        }
        if self.topology.is_empty() {
            return Err(MoverError::Config(
                "current topology has no cells".to_string(),
            ));
        }
        if !self.scale.is_finite() {
            return Err(MoverError::Config(format!(
                "pattern scale must be finite (got {})",
                self.scale
            )));
        }
        self.step = None;
        self.state = MoverState::RunPrepared;
        Ok(())
    }

    /// Prepare one model step: evaluate and cache the tide state for
    /// `time`, to be reused by every `get_move` within the step.
    pub fn prepare_for_model_step(
        &mut self,
        time:            ModelTime,
        step_len_secs:   f64,
        step_index:      u32,
        population_size: usize,
    ) -> MoverResult<()> {
        match self.state {
            MoverState::RunPrepared | MoverState::StepDone => {}
            state => {
                return Err(MoverError::Lifecycle { call: "prepare_for_model_step", state });
            }
        }
        if !(step_len_secs > 0.0) || !step_len_secs.is_finite() {
            return Err(MoverError::Config(format!(
                "step length must be positive and finite (got {step_len_secs})"
            )));
        }

        self.step = Some(StepState {
            tide: self.tide.state_at(time),
            step_index,
            population_size,
            uncertainty_round: 0,
        });
        self.state = MoverState::StepPrepared;
        Ok(())
    }

    /// Compute one population's displacements for the prepared step.
    ///
    /// For each movable LE: interpolate the raw current at its position,
    /// scale by the cached tide factor and the pattern scale, integrate
    /// over `step_len_secs`, and (for the uncertainty population) deflect
    /// the metre displacement with that LE's own RNG.  The result is
    /// converted to degrees at the LE's latitude and written to `deltas`;
    /// `delta.z` is always zero.
    ///
    /// An out-of-domain LE is marked [`LeStatus::OffMap`] with a zero
    /// delta; its siblings are unaffected.  Non-movable LEs get zero
    /// deltas and are otherwise untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn get_move(
        &mut self,
        _time:         ModelTime,
        step_len_secs: f64,
        positions:     &[GeoPoint3],
        deltas:        &mut [Delta3],
        statuses:      &mut [LeStatus],
        kind:          PopulationKind,
        spill_id:      u32,
    ) -> MoverResult<()> {
        if self.state != MoverState::StepPrepared {
            return Err(MoverError::Lifecycle { call: "get_move", state: self.state });
        }
        // Checked in prepare_for_model_step; the step is always Some here.
        let Some(step) = self.step.as_mut() else {
            return Err(MoverError::Lifecycle { call: "get_move", state: self.state });
        };

        if positions.len() != step.population_size {
            return Err(MoverError::BatchMismatch {
                what:     "positions",
                got:      positions.len(),
                expected: step.population_size,
            });
        }
        if deltas.len() != positions.len() {
            return Err(MoverError::BatchMismatch {
                what:     "deltas",
                got:      deltas.len(),
                expected: positions.len(),
            });
        }
        if statuses.len() != positions.len() {
            return Err(MoverError::BatchMismatch {
                what:     "statuses",
                got:      statuses.len(),
                expected: positions.len(),
            });
        }

        // Per-step constants, copied out so the loop closure only captures
        // immutable data.
        let factor = step.tide.velocity_factor * self.scale;
        let step_index = step.step_index;
        let round = match kind {
            PopulationKind::Forecast => 0,
            PopulationKind::Uncertainty => {
                let r = step.uncertainty_round;
                step.uncertainty_round += 1;
                r
            }
        };

        let topology = self.topology.as_ref();
        let perturber = self.perturber;
        let run_seed = self.run_seed;

        let move_le = |i: usize, pos: &GeoPoint3, delta: &mut Delta3, status: &mut LeStatus| {
            if !status.is_movable() {
                *delta = Delta3::ZERO;
                return;
            }
            match topology.velocity_at(pos.horizontal()) {
                Err(_) => {
                    // Out of the field's coverage: flag and zero, batch
                    // continues.
                    *status = LeStatus::OffMap;
                    *delta = Delta3::ZERO;
                }
                Ok((_cell, raw)) => {
                    let scaled = raw * factor;
                    let mut east_m = scaled.u * step_len_secs;
                    let mut north_m = scaled.v * step_len_secs;

                    if kind == PopulationKind::Uncertainty {
                        let mut rng =
                            LeRng::new(run_seed, LeId(i as u32), step_index, round, spill_id);
                        (east_m, north_m) = perturber.perturb(east_m, north_m, &mut rng);
                    }

                    *delta = Delta3::from_meters(east_m, north_m, pos.lat);
                }
            }
        };

        #[cfg(not(feature = "parallel"))]
        {
            for (i, ((pos, delta), status)) in positions
                .iter()
                .zip(deltas.iter_mut())
                .zip(statuses.iter_mut())
                .enumerate()
            {
                move_le(i, pos, delta, status);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            positions
                .par_iter()
                .zip(deltas.par_iter_mut())
                .zip(statuses.par_iter_mut())
                .enumerate()
                .for_each(|(i, ((pos, delta), status))| move_le(i, pos, delta, status));
        }

        Ok(())
    }

    /// Finish the prepared step: release the per-step cache.  No further
    /// `get_move` is valid until the next `prepare_for_model_step`.
    pub fn model_step_is_done(&mut self) -> MoverResult<()> {
        if self.state != MoverState::StepPrepared {
            return Err(MoverError::Lifecycle { call: "model_step_is_done", state: self.state });
        }
        self.step = None;
        self.state = MoverState::StepDone;
        Ok(())
    }
}
