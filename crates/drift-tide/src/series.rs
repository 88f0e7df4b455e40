//! Tidal station time series and tide-state evaluation.
//!
//! A `TidalTimeSeries` is the in-memory form of one station's tabulated
//! tide data: strictly increasing timestamps, each carrying a tide height
//! and a dimensionless velocity factor.  Evaluation brackets the query
//! time with binary search and interpolates linearly.
//!
//! # Out-of-range policy
//!
//! Simulation steps may slightly overrun the tabulated coverage, so
//! out-of-range queries **clamp** to the nearest boundary sample instead
//! of failing.  The clamp is reported in [`TideState::clamp`] so callers
//! can surface it for diagnostics; it never aborts a step.

use drift_core::ModelTime;

use crate::{TideError, TideResult};

// ── Samples and states ────────────────────────────────────────────────────────

/// One tabulated sample of a station's tide record.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TideSample {
    pub time: ModelTime,
    /// Tide height above datum, metres.
    pub height: f64,
    /// Dimensionless multiplier applied to the raw current field.
    pub velocity_factor: f64,
}

/// Which end of the tabulated range a query was clamped to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClampEdge {
    /// Query time preceded the first sample.
    Before,
    /// Query time followed the last sample.
    After,
}

/// The tide state at one instant: interpolated height and velocity factor,
/// plus whether the query fell outside the tabulated range.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TideState {
    pub height: f64,
    pub velocity_factor: f64,
    /// `Some` when the query time was clamped to a boundary sample.
    pub clamp: Option<ClampEdge>,
}

// ── TidalTimeSeries ───────────────────────────────────────────────────────────

/// One station's tide record, immutable for the life of the run.
#[derive(Debug)]
pub struct TidalTimeSeries {
    /// Station label, carried through for diagnostics.
    station: String,
    /// Samples in strictly increasing time order (validated at
    /// construction).
    samples: Vec<TideSample>,
}

impl TidalTimeSeries {
    /// Build a series from samples, validating that there is at least one
    /// sample and that timestamps are strictly increasing.
    pub fn new(station: impl Into<String>, samples: Vec<TideSample>) -> TideResult<Self> {
        if samples.is_empty() {
            return Err(TideError::Empty);
        }
        for (i, pair) in samples.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(TideError::NonMonotonic { index: i + 1 });
            }
        }
        Ok(Self { station: station.into(), samples })
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Tabulated coverage as `(first, last)` sample times.
    pub fn coverage(&self) -> (ModelTime, ModelTime) {
        (self.samples[0].time, self.samples[self.samples.len() - 1].time)
    }

    /// The tide state at `time`.
    ///
    /// Bracket the query with binary search and interpolate height and
    /// velocity factor linearly; times at or beyond the boundary samples
    /// clamp (see module docs).
    pub fn state_at(&self, time: ModelTime) -> TideState {
        let first = self.samples[0];
        let last = self.samples[self.samples.len() - 1];

        if time < first.time {
            return TideState {
                height: first.height,
                velocity_factor: first.velocity_factor,
                clamp: Some(ClampEdge::Before),
            };
        }
        if time > last.time {
            return TideState {
                height: last.height,
                velocity_factor: last.velocity_factor,
                clamp: Some(ClampEdge::After),
            };
        }

        // Index of the first sample strictly after `time`; the bracket is
        // [hi-1, hi].  The range checks above guarantee 1 <= hi < len for
        // interior times and handle the exact-last-sample case.
        let hi = self.samples.partition_point(|s| s.time <= time);
        if hi == self.samples.len() {
            return TideState {
                height: last.height,
                velocity_factor: last.velocity_factor,
                clamp: None,
            };
        }
        let lo = &self.samples[hi - 1];
        let hi = &self.samples[hi];

        let frac = time.since(lo.time) as f64 / hi.time.since(lo.time) as f64;
        TideState {
            height: lerp(lo.height, hi.height, frac),
            velocity_factor: lerp(lo.velocity_factor, hi.velocity_factor, frac),
            clamp: None,
        }
    }
}

#[inline]
fn lerp(a: f64, b: f64, frac: f64) -> f64 {
    a + (b - a) * frac
}
