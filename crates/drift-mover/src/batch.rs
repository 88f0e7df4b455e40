//! Batch vocabulary: population kinds and per-LE status flags.
//!
//! The Driver owns the LE arrays; the mover only reads positions and
//! writes deltas and statuses for the slice it is handed.  These types are
//! the shared vocabulary of that handoff.

use std::fmt;

// ── PopulationKind ────────────────────────────────────────────────────────────

/// Which LE population a `get_move` call is for.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PopulationKind {
    /// The deterministic best-estimate population.  Repeated moves within
    /// one prepared step are bit-identical.
    Forecast,
    /// The perturbed population used for spread estimation.  Each move
    /// draws a fresh (but replayable) perturbation per LE.
    Uncertainty,
}

impl fmt::Display for PopulationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulationKind::Forecast => write!(f, "forecast"),
            PopulationKind::Uncertainty => write!(f, "uncertainty"),
        }
    }
}

// ── LeStatus ──────────────────────────────────────────────────────────────────

/// Per-LE status flag, owned by the Driver and updated by movers.
///
/// Only `InWater` LEs are moved.  A current lookup outside the field
/// domain marks the LE `OffMap`; the rest of the batch is unaffected.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeStatus {
    /// Not yet released by its spill; skipped without touching its delta.
    NotReleased,
    /// Adrift and movable.
    #[default]
    InWater,
    /// Beached; a refloat process may return it to the water.
    OnLand,
    /// Left the current-field coverage.
    OffMap,
    /// Mass fully evaporated; tracked for bookkeeping only.
    Evaporated,
}

impl LeStatus {
    /// Whether a mover should compute a displacement for this LE.
    #[inline]
    pub fn is_movable(self) -> bool {
        matches!(self, LeStatus::InWater)
    }
}

impl fmt::Display for LeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeStatus::NotReleased => "not-released",
            LeStatus::InWater => "in-water",
            LeStatus::OnLand => "on-land",
            LeStatus::OffMap => "off-map",
            LeStatus::Evaporated => "evaporated",
        };
        write!(f, "{s}")
    }
}
