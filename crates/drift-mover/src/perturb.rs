//! Bounded uncertainty perturbation for horizontal displacements.

use drift_core::LeRng;

use crate::{MoverError, MoverResult};

/// Deflects an LE's horizontal displacement by bounded along-current and
/// cross-current fractions drawn from that LE's own RNG:
///
/// ```text
/// east'  = east·(1 + α) − north·β
/// north' = north·(1 + α) + east·β
/// α ∈ [down_cur, up_cur]      (along-current stretch/shrink)
/// β ∈ [left_cur, right_cur]   (cross-current deflection)
/// ```
///
/// Deterministic given the RNG seed, so any draw can be replayed; no state
/// is shared between LEs, so results are independent of processing order.
/// The vertical component is never touched — this perturber only sees the
/// horizontal pair.
#[derive(Copy, Clone, Debug)]
pub struct UncertaintyPerturber {
    down_cur:  f64,
    up_cur:    f64,
    left_cur:  f64,
    right_cur: f64,
}

impl Default for UncertaintyPerturber {
    /// Along-current ±30 %, cross-current ±10 % — the customary bounds for
    /// tidal-current patterns.
    fn default() -> Self {
        Self { down_cur: -0.3, up_cur: 0.3, left_cur: -0.1, right_cur: 0.1 }
    }
}

impl UncertaintyPerturber {
    /// Custom bounds.  Each interval must be non-empty and ordered.
    pub fn new(down_cur: f64, up_cur: f64, left_cur: f64, right_cur: f64) -> MoverResult<Self> {
        if !(down_cur < up_cur) {
            return Err(MoverError::Config(format!(
                "along-current bounds must satisfy down < up (got {down_cur} .. {up_cur})"
            )));
        }
        if !(left_cur < right_cur) {
            return Err(MoverError::Config(format!(
                "cross-current bounds must satisfy left < right (got {left_cur} .. {right_cur})"
            )));
        }
        Ok(Self { down_cur, up_cur, left_cur, right_cur })
    }

    /// Perturb a metres-east/metres-north displacement.
    pub fn perturb(&self, east_m: f64, north_m: f64, rng: &mut LeRng) -> (f64, f64) {
        let alpha = rng.gen_range(self.down_cur..self.up_cur);
        let beta = rng.gen_range(self.left_cur..self.right_cur);
        (
            east_m * (1.0 + alpha) - north_m * beta,
            north_m * (1.0 + alpha) + east_m * beta,
        )
    }
}
