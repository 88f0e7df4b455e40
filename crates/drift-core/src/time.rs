//! Model time.
//!
//! Movers consume absolute timestamps handed down by the Driver; they never
//! own a clock.  `ModelTime` is a Unix-seconds newtype so arithmetic on it
//! is exact integer work with no timezone or calendar baggage — tide-series
//! bracketing and step offsets are plain `i64` comparisons.

use std::fmt;

/// An absolute model timestamp in Unix seconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelTime(pub i64);

impl ModelTime {
    pub const EPOCH: ModelTime = ModelTime(0);

    /// The time `secs` seconds after `self`.
    #[inline]
    pub fn offset(self, secs: i64) -> ModelTime {
        ModelTime(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is
    /// in the future).
    #[inline]
    pub fn since(self, earlier: ModelTime) -> i64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<i64> for ModelTime {
    type Output = ModelTime;
    #[inline]
    fn add(self, rhs: i64) -> ModelTime {
        ModelTime(self.0 + rhs)
    }
}

impl std::ops::Sub for ModelTime {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: ModelTime) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for ModelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
