//! Geographic coordinate and velocity types plus degree/metre conversion.
//!
//! Coordinates are `f64`: one simulation step displaces an LE by metres
//! while the coordinate itself is degrees, so the delta is ~5 orders of
//! magnitude below the position.  Single precision would quantize those
//! deltas and break the bit-identical-forecast invariant.
//!
//! Displacements are computed in a local tangent frame: a velocity-time
//! product in metres east/north is converted to a degree offset using the
//! metres-per-degree-of-latitude constant and the `cos(lat)` longitude
//! ratio at the LE's latitude.

/// Metres per degree of latitude (1 nautical mile per minute of arc).
pub const METERS_PER_DEGREE_LAT: f64 = 111_120.0;

/// Degrees of longitude shrink with latitude by `cos(lat)`.
///
/// Clamped away from zero so conversion near the poles stays finite; tidal
/// current patterns never reach there, but a bad input point must not
/// produce an infinite delta.
#[inline]
pub fn lon_to_lat_ratio(lat_deg: f64) -> f64 {
    lat_deg.to_radians().cos().max(1e-6)
}

// ── GeoPoint ─────────────────────────────────────────────────────────────────

/// A WGS-84 horizontal coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── GeoPoint3 ────────────────────────────────────────────────────────────────

/// An LE position: horizontal coordinate plus depth in metres (positive
/// down, 0 = surface).
///
/// Depth is carried for interface symmetry with sub-surface movers; the
/// tidal-current mover reads it only to decide movability and never writes
/// a vertical displacement.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint3 {
    pub lat: f64,
    pub lon: f64,
    pub z:   f64,
}

impl GeoPoint3 {
    #[inline]
    pub fn new(lat: f64, lon: f64, z: f64) -> Self {
        Self { lat, lon, z }
    }

    /// Surface point at the same horizontal coordinate.
    #[inline]
    pub fn surface(lat: f64, lon: f64) -> Self {
        Self { lat, lon, z: 0.0 }
    }

    /// Drop the depth component.
    #[inline]
    pub fn horizontal(self) -> GeoPoint {
        GeoPoint { lat: self.lat, lon: self.lon }
    }
}

// ── Delta3 ───────────────────────────────────────────────────────────────────

/// One LE's displacement for one step: degrees of latitude/longitude plus a
/// vertical component in metres.  The tidal-current mover always writes
/// `z == 0.0`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta3 {
    pub lat: f64,
    pub lon: f64,
    pub z:   f64,
}

impl Delta3 {
    pub const ZERO: Delta3 = Delta3 { lat: 0.0, lon: 0.0, z: 0.0 };

    /// Convert a metres-east/metres-north displacement into a degree offset
    /// valid at latitude `at_lat_deg`.  Vertical component is zero.
    #[inline]
    pub fn from_meters(east_m: f64, north_m: f64, at_lat_deg: f64) -> Self {
        Delta3 {
            lat: north_m / METERS_PER_DEGREE_LAT,
            lon: east_m / (METERS_PER_DEGREE_LAT * lon_to_lat_ratio(at_lat_deg)),
            z:   0.0,
        }
    }
}

// ── Velocity ─────────────────────────────────────────────────────────────────

/// A horizontal current vector: east (`u`) and north (`v`) components in m/s.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub u: f64,
    pub v: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { u: 0.0, v: 0.0 };

    #[inline]
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        (self.u * self.u + self.v * self.v).sqrt()
    }
}

impl std::ops::Mul<f64> for Velocity {
    type Output = Velocity;
    #[inline]
    fn mul(self, rhs: f64) -> Velocity {
        Velocity { u: self.u * rhs, v: self.v * rhs }
    }
}

impl std::ops::Add for Velocity {
    type Output = Velocity;
    #[inline]
    fn add(self, rhs: Velocity) -> Velocity {
        Velocity { u: self.u + rhs.u, v: self.v + rhs.v }
    }
}
