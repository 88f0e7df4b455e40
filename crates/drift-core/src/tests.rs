//! Unit tests for drift-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CellId, LeId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = LeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(LeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(LeId(0) < LeId(1));
        assert!(CellId(100) > CellId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(LeId::INVALID.0, u32::MAX);
        assert_eq!(CellId::INVALID.0, u32::MAX);
        assert_eq!(VertexId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(CellId(7).to_string(), "CellId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::{lon_to_lat_ratio, METERS_PER_DEGREE_LAT};
    use crate::{Delta3, GeoPoint3, Velocity};

    #[test]
    fn one_degree_of_latitude() {
        let d = Delta3::from_meters(0.0, METERS_PER_DEGREE_LAT, 41.0);
        assert!((d.lat - 1.0).abs() < 1e-12);
        assert_eq!(d.lon, 0.0);
        assert_eq!(d.z, 0.0);
    }

    #[test]
    fn longitude_stretches_with_latitude() {
        // The same eastward displacement spans more degrees at 60°N than at
        // the equator (cos 60° = 0.5 → exactly twice as many).
        let eq = Delta3::from_meters(1000.0, 0.0, 0.0);
        let north = Delta3::from_meters(1000.0, 0.0, 60.0);
        assert!((north.lon / eq.lon - 2.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_clamped_at_pole() {
        assert!(lon_to_lat_ratio(90.0) >= 1e-6);
        assert!((lon_to_lat_ratio(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn surface_point_has_zero_depth() {
        let p = GeoPoint3::surface(41.17, -72.5);
        assert_eq!(p.z, 0.0);
        assert_eq!(p.horizontal().lat, 41.17);
    }

    #[test]
    fn velocity_ops() {
        let v = Velocity::new(3.0, 4.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);
        let scaled = v * 2.0;
        assert_eq!(scaled, Velocity::new(6.0, 8.0));
        assert_eq!(v + Velocity::ZERO, v);
    }
}

#[cfg(test)]
mod time {
    use crate::ModelTime;

    #[test]
    fn arithmetic() {
        let t = ModelTime(1_000);
        assert_eq!(t + 3_600, ModelTime(4_600));
        assert_eq!(t.offset(-500), ModelTime(500));
        assert_eq!(ModelTime(4_600) - t, 3_600);
        assert_eq!(t.since(ModelTime(4_600)), -3_600);
    }

    #[test]
    fn display() {
        assert_eq!(ModelTime(7).to_string(), "t7");
    }
}

#[cfg(test)]
mod rng {
    use crate::{LeId, LeRng};

    #[test]
    fn deterministic_same_identity() {
        let mut r1 = LeRng::new(12345, LeId(0), 3, 0, 1);
        let mut r2 = LeRng::new(12345, LeId(0), 3, 0, 1);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn adjacent_les_diverge() {
        let mut r0 = LeRng::new(1, LeId(0), 0, 0, 0);
        let mut r1 = LeRng::new(1, LeId(1), 0, 0, 0);
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent LEs should diverge");
    }

    #[test]
    fn step_and_round_decorrelate() {
        let a: u64 = LeRng::new(1, LeId(5), 0, 0, 0).random();
        let b: u64 = LeRng::new(1, LeId(5), 1, 0, 0).random();
        let c: u64 = LeRng::new(1, LeId(5), 0, 1, 0).random();
        let d: u64 = LeRng::new(1, LeId(5), 0, 0, 9).random();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = LeRng::new(0, LeId(0), 0, 0, 0);
        for _ in 0..1000 {
            let v = rng.gen_range(-0.3f64..0.3);
            assert!((-0.3..0.3).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = LeRng::new(0, LeId(0), 0, 0, 0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
