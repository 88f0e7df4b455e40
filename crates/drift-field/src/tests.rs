//! Unit tests for topology construction, lookup, and loading.

use drift_core::{CellId, GeoPoint, Velocity, VertexId};

use crate::topology::{CurrentTopology, TopologyBuilder};
use crate::FieldError;

/// A unit-ish square over Long Island Sound split along the v0–v2 diagonal:
///
/// ```text
/// v3 ─── v2        cell 0 = (v0, v1, v2)
///  │  1 ╱ │        cell 1 = (v0, v2, v3)
///  │  ╱ 0 │
/// v0 ─── v1
/// ```
fn square_topology() -> CurrentTopology {
    let mut b = TopologyBuilder::new();
    let v0 = b.add_vertex(GeoPoint::new(41.0, -72.6), Velocity::new(1.0, 0.0));
    let v1 = b.add_vertex(GeoPoint::new(41.0, -72.4), Velocity::new(0.0, 1.0));
    let v2 = b.add_vertex(GeoPoint::new(41.2, -72.4), Velocity::new(0.0, 0.0));
    let v3 = b.add_vertex(GeoPoint::new(41.2, -72.6), Velocity::new(2.0, 2.0));
    b.add_triangle(v0, v1, v2);
    b.add_triangle(v0, v2, v3);
    b.build().unwrap()
}

#[cfg(test)]
mod lookup {
    use super::*;

    #[test]
    fn centroid_blends_vertex_velocities() {
        let topo = square_topology();
        // Centroid of cell 0 — barycentric weights are 1/3 each.
        let p = GeoPoint::new((41.0 + 41.0 + 41.2) / 3.0, (-72.6 - 72.4 - 72.4) / 3.0);
        let (cell, vel) = topo.velocity_at(p).unwrap();
        assert_eq!(cell, CellId(0));
        assert!((vel.u - 1.0 / 3.0).abs() < 1e-9, "u = {}", vel.u);
        assert!((vel.v - 1.0 / 3.0).abs() < 1e-9, "v = {}", vel.v);
    }

    #[test]
    fn vertex_point_is_exact() {
        let topo = square_topology();
        let (_, vel) = topo.velocity_at(GeoPoint::new(41.2, -72.6)).unwrap();
        assert_eq!(vel, Velocity::new(2.0, 2.0));
    }

    #[test]
    fn diagonal_point_ties_to_lowest_cell() {
        let topo = square_topology();
        // Midpoint of the shared v0–v2 edge is inside both cells.
        let p = GeoPoint::new(41.1, -72.5);
        assert_eq!(topo.locate(p), Some(CellId(0)));
        // Repeated queries must not flap.
        for _ in 0..10 {
            assert_eq!(topo.locate(p), Some(CellId(0)));
        }
    }

    #[test]
    fn outside_domain_fails() {
        let topo = square_topology();
        let err = topo.velocity_at(GeoPoint::new(45.0, -72.5)).unwrap_err();
        match err {
            FieldError::OutOfDomain { lat, .. } => assert_eq!(lat, 45.0),
            other => panic!("expected OutOfDomain, got {other:?}"),
        }
    }

    #[test]
    fn point_in_bbox_but_outside_cells_fails() {
        let topo = {
            // Single triangle; its bounding box covers corners the triangle
            // itself does not.
            let mut b = TopologyBuilder::new();
            let v0 = b.add_vertex(GeoPoint::new(0.0, 0.0), Velocity::new(1.0, 0.0));
            let v1 = b.add_vertex(GeoPoint::new(0.0, 1.0), Velocity::new(1.0, 0.0));
            let v2 = b.add_vertex(GeoPoint::new(1.0, 0.0), Velocity::new(1.0, 0.0));
            b.add_triangle(v0, v1, v2);
            b.build().unwrap()
        };
        // Near the bbox corner opposite the hypotenuse.
        assert!(topo.velocity_at(GeoPoint::new(0.9, 0.9)).is_err());
    }

    #[test]
    fn empty_topology_rejects_everything() {
        let topo = CurrentTopology::empty();
        assert!(topo.is_empty());
        assert!(topo.velocity_at(GeoPoint::new(41.1, -72.5)).is_err());
    }
}

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn quad_splits_into_two_triangles() {
        let mut b = TopologyBuilder::new();
        let v0 = b.add_vertex(GeoPoint::new(41.0, -72.6), Velocity::ZERO);
        let v1 = b.add_vertex(GeoPoint::new(41.0, -72.4), Velocity::ZERO);
        let v2 = b.add_vertex(GeoPoint::new(41.2, -72.4), Velocity::ZERO);
        let v3 = b.add_vertex(GeoPoint::new(41.2, -72.6), Velocity::ZERO);
        b.add_quad(v0, v1, v2, v3);
        let topo = b.build().unwrap();
        assert_eq!(topo.cell_count(), 2);
        // Both halves of the quad resolve.
        assert!(topo.locate(GeoPoint::new(41.05, -72.45)).is_some());
        assert!(topo.locate(GeoPoint::new(41.15, -72.55)).is_some());
    }

    #[test]
    fn rejects_out_of_range_vertex() {
        let mut b = TopologyBuilder::new();
        let v0 = b.add_vertex(GeoPoint::new(41.0, -72.6), Velocity::ZERO);
        let v1 = b.add_vertex(GeoPoint::new(41.0, -72.4), Velocity::ZERO);
        b.add_triangle(v0, v1, VertexId(99));
        match b.build() {
            Err(FieldError::VertexOutOfRange { cell, vertex, vertex_count }) => {
                assert_eq!(cell, CellId(0));
                assert_eq!(vertex, VertexId(99));
                assert_eq!(vertex_count, 2);
            }
            other => panic!("expected VertexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn rejects_degenerate_cell() {
        let mut b = TopologyBuilder::new();
        let v0 = b.add_vertex(GeoPoint::new(41.0, -72.6), Velocity::ZERO);
        let v1 = b.add_vertex(GeoPoint::new(41.1, -72.5), Velocity::ZERO);
        let v2 = b.add_vertex(GeoPoint::new(41.2, -72.4), Velocity::ZERO); // collinear
        b.add_triangle(v0, v1, v2);
        assert!(matches!(b.build(), Err(FieldError::DegenerateCell { .. })));
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::load_topology_readers;
    use crate::FieldError;
    use drift_core::GeoPoint;

    const VERTICES: &str = "\
lat,lon,u,v
41.00,-72.60,0.40,0.10
41.00,-72.40,0.40,0.10
41.20,-72.40,0.30,0.20
41.20,-72.60,0.30,0.20
";

    #[test]
    fn loads_triangles_and_quads() {
        let cells = "a,b,c,d\n0,1,2,\n0,2,3,\n";
        let topo = load_topology_readers(Cursor::new(VERTICES), Cursor::new(cells)).unwrap();
        assert_eq!(topo.vertex_count(), 4);
        assert_eq!(topo.cell_count(), 2);

        let quad_cells = "a,b,c,d\n0,1,2,3\n";
        let topo = load_topology_readers(Cursor::new(VERTICES), Cursor::new(quad_cells)).unwrap();
        assert_eq!(topo.cell_count(), 2);
        assert!(topo.velocity_at(GeoPoint::new(41.1, -72.5)).is_ok());
    }

    #[test]
    fn malformed_vertex_row_is_a_parse_error() {
        let bad = "lat,lon,u,v\n41.0,not-a-number,0.4,0.1\n";
        let cells = "a,b,c,d\n";
        match load_topology_readers(Cursor::new(bad), Cursor::new(cells)) {
            Err(FieldError::Parse(_)) => {}
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
