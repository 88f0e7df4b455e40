//! CSV topology loader.
//!
//! The on-disk current-pattern formats of the upstream tooling are reduced
//! here to two plain CSV tables: one of vertices, one of cells.
//!
//! # Vertex CSV format
//!
//! One row per vertex; `VertexId`s are assigned sequentially from 0 in row
//! order.  `u`/`v` are the east/north base-current components in m/s.
//!
//! ```csv
//! lat,lon,u,v
//! 41.00,-72.60,0.40,0.10
//! 41.00,-72.40,0.40,0.10
//! 41.30,-72.50,0.30,0.20
//! ```
//!
//! # Cell CSV format
//!
//! One row per cell: three vertex indices for a triangle, four (in
//! perimeter order) for a quad.  Quads are split into two triangles at
//! build time.
//!
//! ```csv
//! a,b,c,d
//! 0,1,2,
//! 1,3,4,2
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use drift_core::{GeoPoint, Velocity, VertexId};

use crate::topology::{CurrentTopology, TopologyBuilder};
use crate::FieldError;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct VertexRecord {
    lat: f64,
    lon: f64,
    u:   f64,
    v:   f64,
}

#[derive(Deserialize)]
struct CellRecord {
    a: u32,
    b: u32,
    c: u32,
    d: Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`CurrentTopology`] from a vertex CSV and a cell CSV.
pub fn load_topology_csv(
    vertices: &Path,
    cells: &Path,
) -> Result<CurrentTopology, FieldError> {
    let vertex_file = std::fs::File::open(vertices).map_err(FieldError::Io)?;
    let cell_file = std::fs::File::open(cells).map_err(FieldError::Io)?;
    load_topology_readers(vertex_file, cell_file)
}

/// Like [`load_topology_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s) or loading from network
/// streams.
pub fn load_topology_readers<V: Read, C: Read>(
    vertices: V,
    cells: C,
) -> Result<CurrentTopology, FieldError> {
    let mut builder = TopologyBuilder::new();

    let mut vertex_reader = csv::Reader::from_reader(vertices);
    for result in vertex_reader.deserialize::<VertexRecord>() {
        let row = result.map_err(|e| FieldError::Parse(e.to_string()))?;
        builder.add_vertex(GeoPoint::new(row.lat, row.lon), Velocity::new(row.u, row.v));
    }

    let mut cell_reader = csv::Reader::from_reader(cells);
    for result in cell_reader.deserialize::<CellRecord>() {
        let row = result.map_err(|e| FieldError::Parse(e.to_string()))?;
        match row.d {
            None => builder.add_triangle(VertexId(row.a), VertexId(row.b), VertexId(row.c)),
            Some(d) => {
                builder.add_quad(VertexId(row.a), VertexId(row.b), VertexId(row.c), VertexId(d))
            }
        }
    }

    builder.build()
}
