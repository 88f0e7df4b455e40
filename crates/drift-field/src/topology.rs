//! Triangulated current-field topology and velocity interpolation.
//!
//! # Data layout
//!
//! Vertex data lives in parallel SoA arrays (`vertex_pos`, `vertex_vel`)
//! indexed by `VertexId`; cells are vertex-index triples indexed by
//! `CellId`.  Quads are accepted at build time and split into two
//! triangles, so gridded input flows through the same lookup path as
//! triangulated input.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over triangle bounding boxes narrows a point
//! query to a handful of candidate cells; the exact containment test is
//! barycentric.  Velocity at a point is the barycentric blend of the three
//! vertex velocities of the containing cell.
//!
//! # Determinism
//!
//! A point on a shared edge passes the containment test of every adjacent
//! cell; the query resolves to the **lowest `CellId`** among them, so
//! repeated calls with the same input can never flap between neighbours.
//! All queries are `&self` and touch only immutable data — safe to call
//! from any number of threads.

use rstar::{RTree, RTreeObject, AABB};

use drift_core::{CellId, GeoPoint, Velocity, VertexId};

use crate::{FieldError, FieldResult};

/// Barycentric containment tolerance: weights down to `-EPS` still count as
/// inside, so edge and vertex points are accepted by every adjacent cell
/// (and then tie-broken by cell index) instead of falling into the cracks.
const BARY_EPS: f64 = 1e-9;

// ── R-tree cell entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a triangle's `[lat, lon]` bounding box with
/// the associated `CellId`.
#[derive(Clone, Debug)]
struct CellEntry {
    bbox: AABB<[f64; 2]>,
    id:   CellId,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bbox
    }
}

// ── CurrentTopology ───────────────────────────────────────────────────────────

/// An immutable triangulated velocity field.
///
/// Do not construct directly; use [`TopologyBuilder`].  Loaded once per run
/// and shared read-only (typically behind an `Arc`) for the life of the
/// mover.
#[derive(Debug)]
pub struct CurrentTopology {
    // ── Vertex data (indexed by VertexId) ─────────────────────────────────
    /// Geographic position of each vertex.
    pub vertex_pos: Vec<GeoPoint>,

    /// Base current velocity at each vertex.
    pub vertex_vel: Vec<Velocity>,

    // ── Cell data (indexed by CellId) ─────────────────────────────────────
    /// Vertex triple of each triangular cell.
    pub cell_verts: Vec<[VertexId; 3]>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<CellEntry>,
}

impl CurrentTopology {
    /// Construct an empty topology with no vertices or cells.
    ///
    /// Useful as a placeholder while wiring a mover up; every velocity
    /// query against it fails with [`FieldError::OutOfDomain`].
    pub fn empty() -> Self {
        CurrentTopology {
            vertex_pos:  Vec::new(),
            vertex_vel:  Vec::new(),
            cell_verts:  Vec::new(),
            spatial_idx: RTree::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    pub fn cell_count(&self) -> usize {
        self.cell_verts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_verts.is_empty()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The cell containing `point`, or `None` if the point is outside the
    /// domain.  Boundary points tie-break to the lowest `CellId`.
    pub fn locate(&self, point: GeoPoint) -> Option<CellId> {
        self.locate_with_weights(point).map(|(cell, _)| cell)
    }

    /// Interpolated current at `point`: locate the containing cell, then
    /// blend its three vertex velocities with barycentric weights.
    ///
    /// Returns the containing cell alongside the velocity so callers can
    /// attribute the result.  Fails with [`FieldError::OutOfDomain`] when
    /// no cell contains the point.
    pub fn velocity_at(&self, point: GeoPoint) -> FieldResult<(CellId, Velocity)> {
        let (cell, w) = self
            .locate_with_weights(point)
            .ok_or(FieldError::OutOfDomain { lat: point.lat, lon: point.lon })?;
        let [a, b, c] = self.cell_verts[cell.index()];

        let vel = self.vertex_vel[a.index()] * w[0]
            + self.vertex_vel[b.index()] * w[1]
            + self.vertex_vel[c.index()] * w[2];
        Ok((cell, vel))
    }

    /// Candidate cells come from the R-tree envelope query; the exact test
    /// is barycentric.  Ties (boundary points inside several adjacent
    /// cells) resolve to the lowest `CellId`.
    fn locate_with_weights(&self, point: GeoPoint) -> Option<(CellId, [f64; 3])> {
        let probe = AABB::from_point([point.lat, point.lon]);
        self.spatial_idx
            .locate_in_envelope_intersecting(&probe)
            .filter_map(|entry| self.barycentric(entry.id, point).map(|w| (entry.id, w)))
            .min_by_key(|&(cell, _)| cell)
    }

    // ── Barycentric test ──────────────────────────────────────────────────

    /// Barycentric weights of `point` in `cell`, or `None` if the point is
    /// outside the cell.  Weights sum to 1 and are each `>= -BARY_EPS`.
    ///
    /// Computed as ratios of signed sub-areas to the full signed area, so
    /// the test is winding-independent.
    fn barycentric(&self, cell: CellId, point: GeoPoint) -> Option<[f64; 3]> {
        let [a, b, c] = self.cell_verts[cell.index()];
        let pa = self.vertex_pos[a.index()];
        let pb = self.vertex_pos[b.index()];
        let pc = self.vertex_pos[c.index()];

        let area = signed_area2(pa, pb, pc);
        // Degenerate cells are rejected at build time; guard anyway.
        if area == 0.0 {
            return None;
        }

        let wa = signed_area2(point, pb, pc) / area;
        let wb = signed_area2(pa, point, pc) / area;
        let wc = 1.0 - wa - wb;

        if wa >= -BARY_EPS && wb >= -BARY_EPS && wc >= -BARY_EPS {
            Some([wa, wb, wc])
        } else {
            None
        }
    }
}

/// Twice the signed area of triangle (p, q, r) in the lat/lon plane.
#[inline]
fn signed_area2(p: GeoPoint, q: GeoPoint, r: GeoPoint) -> f64 {
    (q.lon - p.lon) * (r.lat - p.lat) - (r.lon - p.lon) * (q.lat - p.lat)
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`CurrentTopology`] incrementally, then call
/// [`build`](Self::build).
///
/// The builder accepts vertices and cells in any order.  `build()`
/// validates vertex references, rejects degenerate (zero-area) triangles,
/// and bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use drift_core::{GeoPoint, Velocity};
/// use drift_field::TopologyBuilder;
///
/// let mut b = TopologyBuilder::new();
/// let v0 = b.add_vertex(GeoPoint::new(41.0, -72.6), Velocity::new(0.4, 0.1));
/// let v1 = b.add_vertex(GeoPoint::new(41.0, -72.4), Velocity::new(0.4, 0.1));
/// let v2 = b.add_vertex(GeoPoint::new(41.3, -72.5), Velocity::new(0.3, 0.2));
/// b.add_triangle(v0, v1, v2);
/// let topo = b.build().unwrap();
/// assert_eq!(topo.cell_count(), 1);
/// ```
pub struct TopologyBuilder {
    vertex_pos: Vec<GeoPoint>,
    vertex_vel: Vec<Velocity>,
    cell_verts: Vec<[VertexId; 3]>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self {
            vertex_pos: Vec::new(),
            vertex_vel: Vec::new(),
            cell_verts: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of vertices and cells to reduce
    /// reallocations when bulk-loading from a file.
    pub fn with_capacity(vertices: usize, cells: usize) -> Self {
        Self {
            vertex_pos: Vec::with_capacity(vertices),
            vertex_vel: Vec::with_capacity(vertices),
            cell_verts: Vec::with_capacity(cells),
        }
    }

    /// Add a vertex carrying a base velocity; returns its `VertexId`
    /// (sequential from 0).
    pub fn add_vertex(&mut self, pos: GeoPoint, vel: Velocity) -> VertexId {
        let id = VertexId(self.vertex_pos.len() as u32);
        self.vertex_pos.push(pos);
        self.vertex_vel.push(vel);
        id
    }

    /// Add a triangular cell over three previously added vertices.
    pub fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        self.cell_verts.push([a, b, c]);
    }

    /// Add a quad cell, split along the `a`–`c` diagonal into two
    /// triangles.  Vertices must be given in perimeter order.
    pub fn add_quad(&mut self, a: VertexId, b: VertexId, c: VertexId, d: VertexId) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_pos.len()
    }

    pub fn cell_count(&self) -> usize {
        self.cell_verts.len()
    }

    /// Consume the builder and produce a [`CurrentTopology`].
    ///
    /// Validates that every cell references existing vertices and has
    /// non-zero area, then bulk-loads the R-tree.  Time complexity:
    /// O(C) validation + O(C log C) R-tree bulk load.
    pub fn build(self) -> FieldResult<CurrentTopology> {
        let vertex_count = self.vertex_pos.len();

        let mut entries = Vec::with_capacity(self.cell_verts.len());
        for (i, &verts) in self.cell_verts.iter().enumerate() {
            let cell = CellId(i as u32);

            for v in verts {
                if v.index() >= vertex_count {
                    return Err(FieldError::VertexOutOfRange { cell, vertex: v, vertex_count });
                }
            }

            let pa = self.vertex_pos[verts[0].index()];
            let pb = self.vertex_pos[verts[1].index()];
            let pc = self.vertex_pos[verts[2].index()];
            if signed_area2(pa, pb, pc) == 0.0 {
                return Err(FieldError::DegenerateCell { cell });
            }

            let lo = [
                pa.lat.min(pb.lat).min(pc.lat),
                pa.lon.min(pb.lon).min(pc.lon),
            ];
            let hi = [
                pa.lat.max(pb.lat).max(pc.lat),
                pa.lon.max(pb.lon).max(pc.lon),
            ];
            entries.push(CellEntry { bbox: AABB::from_corners(lo, hi), id: cell });
        }

        Ok(CurrentTopology {
            vertex_pos:  self.vertex_pos,
            vertex_vel:  self.vertex_vel,
            cell_verts:  self.cell_verts,
            spatial_idx: RTree::bulk_load(entries),
        })
    }
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
