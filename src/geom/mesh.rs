use geo::Coord;
use serde::Serialize;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use super::{contain::RingSet, densify::densify_ring, grid::interior_grid, sphere::{project, SpherePoint}};

/// A triangle on the sphere.
pub type Triangle = [SpherePoint; 3];

/// An unindexed triangle soup filling one polygon on the sphere.
/// Vertices are repeated per triangle; no sharing is implied.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Get the number of triangles.
    #[inline] pub fn len(&self) -> usize { self.triangles.len() }

    /// Check if the mesh has no triangles.
    #[inline] pub fn is_empty(&self) -> bool { self.triangles.is_empty() }

    /// Get a reference to the list of triangles.
    #[inline] pub fn triangles(&self) -> &[Triangle] { &self.triangles }

    /// Iterate over every vertex, three per triangle.
    #[inline]
    pub fn vertices(&self) -> impl Iterator<Item = &SpherePoint> { self.triangles.iter().flatten() }
}

/// Triangulate a polygon (outer ring + holes) in the lon/lat plane.
///
/// Border points come from `densify_ring` over every ring at `border_step`,
/// interior points from a `grid_step` grid clipped to the polygon. The union is
/// Delaunay-triangulated and triangles whose centroid falls outside the
/// polygon (or inside a hole) are dropped.
pub fn triangulate_planar(rings: &[Vec<Coord<f64>>], border_step: f64, grid_step: f64) -> Vec<[Coord<f64>; 3]> {
    if rings.is_empty() { return Vec::new() }
    let ring_set = RingSet::from_rings(rings);

    let mut points: Vec<Coord<f64>> = rings.iter()
        .flat_map(|ring| densify_ring(ring, border_step))
        .collect();
    points.extend(interior_grid(&ring_set, grid_step));

    // Insertion order is fixed (border first, then grid) so output is reproducible.
    let mut delaunay = DelaunayTriangulation::<Point2<f64>>::new();
    let mut rejected = 0usize;
    for point in &points {
        if delaunay.insert(Point2::new(point.x, point.y)).is_err() { rejected += 1 }
    }
    if rejected > 0 {
        tracing::debug!("[triangulate] skipped {rejected} of {} points rejected by the triangulation", points.len());
    }

    delaunay.inner_faces()
        .map(|face| face.vertices().map(|v| {
            let p = v.position();
            Coord { x: p.x, y: p.y }
        }))
        .filter(|tri| ring_set.contains(centroid(tri)))
        .collect()
}

/// Triangulate a polygon and project the accepted triangles onto a sphere of
/// the given radius.
pub fn triangulate(rings: &[Vec<Coord<f64>>], radius: f64, border_step: f64, grid_step: f64) -> TriangleMesh {
    let triangles = triangulate_planar(rings, border_step, grid_step).into_iter()
        .map(|tri| tri.map(|coord| project(coord, radius)))
        .collect();
    TriangleMesh { triangles }
}

/// Planar centroid of a lon/lat triangle.
#[inline]
pub fn centroid(tri: &[Coord<f64>; 3]) -> Coord<f64> {
    Coord {
        x: (tri[0].x + tri[1].x + tri[2].x) / 3.0,
        y: (tri[0].y + tri[1].y + tri[2].y) / 3.0,
    }
}
