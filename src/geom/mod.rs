//! Geometry pipeline: sphere projection, edge densification, containment and
//! polygon fill triangulation. Everything here works on lon/lat `geo::Coord`s
//! (x = longitude, y = latitude, degrees).

mod contain;
mod densify;
mod grid;
mod mesh;
mod sphere;

pub use contain::RingSet;
pub use densify::{densify_line, densify_ring, MAX_DEPTH, MAX_SEGMENT_POINTS};
pub use grid::{interior_grid, MAX_GRID_POINTS};
pub use mesh::{centroid, triangulate, triangulate_planar, Triangle, TriangleMesh};
pub use sphere::{angular_distance, interpolate, project, SpherePoint};
