use geo::{Contains, Coord, LineString, Point, Polygon};

/// An outer ring and its holes, prepared for repeated point-in-polygon queries.
///
/// Rings are tested in the plane, treating lon/lat as x/y. Each ring is wrapped
/// in its own hole-free `Polygon` so that "inside the outer ring and inside no
/// hole" is evaluated literally, ring by ring.
#[derive(Debug, Clone)]
pub struct RingSet {
    outer: Polygon<f64>,
    holes: Vec<Polygon<f64>>,
}

impl RingSet {
    /// Build from an outer ring and a list of holes.
    pub fn new(outer: &[Coord<f64>], holes: &[Vec<Coord<f64>>]) -> Self {
        Self {
            outer: ring_polygon(outer),
            holes: holes.iter().map(|hole| ring_polygon(hole)).collect(),
        }
    }

    /// Build from a GeoJSON-style ring list: index 0 is the outer ring, the
    /// rest are holes. An empty list contains nothing.
    pub fn from_rings(rings: &[Vec<Coord<f64>>]) -> Self {
        match rings.split_first() {
            Some((outer, holes)) => Self::new(outer, holes),
            None => Self::new(&[], &[]),
        }
    }

    /// Get the outer ring.
    #[inline] pub fn outer(&self) -> &LineString<f64> { self.outer.exterior() }

    /// Get the number of holes.
    #[inline] pub fn num_holes(&self) -> usize { self.holes.len() }

    /// True iff `coord` is strictly inside the outer ring and inside none of
    /// the holes. Points on a ring boundary count as outside that ring.
    pub fn contains(&self, coord: Coord<f64>) -> bool {
        let point = Point::from(coord);
        self.outer.contains(&point) && !self.holes.iter().any(|hole| hole.contains(&point))
    }
}

#[inline]
fn ring_polygon(ring: &[Coord<f64>]) -> Polygon<f64> {
    Polygon::new(LineString::from(ring.to_vec()), vec![])
}
