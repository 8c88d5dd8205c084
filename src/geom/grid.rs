use geo::{BoundingRect, Coord};

use super::contain::RingSet;

/// Most candidate points `interior_grid` will test (a whole-globe lattice at
/// a quarter degree is about 1.04 million).
pub const MAX_GRID_POINTS: usize = 1 << 22;

/// Sample a regular grid over the outer ring's lon/lat bounding box, keeping
/// only the points that fall inside `rings`.
///
/// Grid lines start at the ceiling of the minimum bound and advance by `step`
/// degrees up to and including the maximum bound. A lattice with more than
/// [`MAX_GRID_POINTS`] candidates is not sampled at all (the fill then rests
/// on the border points alone).
pub fn interior_grid(rings: &RingSet, step: f64) -> Vec<Coord<f64>> {
    let Some(bbox) = rings.outer().bounding_rect() else { return Vec::new() };
    if step.is_nan() || step <= 0.0 { return Vec::new() }

    let (min, max) = (bbox.min(), bbox.max());
    if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) { return Vec::new() }

    let candidates = lines(min.x, max.x, step) * lines(min.y, max.y, step);
    if candidates > MAX_GRID_POINTS as f64 {
        tracing::warn!("[interior_grid] skipping grid of {candidates:e} points at step {step} (limit {MAX_GRID_POINTS})");
        return Vec::new();
    }

    axis(min.x, max.x, step)
        .flat_map(|x| axis(min.y, max.y, step).map(move |y| Coord { x, y }))
        .filter(|&coord| rings.contains(coord))
        .collect()
}

/// Number of grid lines `axis` yields, as a float so huge spans cannot overflow.
#[inline]
fn lines(lo: f64, hi: f64, step: f64) -> f64 {
    ((hi - lo.ceil()) / step).floor().max(-1.0) + 1.0
}

/// Grid line positions `ceil(lo), ceil(lo) + step, ...` not exceeding `hi`.
#[inline]
fn axis(lo: f64, hi: f64, step: f64) -> impl Iterator<Item = f64> {
    let start = lo.ceil();
    (0usize..)
        .map(move |i| start + i as f64 * step)
        .take_while(move |&v| v <= hi)
}
