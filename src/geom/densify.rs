use geo::Coord;

use super::sphere::{angular_distance, interpolate};

/// Returns true if the two coordinates are more than `step` degrees apart on
/// either axis.
#[inline]
fn exceeds(a: Coord<f64>, b: Coord<f64>, step: f64) -> bool {
    (a.x - b.x).abs() > step || (a.y - b.y).abs() > step
}

/// Deepest bisection `densify_line` will recurse to, whatever it is asked for.
pub const MAX_DEPTH: u32 = 64;

/// Most points inserted into a single segment or ring edge.
pub const MAX_SEGMENT_POINTS: usize = 1 << 16;

/// Densify a line for outline drawing.
///
/// Every segment whose endpoints differ by more than `step` degrees in
/// longitude or latitude is bisected at its planar midpoint, recursively,
/// until all consecutive pairs are within `step` on both axes.
///
/// Each segment is bisected at most `max_depth` levels deep (never more than
/// [`MAX_DEPTH`]) and receives at most twice the points an in-range segment
/// (span clamped to 360 degrees) would need, and never more than
/// [`MAX_SEGMENT_POINTS`]. Out-of-range or non-finite coordinates hit these
/// limits; the segment is then kept as far as it got and a warning is logged.
pub fn densify_line(coords: &[Coord<f64>], step: f64, max_depth: u32) -> Vec<Coord<f64>> {
    let Some(&first) = coords.first() else { return Vec::new() };
    let max_depth = max_depth.min(MAX_DEPTH);

    let mut out = Vec::with_capacity(coords.len());
    out.push(first);

    let mut stalled = false;
    for pair in coords.windows(2) {
        let mut budget = segment_budget(pair[0], pair[1], step, max_depth);
        stalled |= !bisect(pair[0], pair[1], step, max_depth, &mut budget, &mut out);
        out.push(pair[1]);
    }

    if stalled {
        tracing::warn!(
            "[densify_line] segment still exceeds {step} degrees at the bisection limit; keeping partial result"
        );
    }
    out
}

/// Number of midpoints a segment may receive.
fn segment_budget(a: Coord<f64>, b: Coord<f64>, step: f64, max_depth: u32) -> usize {
    let by_depth = 1usize.checked_shl(max_depth).map_or(usize::MAX, |n| n - 1);
    let cap = MAX_SEGMENT_POINTS.min(by_depth);

    // Bisecting an in-range segment down to `step` takes fewer than 2 * span / step points.
    let span = (a.x - b.x).abs().max((a.y - b.y).abs()).min(360.0);
    let needed = 2.0 * (span / step).ceil();
    if needed.is_finite() && needed >= 0.0 { (needed as usize).min(cap) } else { cap }
}

/// Push the interior points of `a..b` (exclusive of both ends) into `out`,
/// spending one unit of `budget` per point. Returns false if the depth or
/// point budget ran out before the segment converged.
fn bisect(a: Coord<f64>, b: Coord<f64>, step: f64, depth: u32, budget: &mut usize, out: &mut Vec<Coord<f64>>) -> bool {
    if !exceeds(a, b, step) { return true }
    if depth == 0 || *budget == 0 { return false }

    let mid = Coord { x: (a.x + b.x) / 2.0, y: (a.y + b.y) / 2.0 };
    let left = bisect(a, mid, step, depth - 1, budget, out);
    if *budget == 0 { return false }
    *budget -= 1;
    out.push(mid);
    let right = bisect(mid, b, step, depth - 1, budget, out);
    left && right
}

/// Densify a closed ring for mesh generation.
///
/// Walks every consecutive pair, always emitting the first point of the pair,
/// and fills edges longer than `step` degrees of arc with points interpolated
/// along the great circle at even spacing (`ceil(dist / step) - 1` points, at
/// most [`MAX_SEGMENT_POINTS`]). The closing point of the ring is not
/// repeated. A step that is not finite and positive inserts nothing.
pub fn densify_ring(ring: &[Coord<f64>], step: f64) -> Vec<Coord<f64>> {
    let fill = step.is_finite() && step > 0.0;

    let mut out = Vec::with_capacity(ring.len());
    for pair in ring.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        out.push(p1);

        let dist = angular_distance(p1, p2).to_degrees();
        if fill && dist > step {
            let segments = ((dist / step).ceil() as usize).min(MAX_SEGMENT_POINTS);
            out.extend((1..segments).map(|j| interpolate(p1, p2, j as f64 / segments as f64)));
        }
    }
    out
}
