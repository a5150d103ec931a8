//! Quadrilateral fitting: coarse per-point angles voted into a 32-bin
//! histogram, one line fit per dominant bin, and corner intersections.

use log::trace;
use nalgebra::{Point2, Vector2};

use crate::debug::{DebugCanvas, DebugColor};
use crate::geometry::{cross, intersect_lines, Line, LineFit};
use crate::outline::EdgeList;

/// Boundary points this far apart (cyclically) bracket the tangent estimate.
const ANGLE_DELTA: i32 = 4;

/// Reusable per-candidate angle storage.
#[derive(Debug)]
pub(crate) struct AngleScratch {
    angles: Vec<u8>,
}

impl AngleScratch {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            angles: Vec::with_capacity(cap),
        }
    }
}

/// Map `(x, y)` to an 8-bit angle code covering `[0°, 360°)`.
///
/// Piecewise-linear in the tangent, integer division truncating toward
/// zero; `(0, 0)` maps to 0. Exact only at the eight cardinal/diagonal
/// directions, which is all the binning needs.
pub(crate) fn approx_atan2(y: i32, x: i32) -> u8 {
    if x == 0 && y == 0 {
        return 0;
    }
    let t = if y.abs() > x.abs() {
        let mut t = (-x * 32) / y + 64;
        if y < 0 {
            t += 128;
        }
        t
    } else {
        let mut t = (y * 32) / x;
        if x < 0 {
            t += 128;
        }
        t
    };
    (t & 255) as u8
}

/// The two overlapping histogram bins an angle code votes into.
///
/// Bins are 16 codes wide and offset by 8, so every true edge orientation
/// has at least one bin that captures the whole edge undivided.
#[inline]
fn bucket_pair(t: u8) -> (usize, usize) {
    let t = t as usize;
    let b0 = (t / 16) * 2;
    let b1 = (((t + 8) / 16) * 2 + 31) & 31;
    (b0, b1)
}

/// Index of the fullest bin; ties go to the lower index.
fn largest_bucket(buckets: &[u32; 32]) -> usize {
    let mut max = 0;
    let mut max_idx = 0;
    for (i, &b) in buckets.iter().enumerate() {
        if b > max {
            max = b;
            max_idx = i;
        }
    }
    max_idx
}

#[inline]
fn comp_and_swap(v: &mut [usize; 4], a: usize, b: usize) {
    if v[a] > v[b] {
        v.swap(a, b);
    }
}

/// Fit four lines to the outline and intersect them into corners.
///
/// Fails when the angle histogram does not look like a quad, when a chosen
/// bin holds too few points for a line fit, or when adjacent fitted lines
/// are parallel.
pub(crate) fn fit_quad(
    edges: &EdgeList,
    scratch: &mut AngleScratch,
    dbg: &mut DebugCanvas,
) -> Option<[Point2<f32>; 4]> {
    let n = edges.len();
    scratch.angles.clear();
    let mut buckets = [0u32; 32];

    for i in 0..n {
        let (x1, y1) = edges.pt_wrapped(i as i32 - ANGLE_DELTA);
        let (x2, y2) = edges.pt_wrapped(i as i32 + ANGLE_DELTA);
        let t = approx_atan2(y2 - y1, x2 - x1);
        scratch.angles.push(t);

        let (b0, b1) = bucket_pair(t);
        buckets[b0] += 1;
        buckets[b1] += 1;
    }

    // greedy four largest bins, suppressing each winner's neighbors so the
    // four picks are mutually non-adjacent
    let mut total: i64 = 0;
    let mut bins = [0usize; 4];
    for bin in &mut bins {
        let idx = largest_bucket(&buckets);
        total += buckets[idx] as i64;
        buckets[(idx + 31) & 31] = 0;
        buckets[idx] = 0;
        buckets[(idx + 1) & 31] = 0;
        *bin = idx;
    }

    // each corner may scatter at most 2·Δ+1 points outside the four edges;
    // more strays than that means the outline is not four-sided
    if total < n as i64 - (2 * ANGLE_DELTA as i64 + 1) * 4 {
        trace!("angle histogram too dispersed ({total} of {n} points kept)");
        return None;
    }

    // ascending bin index = angular traversal order of the four edges
    comp_and_swap(&mut bins, 0, 2);
    comp_and_swap(&mut bins, 1, 3);
    comp_and_swap(&mut bins, 0, 1);
    comp_and_swap(&mut bins, 2, 3);
    comp_and_swap(&mut bins, 1, 2);

    let mut lines = [Line {
        center: Point2::origin(),
        dir: Vector2::zeros(),
    }; 4];

    for (e, line) in lines.iter_mut().enumerate() {
        let mut fit = LineFit::default();
        for i in 0..n {
            let (b0, b1) = bucket_pair(scratch.angles[i]);
            if b0 != bins[e] && b1 != bins[e] {
                continue;
            }
            let (x, y) = edges.pt(i);
            fit.add(x as f32 + 0.5, y as f32 + 0.5);
            dbg.plot(x, y, DebugColor::EdgePoint);
        }
        *line = fit.solve()?;
    }

    // the mean of the four line centers is interior for any convex quad
    let mut acc = Vector2::zeros();
    for line in &lines {
        acc += line.center.coords;
    }
    let centroid = Point2::from(acc * 0.25);

    for line in &mut lines {
        if cross(line.dir, line.center - centroid) > 0.0 {
            line.dir = -line.dir;
        }
        // the fit ran over centers of pixels inside the outline; push the
        // line half a pixel outward to land on the true edge
        line.center += Vector2::new(line.dir.y, -line.dir.x) * 0.5;
    }

    let mut corners = [Point2::origin(); 4];
    for e in 0..4 {
        corners[e] = intersect_lines(&lines[e], &lines[(e + 1) & 3])?;
    }
    Some(corners)
}
