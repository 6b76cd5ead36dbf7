//! Bezier-segments-to-B-spline bookkeeping: junction classification, merged
//! knot vector and per-segment pole slices.

use std::ops::Range;

use knotweave_core::Tolerance;
use knotweave_math::ControlPoint;

use crate::continuity::{Continuity, Junction};
use crate::multi_curve::MultiCurve;
use crate::options::ConcatOptions;

/// Classify how `prev` ends into `next`. Both segments must already share
/// one degree and one shape.
///
/// The junction is `C1` only when every track is tangent-continuous with the
/// same length ratio, since one knot spacing has to serve all tracks.
pub(crate) fn classify_junction(prev: &MultiCurve, next: &MultiCurve, options: &ConcatOptions) -> Junction {
    let tol = options.tolerance;
    let end = prev.last_pole();
    let start = next.first_pole();

    let touching = end
        .points()
        .iter()
        .zip(start.points())
        .all(|(a, b)| a.near(*b, tol))
        && end
            .points_2d()
            .iter()
            .zip(start.points_2d())
            .all(|(a, b)| a.near(*b, tol));
    if !touching || prev.degree() == 0 {
        return Junction::disjoint();
    }
    if !options.detect_tangency || prev.degree() < 2 {
        return Junction::c0();
    }

    let (nb3d, nb2d) = prev.shape();
    let mut ratios = Vec::with_capacity(nb3d + nb2d);
    for k in 0..nb3d {
        let pick = |c: &MultiCurve, i: usize| c.poles()[i].points()[k];
        match tangent_ratio(tangent_pair(prev, next, pick), tol) {
            Some(r) => ratios.push(r),
            None => return Junction::c0(),
        }
    }
    for k in 0..nb2d {
        let pick = |c: &MultiCurve, i: usize| c.poles()[i].points_2d()[k];
        match tangent_ratio(tangent_pair(prev, next, pick), tol) {
            Some(r) => ratios.push(r),
            None => return Junction::c0(),
        }
    }

    let ratio = ratios[0];
    if ratios.iter().all(|&r| tol.ratio_eq(r, ratio)) {
        Junction::c1(ratio)
    } else {
        Junction::c0()
    }
}

/// End tangent of `prev` and start tangent of `next` on one track.
fn tangent_pair<P: ControlPoint>(
    prev: &MultiCurve,
    next: &MultiCurve,
    pick: impl Fn(&MultiCurve, usize) -> P,
) -> (P, P) {
    let d = prev.degree();
    (pick(prev, d) - pick(prev, d - 1), pick(next, 1) - pick(next, 0))
}

/// `|next| / |prev|` when both tangents are non-degenerate and point the
/// same way.
fn tangent_ratio<P: ControlPoint>((prev, next): (P, P), tol: Tolerance) -> Option<f64> {
    let (lp, ln) = (prev.length(), next.length());
    if tol.is_zero(lp) || tol.is_zero(ln) {
        return None;
    }
    if prev.angle_between(next) > tol.angular {
        return None;
    }
    Some(ln / lp)
}

/// Knot vector, multiplicities and pole slices of a concatenation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KnotLayout {
    pub knots: Vec<f64>,
    pub mults: Vec<usize>,
    /// For every segment, the local pole indices copied into the result.
    pub ranges: Vec<Range<usize>>,
    pub nb_poles: usize,
}

impl KnotLayout {
    /// Layout for `junctions.len() + 1` segments of common `degree`.
    ///
    /// Each segment spans one parameter unit, except inside a run of `C1`
    /// junctions where each span is the previous one times the junction ratio.
    pub(crate) fn build(degree: usize, junctions: &[Junction]) -> Self {
        let nb_segments = junctions.len() + 1;
        let mut knots = Vec::with_capacity(nb_segments + 1);
        let mut mults = Vec::with_capacity(nb_segments + 1);
        let mut ranges = Vec::with_capacity(nb_segments);

        knots.push(0.0);
        mults.push(degree + 1);
        let mut span = 1.0;
        let mut position = 0.0;

        for k in 0..nb_segments {
            let before = k.checked_sub(1).map(|i| junctions[i].continuity);
            let after = junctions.get(k).map(|j| j.continuity);

            let first = match before {
                Some(Continuity::C0) | Some(Continuity::C1) => 1,
                _ => 0,
            };
            let last = match after {
                Some(Continuity::C1) => degree,
                _ => degree + 1,
            };
            ranges.push(first..last);

            position += span;
            knots.push(position);
            match junctions.get(k) {
                Some(j) => {
                    mults.push(j.continuity.multiplicity(degree));
                    span = if j.continuity == Continuity::C1 {
                        span * j.ratio
                    } else {
                        1.0
                    };
                }
                None => mults.push(degree + 1),
            }
        }

        let nb_poles = ranges.iter().map(|r| r.len()).sum();
        Self {
            knots,
            mults,
            ranges,
            nb_poles,
        }
    }
}
