//! De Boor evaluation for B-spline curves over any [`ControlPoint`] type.

use knotweave_math::ControlPoint;

use super::knot::{basis_functions, find_span};

/// Evaluate a B-spline curve point at parameter `t`.
///
/// `knots` is the flat knot vector of length `control_points.len() + degree + 1`.
pub fn curve_point<P: ControlPoint>(degree: usize, knots: &[f64], control_points: &[P], t: f64) -> P {
    let n = control_points.len() - 1;
    let span = find_span(degree, knots, n, t);
    let basis = basis_functions(degree, knots, span, t);

    let mut point = P::ORIGIN;
    for (i, b) in basis.iter().enumerate() {
        point += control_points[span - degree + i] * *b;
    }

    point
}

/// Control points of the derivative curve, which has degree `degree - 1` and
/// flat knots `knots[1..len - 1]`.
pub fn derivative_control_points<P: ControlPoint>(
    degree: usize,
    knots: &[f64],
    control_points: &[P],
) -> Vec<P> {
    let p = degree as f64;
    control_points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let denom = knots[i + degree + 1] - knots[i + 1];
            // Zero-width span: the matching basis function vanishes everywhere.
            if denom == 0.0 {
                P::ORIGIN
            } else {
                (w[1] - w[0]) * (p / denom)
            }
        })
        .collect()
}

/// Evaluate the tangent (first derivative) of a B-spline curve at parameter `t`.
pub fn curve_tangent<P: ControlPoint>(
    degree: usize,
    knots: &[f64],
    control_points: &[P],
    t: f64,
) -> P {
    if degree == 0 || control_points.len() < 2 {
        return P::ORIGIN;
    }
    let derivs = derivative_control_points(degree, knots, control_points);
    curve_point(degree - 1, &knots[1..knots.len() - 1], &derivs, t)
}
