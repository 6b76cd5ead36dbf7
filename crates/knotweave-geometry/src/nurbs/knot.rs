//! Knot vector utilities for B-spline evaluation.

use knotweave_core::{KwError, Result};

/// Find the knot span index for parameter `t` in the knot vector.
///
/// Returns the index `i` such that `knots[i] <= t < knots[i+1]`,
/// with special handling for the upper boundary.
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The flat knot vector
/// * `n` - Number of control points minus 1
/// * `t` - Parameter value
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    mid
}

/// Compute the `degree + 1` non-vanishing basis functions at parameter `t`,
/// `N_{span-degree,degree}(t)` through `N_{span,degree}(t)`.
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }

        n[j] = saved;
    }

    n
}

/// Expand distinct knot values and their multiplicities into a flat knot vector.
///
/// `flatten_knots(&[0.0, 1.0], &[3, 3])` gives `[0, 0, 0, 1, 1, 1]`.
pub fn flatten_knots(knots: &[f64], mults: &[usize]) -> Vec<f64> {
    knots
        .iter()
        .zip(mults)
        .flat_map(|(&k, &m)| std::iter::repeat(k).take(m))
        .collect()
}

/// Collapse a flat knot vector into distinct values and multiplicities.
/// Values closer than `tol` are merged into the first one.
pub fn compress_knots(flat: &[f64], tol: f64) -> (Vec<f64>, Vec<usize>) {
    let mut knots: Vec<f64> = Vec::new();
    let mut mults: Vec<usize> = Vec::new();
    for &k in flat {
        match knots.last() {
            Some(&last) if (k - last).abs() < tol => {
                if let Some(m) = mults.last_mut() {
                    *m += 1;
                }
            }
            _ => {
                knots.push(k);
                mults.push(1);
            }
        }
    }
    (knots, mults)
}

/// Check that a flat knot vector is non-decreasing and has length
/// `n_poles + degree + 1`.
pub fn validate_knot_vector(knots: &[f64], degree: usize, n_poles: usize) -> Result<()> {
    if n_poles <= degree {
        return Err(KwError::Geometry(format!(
            "degree {} needs at least {} poles, got {}",
            degree,
            degree + 1,
            n_poles
        )));
    }
    if knots.len() != n_poles + degree + 1 {
        return Err(KwError::Geometry(format!(
            "knot vector length must be n + p + 1, got {} knots for {} poles with degree {}",
            knots.len(),
            n_poles,
            degree
        )));
    }
    if let Some(i) = knots.windows(2).position(|w| w[1] < w[0]) {
        return Err(KwError::Geometry(format!(
            "knot vector decreases at index {}: {} > {}",
            i + 1,
            knots[i],
            knots[i + 1]
        )));
    }
    Ok(())
}
