//! Bezier segments: evaluation, splitting and exact degree elevation.

use knotweave_core::{KwError, Result};
use knotweave_math::ControlPoint;
use serde::{Deserialize, Serialize};

/// Binomial coefficient `C(n, k)` as a float. Zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut c = 1.0;
    for i in 0..k {
        c = c * (n - i) as f64 / (i + 1) as f64;
    }
    c
}

/// Re-express a Bezier of degree `poles.len() - 1` exactly as one of degree
/// `target`.
///
/// Uses the closed form
/// `Q_i = sum_j C(d, j) C(D - d, i - j) / C(D, i) * P_j`
/// with `max(0, i - (D - d)) <= j <= min(d, i)`.
pub fn elevate_poles<P: ControlPoint>(poles: &[P], target: usize) -> Result<Vec<P>> {
    if poles.is_empty() {
        return Err(KwError::Geometry("Bezier segment has no poles".into()));
    }
    let degree = poles.len() - 1;
    if target < degree {
        return Err(KwError::InvalidDegree { degree, target });
    }
    if target == degree {
        return Ok(poles.to_vec());
    }

    let raise = target - degree;
    let elevated = (0..=target)
        .map(|i| {
            let denom = binomial(target, i);
            let lo = i.saturating_sub(raise);
            let hi = degree.min(i);
            let mut q = P::ORIGIN;
            for (j, &p) in poles.iter().enumerate().take(hi + 1).skip(lo) {
                q += p * (binomial(degree, j) * binomial(raise, i - j) / denom);
            }
            q
        })
        .collect();

    log::trace!("elevated Bezier from degree {} to {}", degree, target);
    Ok(elevated)
}

/// Evaluate a Bezier segment at `t` in `[0, 1]` by repeated linear interpolation.
pub fn de_casteljau<P: ControlPoint>(poles: &[P], t: f64) -> P {
    let mut work = poles.to_vec();
    let s = 1.0 - t;
    for level in (1..work.len()).rev() {
        for i in 0..level {
            work[i] = work[i] * s + work[i + 1] * t;
        }
    }
    work.first().copied().unwrap_or(P::ORIGIN)
}

/// Poles of the hodograph: `d * (P_{i+1} - P_i)`.
pub fn derivative_poles<P: ControlPoint>(poles: &[P]) -> Vec<P> {
    let d = poles.len().saturating_sub(1) as f64;
    poles.windows(2).map(|w| (w[1] - w[0]) * d).collect()
}

/// Split a Bezier segment at `t`, returning the poles of both halves.
/// The halves share the split point.
pub fn split_poles<P: ControlPoint>(poles: &[P], t: f64) -> (Vec<P>, Vec<P>) {
    let n = poles.len();
    let mut work = poles.to_vec();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    let s = 1.0 - t;

    for level in (0..n).rev() {
        left.push(work[0]);
        right.push(work[level]);
        for i in 0..level {
            work[i] = work[i] * s + work[i + 1] * t;
        }
    }
    right.reverse();
    (left, right)
}

/// A polynomial Bezier curve over `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierCurve<P> {
    poles: Vec<P>,
}

impl<P: ControlPoint> BezierCurve<P> {
    pub fn new(poles: Vec<P>) -> Result<Self> {
        if poles.is_empty() {
            return Err(KwError::Geometry("Bezier segment has no poles".into()));
        }
        Ok(Self { poles })
    }

    pub fn degree(&self) -> usize {
        self.poles.len() - 1
    }

    pub fn poles(&self) -> &[P] {
        &self.poles
    }

    pub fn start(&self) -> P {
        self.poles[0]
    }

    pub fn end(&self) -> P {
        self.poles[self.poles.len() - 1]
    }

    pub fn point_at(&self, t: f64) -> P {
        de_casteljau(&self.poles, t)
    }

    pub fn tangent_at(&self, t: f64) -> P {
        de_casteljau(&derivative_poles(&self.poles), t)
    }

    /// The same curve expressed with degree `target`.
    pub fn elevate(&self, target: usize) -> Result<Self> {
        Ok(Self {
            poles: elevate_poles(&self.poles, target)?,
        })
    }

    pub fn split(&self, t: f64) -> (Self, Self) {
        let (left, right) = split_poles(&self.poles, t);
        (Self { poles: left }, Self { poles: right })
    }
}
