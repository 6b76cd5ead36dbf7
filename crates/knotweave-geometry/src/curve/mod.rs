//! Curve traits and implementations.

mod bspline;

use knotweave_math::{Point3, Vector3};

pub use bspline::BSplineCurve;

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Evaluate the tangent vector at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        let (t0, t1) = self.domain();
        (self.point_at(t0) - self.point_at(t1)).length() < 1e-10
    }
}
