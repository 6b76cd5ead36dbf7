//! Non-rational B-spline curves over 2D or 3D poles.

use knotweave_core::Result;
use knotweave_math::{ControlPoint, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;
use crate::nurbs::{deboor, knot};

/// A B-spline curve defined by degree, flat knot vector, and control points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BSplineCurve<P = Point3> {
    pub degree: usize,
    pub knots: Vec<f64>,
    pub control_points: Vec<P>,
}

impl<P: ControlPoint> BSplineCurve<P> {
    pub fn new(degree: usize, knots: Vec<f64>, control_points: Vec<P>) -> Result<Self> {
        knot::validate_knot_vector(&knots, degree, control_points.len())?;
        Ok(Self {
            degree,
            knots,
            control_points,
        })
    }

    /// Build from distinct knot values and their multiplicities.
    pub fn from_knots_and_mults(
        degree: usize,
        knots: &[f64],
        mults: &[usize],
        control_points: Vec<P>,
    ) -> Result<Self> {
        Self::new(degree, knot::flatten_knots(knots, mults), control_points)
    }

    pub fn point_at(&self, t: f64) -> P {
        deboor::curve_point(self.degree, &self.knots, &self.control_points, t)
    }

    pub fn tangent_at(&self, t: f64) -> P {
        deboor::curve_tangent(self.degree, &self.knots, &self.control_points, t)
    }

    pub fn domain(&self) -> (f64, f64) {
        let p = self.degree;
        (self.knots[p], self.knots[self.knots.len() - p - 1])
    }

    /// Distinct knot values and multiplicities.
    pub fn distinct_knots(&self) -> (Vec<f64>, Vec<usize>) {
        knot::compress_knots(&self.knots, 1e-12)
    }
}

impl Curve for BSplineCurve<Point3> {
    fn point_at(&self, t: f64) -> Point3 {
        deboor::curve_point(self.degree, &self.knots, &self.control_points, t)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        deboor::curve_tangent(self.degree, &self.knots, &self.control_points, t)
    }

    fn domain(&self) -> (f64, f64) {
        BSplineCurve::domain(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotweave_math::{DVec2, DVec3};

    #[test]
    fn test_bspline_quadratic() {
        // Quadratic Bezier curve (degree 2, 3 control points)
        let curve = BSplineCurve::new(
            2,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(0.5, 1.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
            ],
        )
        .unwrap();

        assert!((curve.point_at(0.0) - DVec3::ZERO).length() < 1e-10);
        assert!((curve.point_at(1.0) - DVec3::X).length() < 1e-10);

        // 0.25*P0 + 0.5*P1 + 0.25*P2 = (0.5, 0.5, 0)
        let pm = curve.point_at(0.5);
        assert!((pm.x - 0.5).abs() < 1e-10);
        assert!((pm.y - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_bspline_domain_and_knots() {
        let curve = BSplineCurve::from_knots_and_mults(
            2,
            &[0.0, 1.0, 2.0, 3.0],
            &[3, 1, 1, 3],
            vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::ONE],
        )
        .unwrap();
        assert_eq!(curve.domain(), (0.0, 3.0));
        assert_eq!(
            curve.distinct_knots(),
            (vec![0.0, 1.0, 2.0, 3.0], vec![3, 1, 1, 3])
        );
    }

    #[test]
    fn test_bspline_rejects_bad_knots() {
        let result = BSplineCurve::new(1, vec![0.0, 1.0, 1.0], vec![DVec2::ZERO, DVec2::ONE]);
        assert!(result.is_err());
    }

    #[test]
    fn test_curve_trait_tangent_direction() {
        let curve = BSplineCurve::new(
            1,
            vec![0.0, 0.0, 1.0, 1.0],
            vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)],
        )
        .unwrap();
        let dyn_curve: &dyn Curve = &curve;
        let t = dyn_curve.tangent_at(0.5);
        assert!(t.x > 0.0);
        assert!(t.y.abs() < 1e-10);
        assert!(!dyn_curve.is_closed());
    }
}
