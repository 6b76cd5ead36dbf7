//! A B-spline carrying several parallel pole tracks.

use knotweave_core::traits::Validate;
use knotweave_core::{KwError, Result};
use knotweave_geometry::nurbs::{deboor, knot};
use knotweave_geometry::BSplineCurve;
use knotweave_math::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::continuity::Continuity;
use crate::multi_point::MultiPoint;

/// One B-spline per track, all sharing degree, knots and multiplicities.
///
/// The default value is the empty curve: no poles, no knots, degree 0.
/// Deserialization accepts the empty curve and otherwise runs [`Validate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "MultiBSpCurveData")]
pub struct MultiBSpCurve {
    degree: usize,
    poles: Vec<MultiPoint>,
    knots: Vec<f64>,
    mults: Vec<usize>,
}

#[derive(Deserialize)]
struct MultiBSpCurveData {
    degree: usize,
    poles: Vec<MultiPoint>,
    knots: Vec<f64>,
    mults: Vec<usize>,
}

impl TryFrom<MultiBSpCurveData> for MultiBSpCurve {
    type Error = KwError;

    fn try_from(data: MultiBSpCurveData) -> Result<Self> {
        let curve = Self {
            degree: data.degree,
            poles: data.poles,
            knots: data.knots,
            mults: data.mults,
        };
        if curve == Self::default() {
            return Ok(curve);
        }
        curve.validate()?;
        Ok(curve)
    }
}

impl MultiBSpCurve {
    pub fn new(degree: usize, poles: Vec<MultiPoint>, knots: Vec<f64>, mults: Vec<usize>) -> Result<Self> {
        let curve = Self {
            degree,
            poles,
            knots,
            mults,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn is_empty(&self) -> bool {
        self.poles.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn nb_poles(&self) -> usize {
        self.poles.len()
    }

    pub fn poles(&self) -> &[MultiPoint] {
        &self.poles
    }

    pub fn pole(&self, index: usize) -> Result<&MultiPoint> {
        KwError::check_index(index, self.poles.len())?;
        Ok(&self.poles[index])
    }

    /// Mutable pole access. Shape changes are not possible through it.
    pub fn pole_mut(&mut self, index: usize) -> Result<&mut MultiPoint> {
        KwError::check_index(index, self.poles.len())?;
        Ok(&mut self.poles[index])
    }

    /// Distinct knot values.
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn multiplicities(&self) -> &[usize] {
        &self.mults
    }

    pub fn flat_knots(&self) -> Vec<f64> {
        knot::flatten_knots(&self.knots, &self.mults)
    }

    /// `(nb3d, nb2d)`, or `(0, 0)` for the empty curve.
    pub fn shape(&self) -> (usize, usize) {
        self.poles.first().map(MultiPoint::shape).unwrap_or((0, 0))
    }

    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((*self.knots.first()?, *self.knots.last()?))
    }

    /// Continuity at each interior knot, decoded from its multiplicity.
    pub fn junctions(&self) -> Vec<Option<Continuity>> {
        let n = self.mults.len();
        if n < 3 {
            return Vec::new();
        }
        self.mults[1..n - 1]
            .iter()
            .map(|&m| Continuity::from_multiplicity(m, self.degree))
            .collect()
    }

    /// Poles of 3D track `track`.
    pub fn track(&self, track: usize) -> Result<Vec<Point3>> {
        self.poles.iter().map(|p| p.point(track)).collect()
    }

    /// Poles of 2D track `track`.
    pub fn track_2d(&self, track: usize) -> Result<Vec<Point2>> {
        self.poles.iter().map(|p| p.point_2d(track)).collect()
    }

    /// 3D track `track` as a standalone B-spline curve.
    pub fn curve(&self, track: usize) -> Result<BSplineCurve<Point3>> {
        BSplineCurve::new(self.degree, self.flat_knots(), self.track(track)?)
    }

    /// 2D track `track` as a standalone B-spline curve.
    pub fn curve_2d(&self, track: usize) -> Result<BSplineCurve<Point2>> {
        BSplineCurve::new(self.degree, self.flat_knots(), self.track_2d(track)?)
    }

    /// Every track evaluated at `u`.
    pub fn value(&self, u: f64) -> Result<MultiPoint> {
        self.evaluate(u, deboor::curve_point, deboor::curve_point)
    }

    /// Every track's first derivative at `u`.
    pub fn derivative(&self, u: f64) -> Result<MultiPoint> {
        self.evaluate(u, deboor::curve_tangent, deboor::curve_tangent)
    }

    fn evaluate(
        &self,
        u: f64,
        eval: fn(usize, &[f64], &[Point3], f64) -> Point3,
        eval_2d: fn(usize, &[f64], &[Point2], f64) -> Point2,
    ) -> Result<MultiPoint> {
        if self.is_empty() {
            return Err(KwError::InvalidOperation("cannot evaluate an empty B-spline".into()));
        }
        let flat = self.flat_knots();
        let (nb3d, nb2d) = self.shape();
        let points = (0..nb3d)
            .map(|k| Ok(eval(self.degree, &flat, &self.track(k)?, u)))
            .collect::<Result<Vec<_>>>()?;
        let points_2d = (0..nb2d)
            .map(|k| Ok(eval_2d(self.degree, &flat, &self.track_2d(k)?, u)))
            .collect::<Result<Vec<_>>>()?;
        Ok(MultiPoint::from_points(points, points_2d))
    }
}

impl Validate for MultiBSpCurve {
    fn validate(&self) -> Result<()> {
        if self.poles.is_empty() {
            return Err(KwError::Geometry("B-spline has no poles".into()));
        }
        if self.knots.len() != self.mults.len() || self.knots.len() < 2 {
            return Err(KwError::Geometry(format!(
                "{} knots with {} multiplicities",
                self.knots.len(),
                self.mults.len()
            )));
        }
        if let Some(i) = self.knots.windows(2).position(|w| w[1] <= w[0]) {
            return Err(KwError::Geometry(format!(
                "knots must be strictly increasing, got {} then {} at index {}",
                self.knots[i],
                self.knots[i + 1],
                i + 1
            )));
        }
        let last = self.mults.len() - 1;
        if let Some(i) = self
            .mults
            .iter()
            .enumerate()
            .position(|(i, &m)| m == 0 || m > self.degree + 1 || ((i == 0 || i == last) && m != self.degree + 1))
        {
            return Err(KwError::Geometry(format!(
                "multiplicity {} at knot {} is invalid for degree {}",
                self.mults[i], i, self.degree
            )));
        }
        let expected = self.mults.iter().sum::<usize>() - self.degree - 1;
        if expected != self.poles.len() {
            return Err(KwError::Geometry(format!(
                "multiplicities require {} poles, got {}",
                expected,
                self.poles.len()
            )));
        }
        let shape = self.poles[0].shape();
        if let Some(i) = self.poles.iter().position(|p| p.shape() != shape) {
            return Err(KwError::Geometry(format!(
                "pole {} has shape {:?}, expected {:?}",
                i,
                self.poles[i].shape(),
                shape
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotweave_math::{dvec2, dvec3};

    fn line_column(x: f64) -> MultiPoint {
        MultiPoint::from_points(vec![dvec3(x, 0.0, 0.0)], vec![dvec2(x, x)])
    }

    #[test]
    fn test_default_is_empty() {
        let c = MultiBSpCurve::default();
        assert!(c.is_empty());
        assert_eq!(c.domain(), None);
        assert_eq!(c.shape(), (0, 0));
        assert!(c.value(0.0).is_err());
    }

    #[test]
    fn test_value_on_linear_spline() {
        let c = MultiBSpCurve::new(
            1,
            vec![line_column(0.0), line_column(1.0), line_column(3.0)],
            vec![0.0, 1.0, 2.0],
            vec![2, 1, 2],
        )
        .unwrap();
        assert_eq!(c.flat_knots(), vec![0.0, 0.0, 1.0, 2.0, 2.0]);
        let v = c.value(1.5).unwrap();
        assert!((v.point(0).unwrap() - dvec3(2.0, 0.0, 0.0)).length() < 1e-12);
        assert!((v.point_2d(0).unwrap() - dvec2(2.0, 2.0)).length() < 1e-12);
        let d = c.derivative(0.5).unwrap();
        assert!((d.point(0).unwrap() - dvec3(1.0, 0.0, 0.0)).length() < 1e-12);
        assert_eq!(c.curve_2d(0).unwrap().control_points.len(), 3);
    }

    #[test]
    fn test_validate_pole_count() {
        let err = MultiBSpCurve::new(1, vec![line_column(0.0)], vec![0.0, 1.0], vec![2, 2]);
        assert!(matches!(err, Err(KwError::Geometry(_))));
    }

    #[test]
    fn test_validate_end_multiplicity() {
        let err = MultiBSpCurve::new(
            2,
            vec![line_column(0.0), line_column(1.0)],
            vec![0.0, 1.0],
            vec![2, 2],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_junctions_decoded() {
        let c = MultiBSpCurve::new(
            2,
            (0..5).map(|i| line_column(i as f64)).collect(),
            vec![0.0, 1.0, 2.0],
            vec![3, 2, 3],
        )
        .unwrap();
        assert_eq!(c.junctions(), vec![Some(Continuity::C0)]);
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let pole = serde_json::to_value(line_column(1.0)).unwrap();
        let json = serde_json::json!({
            "degree": 2,
            "poles": [pole],
            "knots": [],
            "mults": [],
        });
        let err = serde_json::from_value::<MultiBSpCurve>(json).unwrap_err();
        assert!(err.to_string().contains("knots"));

        let empty = MultiBSpCurve::default();
        let back: MultiBSpCurve = serde_json::from_str(&serde_json::to_string(&empty).unwrap()).unwrap();
        assert!(back.is_empty());
    }
}
