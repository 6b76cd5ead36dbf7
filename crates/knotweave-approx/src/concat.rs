//! Merge a sequence of multi-track Bezier segments into one multi-track
//! B-spline.

use knotweave_core::{KwError, Result};

use crate::continuity::Junction;
use crate::convert::{classify_junction, KnotLayout};
use crate::multi_bspline::MultiBSpCurve;
use crate::multi_curve::MultiCurve;
use crate::options::ConcatOptions;

/// Accumulates Bezier segments and concatenates them on demand.
///
/// ```
/// use knotweave_approx::{BezierConcatenator, MultiCurve};
/// use knotweave_math::dvec3;
///
/// let mut concat = BezierConcatenator::new();
/// concat.append(MultiCurve::from_tracks(vec![vec![dvec3(0.0, 0.0, 0.0), dvec3(1.0, 0.0, 0.0)]], vec![]).unwrap());
/// concat.append(MultiCurve::from_tracks(vec![vec![dvec3(1.0, 0.0, 0.0), dvec3(1.0, 1.0, 0.0)]], vec![]).unwrap());
/// let spline = concat.perform().unwrap();
/// assert_eq!(spline.nb_poles(), 3);
/// assert_eq!(spline.multiplicities(), &[2, 1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BezierConcatenator {
    curves: Vec<MultiCurve>,
    spline: MultiBSpCurve,
    done: bool,
    options: ConcatOptions,
}

impl BezierConcatenator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConcatOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ConcatOptions {
        &self.options
    }

    /// Drop every accumulated segment and any previous result.
    pub fn reset(&mut self) {
        self.curves.clear();
        self.spline = MultiBSpCurve::default();
        self.done = false;
    }

    pub fn append(&mut self, curve: MultiCurve) {
        self.curves.push(curve);
    }

    pub fn curves(&self) -> &[MultiCurve] {
        &self.curves
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Concatenate the accumulated segments.
    pub fn perform(&mut self) -> Result<&MultiBSpCurve> {
        let result = concatenate(&self.curves, &self.options);
        self.store(result)
    }

    /// Concatenate `curves` instead of the accumulated segments, which are
    /// left untouched.
    pub fn perform_on(&mut self, curves: &[MultiCurve]) -> Result<&MultiBSpCurve> {
        let result = concatenate(curves, &self.options);
        self.store(result)
    }

    /// The last result. Empty until a `perform` succeeds.
    pub fn value(&self) -> &MultiBSpCurve {
        &self.spline
    }

    pub fn value_mut(&mut self) -> &mut MultiBSpCurve {
        &mut self.spline
    }

    /// Take the last result, leaving an empty curve behind.
    pub fn take_value(&mut self) -> MultiBSpCurve {
        self.done = false;
        std::mem::take(&mut self.spline)
    }

    fn store(&mut self, result: Result<MultiBSpCurve>) -> Result<&MultiBSpCurve> {
        match result {
            Ok(spline) => {
                self.spline = spline;
                self.done = true;
                Ok(&self.spline)
            }
            Err(err) => {
                log::warn!("Bezier concatenation rejected: {}", err);
                self.spline = MultiBSpCurve::default();
                self.done = false;
                Err(err)
            }
        }
    }
}

/// Check a batch before touching any pole and return its shared
/// `(nb3d, nb2d)` shape.
fn validate_batch(curves: &[MultiCurve]) -> Result<(usize, usize)> {
    let first = curves.first().ok_or(KwError::EmptyBatch)?;
    let expected = first.shape();
    if expected == (0, 0) {
        return Err(KwError::Geometry("Bezier segments carry no pole tracks".into()));
    }
    for (segment, curve) in curves.iter().enumerate().skip(1) {
        let found = curve.shape();
        if found != expected {
            return Err(KwError::InconsistentDimension {
                segment,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

/// Concatenate `curves` into one B-spline of their highest degree.
pub fn concatenate(curves: &[MultiCurve], options: &ConcatOptions) -> Result<MultiBSpCurve> {
    let (nb3d, nb2d) = validate_batch(curves)?;
    log::debug!(
        "concatenating {} Bezier segments with {} 3D and {} 2D tracks",
        curves.len(),
        nb3d,
        nb2d
    );

    if let [single] = curves {
        let degree = single.degree();
        return MultiBSpCurve::new(
            degree,
            single.poles().to_vec(),
            vec![0.0, 1.0],
            vec![degree + 1, degree + 1],
        );
    }

    let degree = curves.iter().map(MultiCurve::degree).max().unwrap_or(0);
    log::debug!("common degree {}", degree);

    let elevated = curves
        .iter()
        .map(|c| c.elevated(degree))
        .collect::<Result<Vec<_>>>()?;

    let junctions: Vec<Junction> = elevated
        .windows(2)
        .map(|pair| classify_junction(&pair[0], &pair[1], options))
        .collect();
    for (k, j) in junctions.iter().enumerate() {
        log::trace!("junction {}: {:?} (ratio {})", k, j.continuity, j.ratio);
    }

    let layout = KnotLayout::build(degree, &junctions);
    let mut poles = Vec::with_capacity(layout.nb_poles);
    for (curve, range) in elevated.iter().zip(&layout.ranges) {
        poles.extend_from_slice(&curve.poles()[range.clone()]);
    }
    log::debug!(
        "concatenated B-spline: {} poles, {} distinct knots",
        poles.len(),
        layout.knots.len()
    );

    MultiBSpCurve::new(degree, poles, layout.knots, layout.mults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotweave_math::{dvec2, dvec3};

    fn line_3d(a: (f64, f64, f64), b: (f64, f64, f64)) -> MultiCurve {
        MultiCurve::from_tracks(vec![vec![dvec3(a.0, a.1, a.2), dvec3(b.0, b.1, b.2)]], vec![]).unwrap()
    }

    #[test]
    fn test_empty_batch() {
        let mut concat = BezierConcatenator::new();
        assert_eq!(concat.perform().unwrap_err(), KwError::EmptyBatch);
        assert!(!concat.is_done());
        assert!(concat.value().is_empty());
    }

    #[test]
    fn test_inconsistent_dimension() {
        let mut concat = BezierConcatenator::new();
        concat.append(line_3d((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));
        concat.append(
            MultiCurve::from_tracks(vec![], vec![vec![dvec2(1.0, 0.0), dvec2(2.0, 0.0)]]).unwrap(),
        );
        assert_eq!(
            concat.perform().unwrap_err(),
            KwError::InconsistentDimension {
                segment: 1,
                expected: (1, 0),
                found: (0, 1),
            }
        );
    }

    #[test]
    fn test_failed_perform_clears_previous_value() {
        let mut concat = BezierConcatenator::new();
        concat.append(line_3d((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));
        concat.perform().unwrap();
        assert!(concat.is_done());

        assert!(concat.perform_on(&[]).is_err());
        assert!(!concat.is_done());
        assert!(concat.value().is_empty());
        assert_eq!(concat.len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut concat = BezierConcatenator::new();
        concat.append(line_3d((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));
        concat.perform().unwrap();
        concat.reset();
        assert!(concat.is_empty());
        assert!(!concat.is_done());
        assert!(concat.value().is_empty());
    }

    #[test]
    fn test_take_value() {
        let mut concat = BezierConcatenator::new();
        concat.append(line_3d((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)));
        concat.perform().unwrap();
        let spline = concat.take_value();
        assert_eq!(spline.nb_poles(), 2);
        assert!(!concat.is_done());
        assert!(concat.value().is_empty());
    }
}
