//! One knot column of a multi-track curve.

use knotweave_core::{KwError, Result};
use knotweave_math::{AxisRemap2, AxisRemap3, Point2, Point3, Remap};
use serde::{Deserialize, Serialize};

/// `nb3d` space points and `nb2d` plane points sharing one curve parameter.
///
/// The shape is fixed at construction; only point values change afterwards.
/// 3D and 2D points live in separate zero-based arrays with their own
/// accessors. Generic callers that iterate over every track use a combined
/// *track index*: `0..nb3d` are the 3D tracks, `nb3d..nb3d + nb2d` the 2D ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiPoint {
    points: Vec<Point3>,
    points_2d: Vec<Point2>,
}

impl MultiPoint {
    /// A column with every point at the origin.
    pub fn new(nb3d: usize, nb2d: usize) -> Self {
        Self {
            points: vec![Point3::ZERO; nb3d],
            points_2d: vec![Point2::ZERO; nb2d],
        }
    }

    pub fn from_points(points: Vec<Point3>, points_2d: Vec<Point2>) -> Self {
        Self { points, points_2d }
    }

    pub fn nb_points(&self) -> usize {
        self.points.len()
    }

    pub fn nb_points_2d(&self) -> usize {
        self.points_2d.len()
    }

    pub fn nb_tracks(&self) -> usize {
        self.points.len() + self.points_2d.len()
    }

    /// `(nb3d, nb2d)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.points.len(), self.points_2d.len())
    }

    pub fn point(&self, index: usize) -> Result<Point3> {
        KwError::check_index(index, self.points.len())?;
        Ok(self.points[index])
    }

    pub fn set_point(&mut self, index: usize, point: Point3) -> Result<()> {
        KwError::check_index(index, self.points.len())?;
        self.points[index] = point;
        Ok(())
    }

    pub fn point_2d(&self, index: usize) -> Result<Point2> {
        KwError::check_index(index, self.points_2d.len())?;
        Ok(self.points_2d[index])
    }

    pub fn set_point_2d(&mut self, index: usize, point: Point2) -> Result<()> {
        KwError::check_index(index, self.points_2d.len())?;
        self.points_2d[index] = point;
        Ok(())
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn points_2d(&self) -> &[Point2] {
        &self.points_2d
    }

    /// Dimension (3 or 2) of the point on combined track `track`.
    pub fn dimension(&self, track: usize) -> Result<usize> {
        KwError::check_index(track, self.nb_tracks())?;
        Ok(if track < self.points.len() { 3 } else { 2 })
    }

    /// Remap 3D point `index` to `offset + p * scale`.
    pub fn transform(&mut self, index: usize, remap: &AxisRemap3) -> Result<()> {
        let p = self.point(index)?;
        self.points[index] = remap.apply(p);
        Ok(())
    }

    /// Remap 2D point `index` to `offset + p * scale`.
    pub fn transform_2d(&mut self, index: usize, remap: &AxisRemap2) -> Result<()> {
        let p = self.point_2d(index)?;
        self.points_2d[index] = remap.apply(p);
        Ok(())
    }

    /// Apply `remap` to combined track `track`. The remap kind must match the
    /// track's dimension.
    pub fn transform_track(&mut self, track: usize, remap: &Remap) -> Result<()> {
        let found = self.dimension(track)?;
        match remap {
            Remap::Space(r) if found == 3 => self.transform(track, r),
            Remap::Plane(r) if found == 2 => self.transform_2d(track - self.points.len(), r),
            _ => Err(KwError::DimensionMismatch {
                expected: remap.dimension(),
                found,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knotweave_math::{dvec2, dvec3};

    #[test]
    fn test_new_is_zeroed() {
        let mp = MultiPoint::new(2, 1);
        assert_eq!(mp.shape(), (2, 1));
        assert_eq!(mp.point(1).unwrap(), Point3::ZERO);
        assert_eq!(mp.point_2d(0).unwrap(), Point2::ZERO);
    }

    #[test]
    fn test_out_of_range() {
        let mut mp = MultiPoint::new(1, 1);
        assert_eq!(
            mp.point(1),
            Err(KwError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(mp.set_point_2d(1, dvec2(1.0, 1.0)).is_err());
        assert!(MultiPoint::new(0, 2).set_point(0, Point3::ONE).is_err());
    }

    #[test]
    fn test_dimension_uses_combined_tracks() {
        let mp = MultiPoint::new(1, 2);
        assert_eq!(mp.dimension(0).unwrap(), 3);
        assert_eq!(mp.dimension(1).unwrap(), 2);
        assert_eq!(mp.dimension(2).unwrap(), 2);
        assert!(mp.dimension(3).is_err());
    }

    #[test]
    fn test_transform_track_kind_mismatch() {
        let mut mp = MultiPoint::from_points(vec![dvec3(1.0, 1.0, 1.0)], vec![dvec2(1.0, 1.0)]);
        let err = mp
            .transform_track(1, &Remap::Space(AxisRemap3::identity()))
            .unwrap_err();
        assert_eq!(err, KwError::DimensionMismatch { expected: 3, found: 2 });

        mp.transform_track(1, &Remap::Plane(AxisRemap2::from_components(1.0, 2.0, 0.0, 1.0)))
            .unwrap();
        assert_eq!(mp.point_2d(0).unwrap(), dvec2(3.0, 1.0));
    }
}
