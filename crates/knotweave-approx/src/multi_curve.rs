//! One multi-track Bezier segment.

use knotweave_core::{KwError, Result};
use knotweave_geometry::bezier;
use knotweave_math::{AxisRemap2, AxisRemap3, ControlPoint, Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::multi_point::MultiPoint;

/// A Bezier segment whose poles are [`MultiPoint`]s. Every track is a Bezier
/// of degree `nb_poles() - 1` over the shared parameter range `[0, 1]`.
///
/// Deserialization goes through [`MultiCurve::new`], so a decoded segment
/// holds the same invariants as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MultiCurveData")]
pub struct MultiCurve {
    poles: Vec<MultiPoint>,
}

#[derive(Deserialize)]
struct MultiCurveData {
    poles: Vec<MultiPoint>,
}

impl TryFrom<MultiCurveData> for MultiCurve {
    type Error = KwError;

    fn try_from(data: MultiCurveData) -> Result<Self> {
        Self::new(data.poles)
    }
}

impl MultiCurve {
    /// Build from poles, all of the same `(nb3d, nb2d)` shape.
    pub fn new(poles: Vec<MultiPoint>) -> Result<Self> {
        let shape = match poles.first() {
            Some(first) => first.shape(),
            None => return Err(KwError::Geometry("Bezier segment has no poles".into())),
        };
        if let Some(i) = poles.iter().position(|p| p.shape() != shape) {
            return Err(KwError::Geometry(format!(
                "pole {} has shape {:?}, expected {:?}",
                i,
                poles[i].shape(),
                shape
            )));
        }
        Ok(Self { poles })
    }

    /// Build from per-track pole lists. Every track must have the same
    /// number of poles.
    pub fn from_tracks(tracks: Vec<Vec<Point3>>, tracks_2d: Vec<Vec<Point2>>) -> Result<Self> {
        let nb_poles = tracks
            .first()
            .map(Vec::len)
            .or_else(|| tracks_2d.first().map(Vec::len))
            .ok_or_else(|| KwError::Geometry("Bezier segment has no tracks".into()))?;
        let lengths = tracks.iter().map(Vec::len).chain(tracks_2d.iter().map(Vec::len));
        for len in lengths {
            if len != nb_poles {
                return Err(KwError::Geometry(format!(
                    "track has {} poles, expected {}",
                    len, nb_poles
                )));
            }
        }

        let poles = (0..nb_poles)
            .map(|i| {
                MultiPoint::from_points(
                    tracks.iter().map(|t| t[i]).collect(),
                    tracks_2d.iter().map(|t| t[i]).collect(),
                )
            })
            .collect();
        Self::new(poles)
    }

    pub fn degree(&self) -> usize {
        self.poles.len() - 1
    }

    pub fn nb_poles(&self) -> usize {
        self.poles.len()
    }

    /// `(nb3d, nb2d)` shared by every pole.
    pub fn shape(&self) -> (usize, usize) {
        self.poles[0].shape()
    }

    pub fn poles(&self) -> &[MultiPoint] {
        &self.poles
    }

    pub fn pole(&self, index: usize) -> Result<&MultiPoint> {
        KwError::check_index(index, self.poles.len())?;
        Ok(&self.poles[index])
    }

    pub fn first_pole(&self) -> &MultiPoint {
        &self.poles[0]
    }

    pub fn last_pole(&self) -> &MultiPoint {
        &self.poles[self.poles.len() - 1]
    }

    /// Poles of 3D track `track`.
    pub fn track(&self, track: usize) -> Result<Vec<Point3>> {
        self.poles.iter().map(|p| p.point(track)).collect()
    }

    /// Poles of 2D track `track`.
    pub fn track_2d(&self, track: usize) -> Result<Vec<Point2>> {
        self.poles.iter().map(|p| p.point_2d(track)).collect()
    }

    /// Every track evaluated at `t` in `[0, 1]`.
    pub fn value(&self, t: f64) -> MultiPoint {
        let (nb3d, nb2d) = self.shape();
        MultiPoint::from_points(
            (0..nb3d).map(|k| self.eval_track(|p| p.points()[k], t)).collect(),
            (0..nb2d).map(|k| self.eval_track(|p| p.points_2d()[k], t)).collect(),
        )
    }

    /// Every track's first derivative at `t`.
    pub fn derivative(&self, t: f64) -> MultiPoint {
        let (nb3d, nb2d) = self.shape();
        MultiPoint::from_points(
            (0..nb3d).map(|k| self.eval_hodograph(|p| p.points()[k], t)).collect(),
            (0..nb2d).map(|k| self.eval_hodograph(|p| p.points_2d()[k], t)).collect(),
        )
    }

    /// The same segment with every track elevated to degree `target`.
    pub fn elevated(&self, target: usize) -> Result<Self> {
        if target == self.degree() {
            return Ok(self.clone());
        }
        let (nb3d, nb2d) = self.shape();
        let tracks = (0..nb3d)
            .map(|k| bezier::elevate_poles(&self.collect_track(|p| p.points()[k]), target))
            .collect::<Result<Vec<_>>>()?;
        let tracks_2d = (0..nb2d)
            .map(|k| bezier::elevate_poles(&self.collect_track(|p| p.points_2d()[k]), target))
            .collect::<Result<Vec<_>>>()?;
        Self::from_tracks(tracks, tracks_2d)
    }

    /// Remap 3D track `track` on every pole.
    pub fn transform(&mut self, track: usize, remap: &AxisRemap3) -> Result<()> {
        self.poles.iter_mut().try_for_each(|p| p.transform(track, remap))
    }

    /// Remap 2D track `track` on every pole.
    pub fn transform_2d(&mut self, track: usize, remap: &AxisRemap2) -> Result<()> {
        self.poles.iter_mut().try_for_each(|p| p.transform_2d(track, remap))
    }

    fn collect_track<P: ControlPoint>(&self, get: impl Fn(&MultiPoint) -> P) -> Vec<P> {
        self.poles.iter().map(get).collect()
    }

    fn eval_track<P: ControlPoint>(&self, get: impl Fn(&MultiPoint) -> P, t: f64) -> P {
        bezier::de_casteljau(&self.collect_track(get), t)
    }

    fn eval_hodograph<P: ControlPoint>(&self, get: impl Fn(&MultiPoint) -> P, t: f64) -> P {
        bezier::de_casteljau(&bezier::derivative_poles(&self.collect_track(get)), t)
    }
}
