//! Control-point algebra shared by 2D and 3D pole tracks.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

use knotweave_core::Tolerance;

use crate::{DVec2, DVec3};

/// A point type that can serve as a B-spline or Bezier pole.
///
/// Implemented for [`DVec2`] and [`DVec3`], so every curve algorithm in the
/// workspace is written once for both track kinds.
pub trait ControlPoint:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    /// Number of coordinates.
    const DIM: usize;

    /// The origin, used to seed accumulators.
    const ORIGIN: Self;

    fn dot(self, other: Self) -> f64;

    fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Unsigned angle in `[0, pi]` between two non-zero vectors.
    ///
    /// Splits `other` into components along and across `self` and takes
    /// `atan2`, which stays accurate for nearly parallel vectors.
    fn angle_between(self, other: Self) -> f64 {
        let len_sq = self.dot(self);
        if len_sq == 0.0 || other.dot(other) == 0.0 {
            return 0.0;
        }
        let along = self.dot(other) / len_sq;
        let across = (other - self * along).length();
        across.atan2(along * len_sq.sqrt())
    }

    /// Whether two points coincide within the linear tolerance.
    fn near(self, other: Self, tol: Tolerance) -> bool {
        self.distance(other) <= tol.linear
    }
}

impl ControlPoint for DVec3 {
    const DIM: usize = 3;
    const ORIGIN: Self = DVec3::ZERO;

    fn dot(self, other: Self) -> f64 {
        DVec3::dot(self, other)
    }

    fn length(self) -> f64 {
        DVec3::length(self)
    }
}

impl ControlPoint for DVec2 {
    const DIM: usize = 2;
    const ORIGIN: Self = DVec2::ZERO;

    fn dot(self, other: Self) -> f64 {
        DVec2::dot(self, other)
    }

    fn length(self) -> f64 {
        DVec2::length(self)
    }
}
