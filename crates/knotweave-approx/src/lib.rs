//! Multi-track Bezier segments and their concatenation into a single
//! multi-track B-spline.
//!
//! A *track* is one polynomial curve sharing the segment parameter with the
//! others: typically a 3D space curve together with its 2D images in the
//! parameter planes of the surfaces it lies on.

pub mod concat;
pub mod continuity;
mod convert;
pub mod multi_bspline;
pub mod multi_curve;
pub mod multi_point;
pub mod options;

pub use concat::{concatenate, BezierConcatenator};
pub use continuity::{Continuity, Junction};
pub use multi_bspline::MultiBSpCurve;
pub use multi_curve::MultiCurve;
pub use multi_point::MultiPoint;
pub use options::ConcatOptions;
