//! KnotWeave geometry: Bezier segments, B-spline curves, and the knot
//! algorithms behind them.

pub mod bezier;
pub mod curve;
pub mod nurbs;

pub use bezier::BezierCurve;
pub use curve::{BSplineCurve, Curve};
