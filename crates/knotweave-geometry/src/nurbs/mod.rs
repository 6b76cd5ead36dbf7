//! B-spline core algorithms: knot vector utilities and De Boor evaluation.

pub mod deboor;
pub mod knot;

pub use deboor::*;
pub use knot::{basis_functions, compress_knots, find_span, flatten_knots, validate_knot_vector};
