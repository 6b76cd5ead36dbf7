pub mod point;
pub mod remap;

pub use glam::{dvec2, dvec3, DVec2, DVec3};
pub use point::ControlPoint;
pub use remap::{AxisRemap2, AxisRemap3, Remap};

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector2 = DVec2;
pub type Vector3 = DVec3;
