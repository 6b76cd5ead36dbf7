use crate::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Per-axis affine remap: `p' = offset + p * scale` (component-wise).
///
/// Not a rigid transform. Used to map normalized pole coordinates back into
/// model or parametric space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRemap3 {
    pub offset: Vector3,
    pub scale: Vector3,
}

impl AxisRemap3 {
    pub fn identity() -> Self {
        Self::new(Vector3::ZERO, Vector3::ONE)
    }

    pub fn new(offset: Vector3, scale: Vector3) -> Self {
        Self { offset, scale }
    }

    /// Build from interleaved `(x, dx, y, dy, z, dz)` components.
    pub fn from_components(x: f64, dx: f64, y: f64, dy: f64, z: f64, dz: f64) -> Self {
        Self::new(Vector3::new(x, y, z), Vector3::new(dx, dy, dz))
    }

    pub fn apply(&self, p: Point3) -> Point3 {
        self.offset + p * self.scale
    }
}

impl Default for AxisRemap3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Planar counterpart of [`AxisRemap3`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRemap2 {
    pub offset: Vector2,
    pub scale: Vector2,
}

impl AxisRemap2 {
    pub fn identity() -> Self {
        Self::new(Vector2::ZERO, Vector2::ONE)
    }

    pub fn new(offset: Vector2, scale: Vector2) -> Self {
        Self { offset, scale }
    }

    pub fn from_components(x: f64, dx: f64, y: f64, dy: f64) -> Self {
        Self::new(Vector2::new(x, y), Vector2::new(dx, dy))
    }

    pub fn apply(&self, p: Point2) -> Point2 {
        self.offset + p * self.scale
    }
}

impl Default for AxisRemap2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// A remap aimed at either a 3D or a 2D track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Remap {
    Space(AxisRemap3),
    Plane(AxisRemap2),
}

impl Remap {
    /// Dimension of the track this remap applies to.
    pub fn dimension(&self) -> usize {
        match self {
            Remap::Space(_) => 3,
            Remap::Plane(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{dvec2, dvec3};
    use proptest::prelude::*;

    #[test]
    fn test_identity() {
        let r = AxisRemap3::from_components(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
        let p = dvec3(1.0, 2.0, 3.0);
        assert_eq!(r.apply(p), p);
        assert_eq!(r, AxisRemap3::identity());
    }

    #[test]
    fn test_offset_and_scale() {
        let r = AxisRemap3::from_components(10.0, 2.0, 20.0, 0.5, 30.0, -1.0);
        let result = r.apply(dvec3(1.0, 2.0, 3.0));
        assert!((result - dvec3(12.0, 21.0, 27.0)).length() < 1e-10);
    }

    #[test]
    fn test_planar() {
        let r = AxisRemap2::from_components(1.0, 3.0, -1.0, 2.0);
        assert_eq!(r.apply(dvec2(1.0, 1.0)), dvec2(4.0, 1.0));
        assert_eq!(Remap::Plane(r).dimension(), 2);
    }

    proptest! {
        #[test]
        fn prop_identity_components_leave_point_unchanged(
            x in -1e3..1e3f64, y in -1e3..1e3f64, z in -1e3..1e3f64
        ) {
            let r = AxisRemap3::from_components(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
            prop_assert_eq!(r.apply(dvec3(x, y, z)), dvec3(x, y, z));
        }
    }
}
