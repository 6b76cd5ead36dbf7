//! How two consecutive Bezier segments meet, and the knot multiplicity that
//! encodes it.

use serde::{Deserialize, Serialize};

/// Order of continuity at an interior junction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Continuity {
    /// End points do not coincide. Both junction poles are kept.
    Disjoint,
    /// Positional continuity. The junction pole is shared.
    C0,
    /// Positional and tangent continuity. The junction pole is implied by its
    /// neighbours and dropped.
    C1,
}

impl Continuity {
    /// Knot multiplicity at a junction of this kind for a spline of `degree`.
    ///
    /// `C1` is only representable from degree 2 on; below that it yields 0.
    pub fn multiplicity(self, degree: usize) -> usize {
        match self {
            Continuity::Disjoint => degree + 1,
            Continuity::C0 => degree,
            Continuity::C1 => degree.saturating_sub(1),
        }
    }

    /// Inverse of [`multiplicity`](Self::multiplicity).
    pub fn from_multiplicity(mult: usize, degree: usize) -> Option<Self> {
        match degree.checked_sub(mult) {
            None if mult == degree + 1 => Some(Continuity::Disjoint),
            Some(0) => Some(Continuity::C0),
            Some(1) => Some(Continuity::C1),
            _ => None,
        }
    }

    /// Number of poles the junction removes from the concatenated pole list.
    pub fn removed_poles(self) -> usize {
        match self {
            Continuity::Disjoint => 0,
            Continuity::C0 => 1,
            Continuity::C1 => 2,
        }
    }
}

/// A classified junction between segment `k` and segment `k + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub continuity: Continuity,
    /// Parametric length of segment `k + 1` relative to segment `k`. Only
    /// meaningful for `C1` junctions; `1.0` otherwise.
    pub ratio: f64,
}

impl Junction {
    pub fn disjoint() -> Self {
        Self {
            continuity: Continuity::Disjoint,
            ratio: 1.0,
        }
    }

    pub fn c0() -> Self {
        Self {
            continuity: Continuity::C0,
            ratio: 1.0,
        }
    }

    pub fn c1(ratio: f64) -> Self {
        Self {
            continuity: Continuity::C1,
            ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicity_round_trip() {
        for degree in 2..6 {
            for c in [Continuity::Disjoint, Continuity::C0, Continuity::C1] {
                assert_eq!(Continuity::from_multiplicity(c.multiplicity(degree), degree), Some(c));
            }
        }
    }

    #[test]
    fn test_unknown_multiplicity() {
        assert_eq!(Continuity::from_multiplicity(1, 4), None);
        assert_eq!(Continuity::from_multiplicity(6, 4), None);
    }

    #[test]
    fn test_c1_multiplicity_at_low_degree() {
        assert_eq!(Continuity::C1.multiplicity(0), 0);
        assert_eq!(Continuity::C1.multiplicity(1), 0);
        assert_eq!(Continuity::C0.multiplicity(0), 0);
        assert_eq!(Continuity::Disjoint.multiplicity(0), 1);
    }

    #[test]
    fn test_removed_poles_match_multiplicity() {
        let degree = 3;
        for c in [Continuity::Disjoint, Continuity::C0, Continuity::C1] {
            assert_eq!(c.multiplicity(degree) + c.removed_poles(), degree + 1);
        }
    }
}
