use knotweave_core::Tolerance;
use serde::{Deserialize, Serialize};

/// Settings for [`BezierConcatenator`](crate::BezierConcatenator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcatOptions {
    /// Junction poles closer than `tolerance.linear` are shared; tangents
    /// within `tolerance.angular` of each other are treated as aligned.
    pub tolerance: Tolerance,
    /// Merge tangent-continuous junctions into C1 knots (multiplicity
    /// `degree - 1`). When off, touching segments always join with C0.
    pub detect_tangency: bool,
}

impl ConcatOptions {
    pub fn new(tolerance: Tolerance, detect_tangency: bool) -> Self {
        Self {
            tolerance,
            detect_tangency,
        }
    }
}

impl Default for ConcatOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default_precision(),
            detect_tangency: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let opts: ConcatOptions = serde_json::from_str(r#"{ "detect_tangency": false }"#).unwrap();
        assert!(!opts.detect_tangency);
        assert_eq!(opts.tolerance, Tolerance::default());
    }
}
