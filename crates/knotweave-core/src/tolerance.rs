/// Linear and angular tolerances used by every geometric comparison.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
    /// Angular tolerance (in radians)
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_ANGULAR: f64 = 1e-10;

    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    pub fn default_precision() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            angular: Self::DEFAULT_ANGULAR,
        }
    }

    pub fn loose() -> Self {
        Self {
            linear: 1e-4,
            angular: 1e-6,
        }
    }

    pub fn tight() -> Self {
        Self {
            linear: 1e-10,
            angular: 1e-12,
        }
    }

    /// Check if a length is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() <= self.linear
    }

    /// Check if two positive ratios agree, scaling the linear tolerance by
    /// their magnitude.
    pub fn ratio_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.linear * a.abs().max(b.abs()).max(1.0)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_ordered() {
        assert!(Tolerance::tight().linear < Tolerance::default().linear);
        assert!(Tolerance::default().linear < Tolerance::loose().linear);
    }

    #[test]
    fn test_ratio_eq_scales_with_magnitude() {
        let tol = Tolerance::default();
        assert!(tol.ratio_eq(1.0e6, 1.0e6 + 0.01));
        assert!(!tol.ratio_eq(1.0, 1.001));
    }

    #[test]
    fn test_is_zero_includes_the_bound() {
        let tol = Tolerance::new(1e-3, 1e-6);
        assert!(tol.is_zero(-1e-3));
        assert!(!tol.is_zero(2e-3));
    }

    #[test]
    fn test_serde_round_trip() {
        let tol = Tolerance::loose();
        let json = serde_json::to_string(&tol).unwrap();
        let back: Tolerance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tol);
    }
}
