use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KwError {
    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Dimension mismatch: expected a {expected}D track, found a {found}D track")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Empty batch: at least one Bezier segment is required")]
    EmptyBatch,

    #[error(
        "Inconsistent dimension in segment {segment}: expected {expected:?} (3D, 2D) tracks, found {found:?}"
    )]
    InconsistentDimension {
        segment: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Cannot elevate a degree {degree} curve to degree {target}")]
    InvalidDegree { degree: usize, target: usize },

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl KwError {
    /// Shorthand for the bounds check every indexed accessor performs.
    pub fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(KwError::IndexOutOfRange { index, len })
        }
    }
}

pub type Result<T> = std::result::Result<T, KwError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(KwError::check_index(0, 1).is_ok());
        assert_eq!(
            KwError::check_index(3, 3),
            Err(KwError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_display() {
        let err = KwError::InconsistentDimension {
            segment: 2,
            expected: (1, 0),
            found: (0, 1),
        };
        assert_eq!(
            err.to_string(),
            "Inconsistent dimension in segment 2: expected (1, 0) (3D, 2D) tracks, found (0, 1)"
        );
    }
}
