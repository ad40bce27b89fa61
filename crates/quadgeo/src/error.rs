//! Error type shared by builders, index conversion and figure composition.
//!
//! Degenerate geometry (parallel diagonals, zero-length sides) is not an error;
//! those cases surface as `Option::None` from the predicates.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeomError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("unknown quadrilateral kind `{0}`")]
    UnknownKind(String),
    #[error("{what} index {index} out of range (expected 0..=3)")]
    IndexOutOfRange { what: &'static str, index: usize },
    #[error("vertices {from} and {to} do not form a diagonal")]
    NotADiagonal { from: usize, to: usize },
    #[error("expected exactly 4 vertices, got {0}")]
    VertexCount(usize),
    #[error("no valid `{kind}` sample after {attempts} attempts")]
    SamplingFailed { kind: &'static str, attempts: u32 },
}

impl GeomError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeomError>;

/// Reject non-finite or non-positive values.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(GeomError::invalid(name, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(GeomError::invalid(name, format!("must be > 0, got {value}")));
    }
    Ok(value)
}

/// Reject non-finite values.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeomError::invalid(name, format!("must be finite, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_parameter() {
        let e = require_positive("side", -2.0).unwrap_err();
        assert_eq!(e.to_string(), "invalid parameter `side`: must be > 0, got -2");
        let e = require_finite("rotation", f64::NAN).unwrap_err();
        assert!(e.to_string().contains("rotation"));
        assert!(require_positive("side", 0.5).is_ok());
    }
}
