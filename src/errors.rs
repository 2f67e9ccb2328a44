use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Type incompatible: {0}")]
    TypeIncompatible(String),

    #[error("Precondition unavailable: {0}")]
    PreconditionUnavailable(String),

    #[error("Degenerate arithmetic: {0}")]
    Degenerate(String),

    #[error("Unknown catalog entry: {0}")]
    UnknownEntry(String),
}

/// Rejects values that are negative or not finite.
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )))
    }
}

/// Rejects values that are zero, negative or not finite.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::InvalidParameter(format!(
            "{} must be a finite positive number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("mass", 2.5), Ok(2.5));
        assert!(matches!(
            ensure_positive("mass", 0.0),
            Err(SimulationError::InvalidParameter(_))
        ));
        assert!(ensure_positive("mass", f64::NAN).is_err());
        assert!(ensure_positive("mass", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("drag", 0.0), Ok(0.0));
        assert!(ensure_non_negative("drag", -0.1).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = SimulationError::PreconditionUnavailable("no escape budget".to_string());
        assert_eq!(err.to_string(), "Precondition unavailable: no escape budget");
    }
}
