use thiserror::Error;

/// Errors raised by the Beta-Bernoulli model and its helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BetaError {
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },
    #[error("density requested at {x}, outside of [0, 1]")]
    DomainError { x: f64 },
}

impl BetaError {
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        BetaError::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Check that a shape parameter is a finite, strictly positive real.
pub fn check_shape(name: &'static str, value: f64) -> Result<f64, BetaError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BetaError::invalid(name, format!("must be > 0, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_shape() {
        assert_eq!(check_shape("alpha", 0.5), Ok(0.5));
        for value in vec![0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_shape("alpha", value),
                Err(BetaError::InvalidParameter { name: "alpha", .. })
            ));
        }
    }

    #[test]
    fn test_display() {
        let err = BetaError::invalid("beta", "must be > 0, got -2");
        assert_eq!(format!("{}", err), "invalid parameter beta: must be > 0, got -2");
        let err = BetaError::DomainError { x: 1.5 };
        assert_eq!(format!("{}", err), "density requested at 1.5, outside of [0, 1]");
    }
}
