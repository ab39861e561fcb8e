//! Error types for the simulation core
//!
//! Every error here is recoverable: the frame loop skips the offending
//! frame (or falls back to default settings) and keeps running.

/// Errors raised by the simulation core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A numeric argument was out of range (non-positive dt, radius, bounds, ...)
    #[error("invalid argument `{name}`: {value}")]
    InvalidArgument { name: &'static str, value: f32 },

    /// Settings file could not be read or parsed
    #[error("settings error: {0}")]
    Settings(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: f32) -> Self {
        SimError::InvalidArgument { name, value }
    }
}

/// Require `value` to be finite and strictly positive
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32, SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value))
    }
}

/// Require `value` to be a fraction in `[0, 1]`
pub(crate) fn ensure_unit(name: &'static str, value: f32) -> Result<f32, SimError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimError::invalid(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("dt", 0.5), Ok(0.5));
        assert!(ensure_positive("dt", 0.0).is_err());
        assert!(ensure_positive("dt", -1.0).is_err());
        assert!(ensure_positive("dt", f32::NAN).is_err());
        assert!(ensure_positive("dt", f32::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_unit() {
        assert!(ensure_unit("damping", 0.0).is_ok());
        assert!(ensure_unit("damping", 1.0).is_ok());
        assert!(ensure_unit("damping", 1.01).is_err());
        assert!(ensure_unit("damping", f32::NAN).is_err());
    }

    #[test]
    fn test_error_message_names_argument() {
        let err = SimError::invalid("radius", -2.0);
        assert_eq!(err.to_string(), "invalid argument `radius`: -2");
    }
}
