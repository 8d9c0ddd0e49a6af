use thiserror::Error;

/// Rejected tuning values. Raised when configuration is built, never from inside a tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be finite")]
    NotFinite { field: &'static str },

    #[error("{low} ({low_value}) must not exceed {high} ({high_value})")]
    InvertedRange {
        low: &'static str,
        low_value: f64,
        high: &'static str,
        high_value: f64,
    },
}

impl ConfigError {
    pub fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::NotFinite { field });
        }
        if value <= 0.0 {
            return Err(ConfigError::NotPositive { field, value });
        }
        Ok(())
    }

    pub fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(ConfigError::NotFinite { field });
        }
        if value < 0.0 {
            return Err(ConfigError::Negative { field, value });
        }
        Ok(())
    }

    pub fn require_ordered(
        low: &'static str,
        low_value: f64,
        high: &'static str,
        high_value: f64,
    ) -> Result<(), ConfigError> {
        if low_value > high_value {
            return Err(ConfigError::InvertedRange {
                low,
                low_value,
                high,
                high_value,
            });
        }
        Ok(())
    }
}
