use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::zodiac::Body;

/// Errors that can occur during chart computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("No house solution at latitude {latitude}°: {message}")]
    Domain { latitude: f64, message: String },
    #[error("Invalid {field} ({value}): {message}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        message: String,
    },
    #[error("No ephemeris sample for {body} at {at}")]
    MissingSample { body: Body, at: DateTime<Utc> },
}

impl ChartError {
    pub(crate) fn invalid(field: &'static str, value: f64, message: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            field,
            value,
            message: message.into(),
        }
    }

    pub(crate) fn domain(latitude: f64, message: impl Into<String>) -> Self {
        ChartError::Domain {
            latitude,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

/// Reject NaN and infinities before they leak into the geometry.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::invalid(field, value, "must be a finite number"))
    }
}
