//! Schedule error types.

use mfo_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised before or during schedule generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// Duration must be at least one month.
    #[error("Duration must be a positive number of months, got {0}")]
    InvalidDuration(i32),

    /// Term exceeds the supported maximum.
    #[error("Duration of {duration} months exceeds the maximum of {max}")]
    DurationTooLong {
        /// Requested term.
        duration: i32,
        /// Longest accepted term.
        max: i32,
    },

    /// Principal cannot be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Interest rate cannot be negative.
    #[error("Interest rate cannot be negative: {0}")]
    NegativeRate(Decimal),

    /// A due date fell outside the supported calendar.
    #[error("Scheduled date out of range for installment {0}")]
    DateOutOfRange(u32),
}

impl ScheduleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDuration(_) => "INVALID_DURATION",
            Self::DurationTooLong { .. } => "DURATION_TOO_LONG",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::NegativeRate(_) => "NEGATIVE_RATE",
            Self::DateOutOfRange(_) => "DATE_OUT_OF_RANGE",
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        Self::Validation(err.to_string())
    }
}
