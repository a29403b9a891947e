//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The rate source could not produce a rate table.
    #[error("Rate source unavailable: {0}")]
    RateSourceUnavailable(String),

    /// The requested currency pair is absent from the rate table.
    #[error("Missing rate: {0}")]
    MissingRate(String),

    /// A rate value is malformed.
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error (sysexits.h values).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput(_) => 64,
            Self::MissingRate(_) | Self::InvalidRate(_) => 65,
            Self::RateSourceUnavailable(_) => 69,
            Self::Internal(_) => 70,
            Self::Config(_) => 78,
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::RateSourceUnavailable(_) => "RATE_SOURCE_UNAVAILABLE",
            Self::MissingRate(_) => "MISSING_CURRENCY_RATE",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
