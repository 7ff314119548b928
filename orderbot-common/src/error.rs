//! Error types for the orderbot services.

use thiserror::Error;

/// Result type alias using the orderbot error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for orderbot services.
///
/// Every variant carries the human-readable detail string that ends up
/// in the gateway's error body.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing credential, bad bind address, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// External service error (completion API, gateway transport)
    #[error("External service error: {0}")]
    External(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 422,
            Self::Config(_) | Self::External(_) => 500,
        }
    }

    /// Consume the error, returning the bare detail string for an HTTP
    /// error body (no variant prefix).
    pub fn into_detail(self) -> String {
        match self {
            Self::Config(detail) | Self::InvalidInput(detail) | Self::External(detail) => detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(Error::InvalidInput("test".into()).status_code(), 422);
        assert_eq!(Error::Config("test".into()).status_code(), 500);
        assert_eq!(Error::External("test".into()).status_code(), 500);
    }

    #[test]
    fn test_into_detail_strips_variant_prefix() {
        let err = Error::Config("OPENAI_API_KEY not set in container environment".into());
        assert_eq!(
            err.into_detail(),
            "OPENAI_API_KEY not set in container environment"
        );
    }

    #[test]
    fn test_display_keeps_variant_prefix() {
        let err = Error::InvalidInput("too long".into());
        assert_eq!(err.to_string(), "Invalid input: too long");
    }
}
