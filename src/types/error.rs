use thiserror::Error;

/// spendlog error types
#[derive(Error, Debug)]
pub enum SpendlogError {
    /// Rejected at the entry or category creation boundary
    #[error("validation error: {0}")]
    Validation(String),

    /// No entry with the requested id
    #[error("entry {0} not found")]
    NotFound(u64),

    /// Failed to parse a user-supplied value (date, month, granularity)
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Store operation failed
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for spendlog
pub type Result<T> = std::result::Result<T, SpendlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpendlogError::Validation("amount is required".into());
        assert_eq!(err.to_string(), "validation error: amount is required");
    }

    #[test]
    fn test_not_found_display() {
        let err = SpendlogError::NotFound(42);
        assert_eq!(err.to_string(), "entry 42 not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SpendlogError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
