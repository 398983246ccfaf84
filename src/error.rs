//! Error types for ReplCalc
//!
//! This module defines the error types used by the registry, plugin discovery,
//! configuration and arithmetic layers. Uses `thiserror` for ergonomic error
//! handling with automatic `Display` and `Error` trait implementations.
//!
//! None of these errors ever escape the dispatch loop: the loop reports them
//! to the user or the log and keeps running.

use thiserror::Error;

/// The primary error type for ReplCalc operations.
#[derive(Error, Debug)]
pub enum CalcError {
    /// Configuration-related errors (invalid values, unreadable config file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Plugin load errors (malformed manifest, missing expected symbol, etc.)
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// Resource not found (commands, builtin symbols, etc.)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Division with a zero divisor
    #[error("Division by zero is not allowed")]
    DivisionByZero,

    /// Operand text that does not parse as a finite number
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// Operation name that no arithmetic operation answers to
    #[error("Unsupported operation '{0}'")]
    UnsupportedOperation(String),

    /// A calculation was requested without any operands
    #[error("At least one operand is required")]
    MissingOperands,

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for ReplCalc operations.
pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CalcError::Config("unknown log format".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown log format");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let calc_err: CalcError = io_err.into();
        assert!(matches!(calc_err, CalcError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ broken").unwrap_err();
        let calc_err: CalcError = json_err.into();
        assert!(matches!(calc_err, CalcError::Json(_)));
    }

    #[test]
    fn test_domain_error_display() {
        assert_eq!(
            CalcError::DivisionByZero.to_string(),
            "Division by zero is not allowed"
        );
        assert_eq!(
            CalcError::InvalidNumber("abc".into()).to_string(),
            "Invalid number: 'abc'"
        );
        assert_eq!(
            CalcError::UnsupportedOperation("modulo".into()).to_string(),
            "Unsupported operation 'modulo'"
        );
    }
}
