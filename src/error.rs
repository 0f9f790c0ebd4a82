//! Global error handling for foldcat
//!
//! Errors here are fatal to a single drop. Per-file read problems are not
//! errors; the walker records them as diagnostics instead.

use std::io;
use thiserror::Error;

/// Global error type for foldcat operations
#[derive(Error, Debug)]
pub enum FoldcatError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writer errors
    #[error("Writer error: {0}")]
    Writer(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A drop was started while another one was still running
    #[error("A drop is already in progress")]
    DropInProgress,
}

/// Specialized Result type for foldcat operations
pub type Result<T> = std::result::Result<T, FoldcatError>;

/// Creates a FoldcatError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FoldcatError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl From<FoldcatError> for io::Error {
    fn from(err: FoldcatError) -> Self {
        match err {
            FoldcatError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_range(value: u64) -> Result<u64> {
        ensure!((1..=10).contains(&value), InvalidArgument, "{} out of range", value);
        Ok(value)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(check_range(3).unwrap(), 3);
        let err = check_range(11).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: 11 out of range");
    }

    #[test]
    fn test_io_error_round_trip_keeps_kind() {
        let err = FoldcatError::Io(io::Error::new(io::ErrorKind::NotFound, "x"));
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }
}
