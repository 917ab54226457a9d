//! Common error types for eqalert

use thiserror::Error;

/// Common result type for eqalert operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while normalizing bulletins or maintaining the report cache
#[derive(Error, Debug)]
pub enum Error {
    /// A required field is absent from the document tree
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Raw bulletin text could not be turned into a document tree
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON encode/decode error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid value supplied by a caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a `MissingField` error from a key path such as `["Report", "Head", "Title"]`
    pub fn missing(path: &[&str]) -> Self {
        Error::MissingField(path.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_joins_path() {
        let err = Error::missing(&["Report", "Head", "Title"]);
        assert_eq!(err.to_string(), "Missing field: Report/Head/Title");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
