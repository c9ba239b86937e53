//! Error types for tile simplification

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Coverage error: {0}")]
    Coverage(String),

    #[error("Tile map computation was cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("buffer length 10 is not a perfect square".into());
        assert_eq!(
            err.to_string(),
            "Invalid input: buffer length 10 is not a perfect square"
        );
        assert_eq!(Error::Cancelled.to_string(), "Tile map computation was cancelled");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.raw");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
