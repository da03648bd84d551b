//! Error types for the crop disease library.

use thiserror::Error;

/// Main error type for detection, model loading and catalog handling.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes could not be decoded as an image
    #[error("cannot identify image file: {0}")]
    Decode(String),

    /// Input string is not valid base64
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Model error
    #[error("Model error: {0}")]
    Model(String),

    /// Catalog (configuration store) error
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

/// Specialized Result type for crop disease operations.
pub type Result<T> = std::result::Result<T, Error>;
