//! Error types for Umbra

use thiserror::Error;

/// Result type alias using Umbra's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the host-facing layers.
///
/// The per-pixel kernel never fails; these only come from settings
/// validation, image size checks and configuration files.
#[derive(Error, Debug)]
pub enum Error {
    /// A setting is outside its documented range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Background image does not match the output resolution
    #[error("Background is {actual:?} but output is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Configuration file extension is not recognised
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding/decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
