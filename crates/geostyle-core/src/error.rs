//! Error types for GeoStyle

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeostyleError {
    // Style construction errors
    #[error("Symbol asset unavailable: {symbol} ({reason})")]
    AssetUnavailable { symbol: String, reason: String },

    #[error("Invalid color '{value}'")]
    InvalidColor { value: String },

    #[error("Invalid style configuration: {reason}")]
    InvalidStyle { reason: String },

    // Feature source errors
    #[error("Invalid {format} data: {reason}")]
    Format { format: String, reason: String },

    #[error("Feature source failed: {reason}")]
    FeatureSource { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, GeostyleError>;
