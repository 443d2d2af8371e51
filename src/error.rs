//! # Error Types
//!
//! Custom error types for Touch Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Touch Bridge
#[derive(Debug, Error)]
pub enum TouchBridgeError {
    /// Surface geometry unresolved or degenerate
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Host dispatch rejected an input event
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Relay connect or forward failure
    #[error("relay error: {0}")]
    Relay(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Touch Bridge
pub type Result<T> = std::result::Result<T, TouchBridgeError>;
