//! Error types for the article provider.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the lifecycle treats "the
//! article does not exist" differently from other failures. Every other
//! non-success status lands in `UnexpectedStatus` with the raw status and
//! body. Validation and configuration errors are raised before any request
//! is sent.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Declared input has the wrong shape.
    #[error("invalid configuration value: {0}")]
    Validation(String),

    /// Provider configuration is missing or unusable.
    #[error("provider configuration error: {0}")]
    Config(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status outside the success set for the verb.
    #[error("unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
