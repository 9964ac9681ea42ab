//! Error type definitions for the logo resolver
//!
//! Network failures inside the logo source chain never reach this layer:
//! they are logged and the chain advances. What remains here are the errors
//! a caller can act on.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Logo cache store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Roster ingestion errors
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// External service errors
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Persistent logo cache store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem failures while reading or writing the store
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Store document could not be encoded
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Background write task failed to complete
    #[error("Write task aborted: {message}")]
    WriteAborted { message: String },
}

/// Roster CSV ingestion errors
#[derive(Error, Debug)]
pub enum RosterError {
    /// Roster file could not be opened
    #[error("Cannot read roster {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding failures
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an external service error
    pub fn external_service<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl StoreError {
    pub fn io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
