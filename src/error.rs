//! Error types for the contact form server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a contact to CSV.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The storage directory could not be created
    #[error("Unable to create contacts directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV file could not be opened for appending
    #[error("Unable to open CSV file {path} for writing: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the encoded row failed
    #[error("Unable to write CSV row to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The row could not be encoded as CSV
    #[error("CSV encoding failed: {0}")]
    Encode(String),

    /// The blocking write task failed to complete
    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Errors that can occur when querying the commune lookup service.
#[derive(Error, Debug)]
pub enum LookupError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Service returned an error status code
    #[error("Lookup API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,
}

/// Errors that can occur when submitting the contact form to the server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Server returned an error status code
    #[error("Server error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,
}

impl ClientError {
    /// Message shown to the person filling in the form, whatever went wrong.
    pub fn user_message(&self) -> &'static str {
        "Une erreur est survenue. Veuillez réessayer."
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with LookupError
pub type LookupResult<T> = Result<T, LookupError>;

/// Convenience type alias for Results with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
