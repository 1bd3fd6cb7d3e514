//! Error type definitions for the estate inventory service
//!
//! A single application-level error enum covers every layer; handlers map
//! variants onto HTTP status codes in `web::responses`.

use thiserror::Error;

/// Top-level application error type
///
/// Uses `thiserror` for automatic error trait implementations and proper
/// error chaining. Store and storage failures are wrapped rather than
/// retried; every operation either succeeds or fails as a whole.
#[derive(Error, Debug)]
pub enum AppError {
    /// Document store failures (DynamoDB calls, attribute conversion)
    #[error("Database error: {message}")]
    Database { message: String },

    /// Object storage failures (S3 calls)
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Input validation and business rule violations
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A uniqueness check failed (e.g. one user per email)
    #[error("Duplicate {resource}: {value}")]
    Duplicate { resource: String, value: String },

    /// Resource not found
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Missing or invalid credentials / bearer token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated but lacking the required role
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Convenience constructors for common error types
impl AppError {
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn duplicate<R: Into<String>, V: Into<String>>(resource: R, value: V) -> Self {
        Self::Duplicate {
            resource: resource.into(),
            value: value.into(),
        }
    }

    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal {
            message: format!("serialization failed: {err}"),
        }
    }
}
