//! Centralized error handling for the estate inventory service
//!
//! Services and repositories return [`AppResult`]; the web layer maps
//! [`AppError`] variants onto HTTP status codes in one place
//! (`web::responses::handle_error`).

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
