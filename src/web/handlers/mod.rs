//! HTTP handlers, one module per domain
//!
//! Handlers are thin wrappers around service calls: deserialize the
//! request, apply the auth extractor the route requires, call the
//! service, and map the result through `web::responses`.

pub mod apartments;
pub mod auth;
pub mod buyers;
pub mod floors;
pub mod health;
pub mod media;
pub mod pictures;
pub mod users;
