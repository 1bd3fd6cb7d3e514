//! Estate inventory backend
//!
//! A real-estate inventory management service: CRUD over floors,
//! apartments, buyers, pictures, and users on top of a managed document
//! store (DynamoDB) and object storage (S3), exposed as a REST API with
//! JWT authentication and role-based authorization.
//!
//! Layering, outside in:
//! - `web`: axum handlers, response envelope, auth extractors
//! - `services`: business rules (timestamps, blob orchestration,
//!   uniqueness, picture ordering, in-memory filters)
//! - `database`: generic document repository over the store seam
//! - `storage`: object-storage seam for binary assets
//! - `auth`: JWT issue/validate and password hashing
//! - `seed`: startup bootstrap (collections, admin account, sample data)

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod seed;
pub mod services;
pub mod storage;
pub mod web;
