//! Token issuing/validation and password hashing
//!
//! Bearer tokens are HS256 JWTs carrying the account email (`sub`) and
//! role; validation pins the issuer and rejects expired tokens with a
//! distinct message. Passwords are hashed with Argon2id through the
//! `password-hash` API and never stored or logged in plaintext.

use std::time::Duration;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::errors::{AppError, AppResult};
use crate::models::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    pub role: UserRole,
    pub iss: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtService {
    secret: String,
    issuer: String,
    token_ttl: Duration,
}

impl JwtService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            issuer: config.issuer.clone(),
            token_ttl: Duration::from_secs(config.token_ttl_secs),
        }
    }

    /// Sign a bearer token for the given account
    pub fn issue(&self, email: &str, role: UserRole) -> AppResult<String> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: email.to_string(),
            role,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.token_ttl.as_secs() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("failed to sign token: {e}")))
    }

    /// Verify signature, expiry, and issuer; returns the decoded claims
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);

        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(AppError::unauthorized("token expired"))
                }
                _ => Err(AppError::unauthorized(format!("invalid token: {e}"))),
            },
        }
    }
}

/// Argon2id hash of a plaintext password
pub fn hash_password(plain: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
}

/// Check a plaintext password against a stored Argon2id hash
pub fn verify_password(plain: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("malformed password hash: {e}")))?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!(
            "password verification failed: {e}"
        ))),
    }
}
