//! Authentication service
//!
//! Login verifies credentials against the stored Argon2id hash and issues
//! a bearer token carrying the account email and role. Registration
//! creates a USER-role account (subject to the one-user-per-email check)
//! and logs it straight in.

use tracing::info;

use crate::auth::JwtService;
use crate::errors::{AppError, AppResult};
use crate::models::{UserCreateRequest, UserRole};
use crate::services::UserService;

/// Outcome of a successful credential exchange
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user_id: String,
    pub role: UserRole,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(users: UserService, jwt: JwtService) -> Self {
        Self { users, jwt }
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let Some(user) = self.users.find_by_email(email).await? else {
            // Same message as a bad password so the response does not leak
            // which emails exist
            return Err(AppError::unauthorized("invalid credentials"));
        };

        if !crate::auth::verify_password(password, &user.password)? {
            return Err(AppError::unauthorized("invalid credentials"));
        }
        if !user.enabled {
            return Err(AppError::unauthorized("account disabled"));
        }

        let token = self.jwt.issue(&user.email, user.role)?;
        info!("user {} logged in", user.email);
        Ok(AuthenticatedUser {
            token,
            user_id: user.id,
            role: user.role,
        })
    }

    /// Create a USER-role account and return its first token
    pub async fn register(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let user = self
            .users
            .create(UserCreateRequest {
                email: email.to_string(),
                password: password.to_string(),
                role: Some(UserRole::User),
                enabled: Some(true),
            })
            .await?;

        let token = self.jwt.issue(&user.email, user.role)?;
        Ok(AuthenticatedUser {
            token,
            user_id: user.id,
            role: user.role,
        })
    }
}
