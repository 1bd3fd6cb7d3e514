//! Request extractors
//!
//! Authentication is extractor-based: handlers that need a caller take
//! [`AuthUser`] (rejects with 401 when the bearer token is missing or
//! invalid) or [`AdminUser`] (additionally rejects with 403 when the
//! role is not ADMIN). Public handlers simply omit them.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};

use crate::errors::AppError;
use crate::models::UserRole;
use crate::web::AppState;
use crate::web::responses::handle_error;

/// The authenticated caller, as decoded from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Err(handle_error(AppError::unauthorized(
                "missing bearer token",
            )));
        };

        let claims = state.jwt.validate(token).map_err(handle_error)?;
        Ok(Self {
            email: claims.sub,
            role: claims.role,
        })
    }
}

/// An authenticated caller holding the ADMIN role
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(handle_error(AppError::forbidden(
                "administrator role required",
            )));
        }
        Ok(Self(user))
    }
}
