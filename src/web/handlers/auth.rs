//! Authentication handlers: credential exchange for a bearer token

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::web::AppState;
use crate::web::responses::{handle_error, ok};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(authenticated) => ok(TokenResponse {
            token: authenticated.token,
            user_id: authenticated.user_id,
        })
        .into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Response {
    match state
        .auth_service
        .register(&request.email, &request.password)
        .await
    {
        Ok(authenticated) => ok(TokenResponse {
            token: authenticated.token,
            user_id: authenticated.user_id,
        })
        .into_response(),
        Err(e) => handle_error(e),
    }
}
