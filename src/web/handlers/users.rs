//! User management handlers (admin only)

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{User, UserCreateRequest, UserRole, UserUpdateRequest};
use crate::web::AppState;
use crate::web::extractors::AdminUser;
use crate::web::responses::{created, handle_error, no_content, ok};

/// Response DTO for a user account
///
/// The password hash is intentionally omitted.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            enabled: user.enabled,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub async fn list_users(State(state): State<AppState>, _admin: AdminUser) -> Response {
    match state.user_service.get_all().await {
        Ok(users) => ok(users.into_iter().map(UserResponse::from).collect::<Vec<_>>())
            .into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    match state.user_service.get(&id).await {
        Ok(user) => ok(UserResponse::from(user)).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<UserCreateRequest>,
) -> Response {
    match state.user_service.create(request).await {
        Ok(user) => created(UserResponse::from(user)).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(request): Json<UserUpdateRequest>,
) -> Response {
    match state.user_service.update(&id, request).await {
        Ok(user) => ok(UserResponse::from(user)).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    match state.user_service.delete(&id).await {
        Ok(()) => no_content().into_response(),
        Err(e) => handle_error(e),
    }
}
