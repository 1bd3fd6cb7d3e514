//! Apartment picture handlers

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::web::AppState;
use crate::web::extractors::AuthUser;
use crate::web::responses::{created, handle_error, handle_result, no_content};
use crate::web::utils::parse_files_multipart;

pub async fn list_apartment_pictures(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    handle_result(state.picture_service.for_apartment(&id).await)
}

/// Upload one or many pictures; they append after the apartment's
/// current highest order index.
pub async fn upload_apartment_pictures(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let parts = match parse_files_multipart(multipart).await {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    match state.picture_service.upload_pictures(&id, parts.files).await {
        Ok(pictures) => created(pictures).into_response(),
        Err(e) => handle_error(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub picture_ids: Vec<String>,
}

/// Reassign zero-based display orders following the supplied sequence
pub async fn reorder_apartment_pictures(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<ReorderRequest>,
) -> Response {
    handle_result(
        state
            .picture_service
            .reorder_pictures(&id, &request.picture_ids)
            .await,
    )
}

pub async fn delete_picture(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Response {
    match state.picture_service.delete(&id).await {
        Ok(()) => no_content().into_response(),
        Err(e) => handle_error(e),
    }
}
