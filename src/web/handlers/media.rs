//! Generic media asset handlers
//!
//! The `type` path segment selects the storage folder: `3d` maps to
//! `models`, anything else to `images`.

use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use crate::storage::folder_for_media_type;
use crate::web::AppState;
use crate::web::extractors::AdminUser;
use crate::web::responses::{handle_error, not_found, ok};
use crate::web::utils::parse_files_multipart;

#[derive(Debug, Serialize)]
pub struct MediaUrlResponse {
    pub url: String,
    pub media_type: String,
}

pub async fn upload_file(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(media_type): Path<String>,
    multipart: Multipart,
) -> Response {
    let parts = match parse_files_multipart(multipart).await {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    let folder = folder_for_media_type(&media_type);

    match state.media_service.upload(&parts.files[0], folder).await {
        Ok(uploaded) => ok(MediaUrlResponse {
            url: uploaded.url,
            media_type,
        })
        .into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn delete_file(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path((media_type, file_name)): Path<(String, String)>,
) -> Response {
    let key = format!("{}/{}", folder_for_media_type(&media_type), file_name);
    match state.media_service.delete_key(&key).await {
        Ok(()) => ok(json!({ "deleted": true })).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn get_file_url(
    State(state): State<AppState>,
    Path((media_type, file_name)): Path<(String, String)>,
) -> Response {
    let key = format!("{}/{}", folder_for_media_type(&media_type), file_name);
    match state.media_service.signed_url(&key).await {
        Ok(Some(url)) => ok(MediaUrlResponse { url, media_type }).into_response(),
        Ok(None) => not_found("media", &file_name),
        Err(e) => handle_error(e),
    }
}

pub async fn check_file_exists(
    State(state): State<AppState>,
    Path((media_type, file_name)): Path<(String, String)>,
) -> Response {
    let key = format!("{}/{}", folder_for_media_type(&media_type), file_name);
    match state.media_service.exists(&key).await {
        Ok(exists) => ok(json!({ "exists": exists })).into_response(),
        Err(e) => handle_error(e),
    }
}
