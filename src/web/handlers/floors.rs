//! Floor handlers
//!
//! CRUD in multipart and `/simple` JSON flavors, the hotspot replacement
//! endpoint, and the floor-image sub-resource (list, upload, metadata,
//! delete, rename) over the `floors/{id}/` storage namespace.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::models::{FloorCreateRequest, FloorUpdateRequest, HotspotUpdateRequest};
use crate::services::FloorImageInfo;
use crate::web::AppState;
use crate::web::extractors::AuthUser;
use crate::web::responses::{created, handle_error, handle_result, no_content, not_found, ok};
use crate::web::utils::{parse_entity_multipart, parse_files_multipart};

pub async fn list_floors(State(state): State<AppState>) -> Response {
    handle_result(state.floor_service.get_all().await)
}

pub async fn get_floor(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    handle_result(state.floor_service.get(&id).await)
}

pub async fn create_floor(
    State(state): State<AppState>,
    _user: AuthUser,
    multipart: Multipart,
) -> Response {
    let parts = match parse_entity_multipart::<FloorCreateRequest>(multipart, "floor").await {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    match state.floor_service.create(parts.entity, parts.model).await {
        Ok(floor) => created(floor).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn update_floor(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let parts = match parse_entity_multipart::<FloorUpdateRequest>(multipart, "floor").await {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    handle_result(
        state
            .floor_service
            .update(&id, parts.entity, parts.model)
            .await,
    )
}

pub async fn create_floor_simple(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<FloorCreateRequest>,
) -> Response {
    match state.floor_service.create(request, None).await {
        Ok(floor) => created(floor).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn update_floor_simple(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<FloorUpdateRequest>,
) -> Response {
    handle_result(state.floor_service.update(&id, request, None).await)
}

pub async fn update_floor_hotspots(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<HotspotUpdateRequest>,
) -> Response {
    handle_result(state.floor_service.update_hotspots(&id, request).await)
}

pub async fn delete_floor(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Response {
    match state.floor_service.delete(&id).await {
        Ok(()) => no_content().into_response(),
        Err(e) => handle_error(e),
    }
}

// ---- floor image sub-resource ----

pub async fn list_floor_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    handle_result(state.floor_service.list_images(&id).await)
}

pub async fn get_floor_image_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    handle_result(state.floor_service.image_details(&id).await)
}

/// Outcome of one file within an image upload batch
#[derive(Debug, Serialize)]
pub struct FloorImageUploadResult {
    pub file_name: String,
    pub download_url: String,
    pub image_info: Option<FloorImageInfo>,
}

#[derive(Debug, Serialize)]
pub struct FloorImageUploadResponse {
    pub uploaded: Vec<FloorImageUploadResult>,
    pub uploaded_count: usize,
    pub total_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Upload one or many images into the floor's namespace. A `file_name`
/// override only applies when a single file is supplied.
pub async fn upload_floor_images(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let parts = match parse_files_multipart(multipart).await {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    let custom_name = if parts.files.len() == 1 {
        parts.file_name
    } else {
        None
    };

    let total_count = parts.files.len();
    let mut uploaded = Vec::new();
    let mut errors = Vec::new();

    for file in parts.files {
        match state
            .floor_service
            .upload_image(&id, &file, custom_name.clone())
            .await
        {
            Ok(download_url) => {
                let stored_name = custom_name.clone().unwrap_or_else(|| file.file_name.clone());
                let image_info = state
                    .floor_service
                    .image_info(&id, &stored_name)
                    .await
                    .unwrap_or(None);
                uploaded.push(FloorImageUploadResult {
                    file_name: stored_name,
                    download_url,
                    image_info,
                });
            }
            Err(e) => errors.push(format!("failed to upload {}: {e}", file.file_name)),
        }
    }

    ok(FloorImageUploadResponse {
        uploaded_count: uploaded.len(),
        total_count,
        uploaded,
        errors,
    })
    .into_response()
}

pub async fn delete_floor_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((id, file_name)): Path<(String, String)>,
) -> Response {
    match state.floor_service.delete_image(&id, &file_name).await {
        Ok(()) => no_content().into_response(),
        Err(e) => handle_error(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct RenameParams {
    pub new_file_name: String,
}

pub async fn rename_floor_image(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((id, file_name)): Path<(String, String)>,
    Query(params): Query<RenameParams>,
) -> Response {
    handle_result(
        state
            .floor_service
            .rename_image(&id, &file_name, &params.new_file_name)
            .await,
    )
}

pub async fn get_floor_image_info(
    State(state): State<AppState>,
    Path((id, file_name)): Path<(String, String)>,
) -> Response {
    match state.floor_service.image_info(&id, &file_name).await {
        Ok(Some(info)) => ok(info).into_response(),
        Ok(None) => not_found("floor image", &file_name),
        Err(e) => handle_error(e),
    }
}
