//! Apartment handlers
//!
//! Create/update come in two flavors: multipart (`apartment` JSON part
//! plus optional `model` file) and plain JSON under `/simple`, mirroring
//! the management UI's needs. Reads are public; mutations require an
//! authenticated caller.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::response::{IntoResponse, Response};
use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::models::{ApartmentCreateRequest, ApartmentStatus, ApartmentUpdateRequest};
use crate::web::AppState;
use crate::web::extractors::AuthUser;
use crate::web::responses::{bad_request, created, handle_error, handle_result, no_content};
use crate::web::utils::parse_entity_multipart;

pub async fn list_apartments(State(state): State<AppState>) -> Response {
    handle_result(state.apartment_service.get_all().await)
}

pub async fn get_apartment(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    handle_result(state.apartment_service.get(&id).await)
}

pub async fn create_apartment(
    State(state): State<AppState>,
    _user: AuthUser,
    multipart: Multipart,
) -> Response {
    let parts = match parse_entity_multipart::<ApartmentCreateRequest>(multipart, "apartment").await
    {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    match state
        .apartment_service
        .create(parts.entity, parts.model)
        .await
    {
        Ok(apartment) => created(apartment).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn update_apartment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let parts = match parse_entity_multipart::<ApartmentUpdateRequest>(multipart, "apartment").await
    {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    handle_result(
        state
            .apartment_service
            .update(&id, parts.entity, parts.model)
            .await,
    )
}

pub async fn create_apartment_simple(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(request): Json<ApartmentCreateRequest>,
) -> Response {
    match state.apartment_service.create(request, None).await {
        Ok(apartment) => created(apartment).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn update_apartment_simple(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(request): Json<ApartmentUpdateRequest>,
) -> Response {
    handle_result(state.apartment_service.update(&id, request, None).await)
}

pub async fn delete_apartment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Response {
    match state.apartment_service.delete(&id).await {
        Ok(()) => no_content().into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn get_apartments_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Response {
    let status: ApartmentStatus = match status.parse() {
        Ok(status) => status,
        Err(e) => return bad_request(&e),
    };
    handle_result(state.apartment_service.by_status(status).await)
}

pub async fn get_apartments_by_floor(
    State(state): State<AppState>,
    Path(floor_id): Path<String>,
) -> Response {
    handle_result(state.apartment_service.by_floor(&floor_id).await)
}

pub async fn get_apartments_by_type(
    State(state): State<AppState>,
    Path(unit_type): Path<String>,
) -> Response {
    handle_result(state.apartment_service.by_unit_type(&unit_type).await)
}

#[derive(Debug, Deserialize)]
pub struct PriceRangeParams {
    pub min_price: String,
    pub max_price: String,
}

pub async fn get_apartments_by_price_range(
    State(state): State<AppState>,
    Query(params): Query<PriceRangeParams>,
) -> Response {
    let min = match BigDecimal::from_str(&params.min_price) {
        Ok(value) => value,
        Err(e) => return bad_request(&format!("invalid min_price: {e}")),
    };
    let max = match BigDecimal::from_str(&params.max_price) {
        Ok(value) => value,
        Err(e) => return bad_request(&format!("invalid max_price: {e}")),
    };

    handle_result(state.apartment_service.by_price_range(&min, &max).await)
}
