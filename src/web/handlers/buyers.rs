//! Buyer handlers
//!
//! Creation is open (public inquiry form); everything else is admin only.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{BuyerCreateRequest, BuyerStatus, BuyerUpdateRequest};
use crate::web::AppState;
use crate::web::extractors::AdminUser;
use crate::web::responses::{bad_request, created, handle_error, handle_result, no_content};

pub async fn create_buyer(
    State(state): State<AppState>,
    Json(request): Json<BuyerCreateRequest>,
) -> Response {
    match state.buyer_service.create(request).await {
        Ok(buyer) => created(buyer).into_response(),
        Err(e) => handle_error(e),
    }
}

pub async fn list_buyers(State(state): State<AppState>, _admin: AdminUser) -> Response {
    handle_result(state.buyer_service.get_all().await)
}

pub async fn get_buyer(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    handle_result(state.buyer_service.get(&id).await)
}

pub async fn get_buyers_by_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(status): Path<String>,
) -> Response {
    let status: BuyerStatus = match status.parse() {
        Ok(status) => status,
        Err(e) => return bad_request(&e),
    };
    handle_result(state.buyer_service.by_status(status).await)
}

pub async fn get_buyers_by_apartment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(apartment_id): Path<String>,
) -> Response {
    handle_result(state.buyer_service.by_apartment(&apartment_id).await)
}

#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start_date: String,
    pub end_date: String,
}

pub async fn get_buyers_by_date_range(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<DateRangeParams>,
) -> Response {
    let parse = |raw: &str, which: &str| -> Result<DateTime<Utc>, Response> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| bad_request(&format!("invalid {which}: {e}")))
    };
    let start = match parse(&params.start_date, "start_date") {
        Ok(dt) => dt,
        Err(response) => return response,
    };
    let end = match parse(&params.end_date, "end_date") {
        Ok(dt) => dt,
        Err(response) => return response,
    };

    handle_result(state.buyer_service.by_date_range(start, end).await)
}

pub async fn update_buyer(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(request): Json<BuyerUpdateRequest>,
) -> Response {
    handle_result(state.buyer_service.update(&id, request).await)
}

pub async fn delete_buyer(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Response {
    match state.buyer_service.delete(&id).await {
        Ok(()) => no_content().into_response(),
        Err(e) => handle_error(e),
    }
}
