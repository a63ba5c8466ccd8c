//! JSON API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Reservation, ReservationForm};
use shared::{ApiResponse, AppError, AppResult, ListQuery, PaginatedResponse};

use super::parse_id;
use crate::core::ServerState;
use crate::db::repository::reservation;

/// GET /api/reservations - one page of the filtered list
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<PaginatedResponse<Reservation>>> {
    let all = reservation::find_all(state.pool()).await?;
    Ok(ApiResponse::success(query.apply(all)))
}

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Reservation>> {
    let id = parse_id(&id)?;
    let found = reservation::get(state.pool(), id).await?;
    Ok(ApiResponse::success(found))
}

/// POST /api/reservations
pub async fn create(
    State(state): State<ServerState>,
    Json(form): Json<ReservationForm>,
) -> AppResult<ApiResponse<Reservation>> {
    let input = form
        .validate(state.now(), state.timezone())
        .map_err(|errors| AppError::invalid_fields(&errors))?;
    let created = reservation::create(state.pool(), input).await?;
    tracing::info!(id = created.id, "Reservation created");
    Ok(ApiResponse::success_with_message("Reservation created.", created))
}

/// PUT /api/reservations/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(form): Json<ReservationForm>,
) -> AppResult<ApiResponse<Reservation>> {
    let id = parse_id(&id)?;
    reservation::get(state.pool(), id).await?;
    let input = form
        .validate(state.now(), state.timezone())
        .map_err(|errors| AppError::invalid_fields(&errors))?;
    let updated = reservation::update(state.pool(), id, input).await?;
    tracing::info!(id, "Reservation updated");
    Ok(ApiResponse::success_with_message("Reservation updated.", updated))
}

/// DELETE /api/reservations/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    let id = parse_id(&id)?;
    reservation::delete(state.pool(), id).await?;
    tracing::info!(id, "Reservation deleted");
    Ok(ApiResponse::ok_with_message("Reservation deleted."))
}
