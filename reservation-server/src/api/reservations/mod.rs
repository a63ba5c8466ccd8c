//! Reservation routes
//!
//! HTML pages (forms post back, method override for update/delete):
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /reservations | GET | list |
//! | /reservations | POST | create |
//! | /reservations/create | GET | blank form |
//! | /reservations/{id}/edit | GET | edit form |
//! | /reservations/{id} | POST, PUT | update |
//! | /reservations/{id} | DELETE | delete |
//! | /reservations/{id}/delete | POST | delete |
//!
//! JSON API under `/api/reservations` with `GET`/`POST` on the collection and
//! `GET`/`PUT`/`DELETE` on `/{id}`.

mod json;
mod pages;

use axum::{
    Router,
    routing::{get, post},
};
use shared::AppError;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(page_routes())
        .nest("/api/reservations", json_routes())
}

fn page_routes() -> Router<ServerState> {
    Router::new()
        .route("/reservations", get(pages::index).post(pages::store))
        .route("/reservations/create", get(pages::create))
        .route("/reservations/{id}/edit", get(pages::edit))
        .route(
            "/reservations/{id}",
            post(pages::update).put(pages::update).delete(pages::destroy),
        )
        .route("/reservations/{id}/delete", post(pages::destroy))
}

fn json_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(json::list).post(json::create))
        .route(
            "/{id}",
            get(json::get_by_id).put(json::update).delete(json::delete),
        )
}

/// Path ids that are not integers cannot name a reservation
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::with_message(
            shared::ErrorCode::ReservationNotFound,
            format!("Reservation {raw} not found"),
        )
    })
}
