//! Shared types for the reservation service
//!
//! Domain models, validation rules, list-view querying, wall-clock time
//! helpers and the unified error/response types used by the server.

pub mod error;
pub mod listing;
pub mod models;
pub mod time;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use listing::{ListQuery, PaginatedResponse, StatusFilter};
pub use models::{Reservation, ReservationForm, ReservationInput, ReservationStatus};
