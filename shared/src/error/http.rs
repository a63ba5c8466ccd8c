//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::ReservationNotFound => StatusCode::NOT_FOUND,
            // Field-level validation failures re-render the form
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
