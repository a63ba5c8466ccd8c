//! Data models
//!
//! Shared between the server and any API client.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod reservation;

// Re-exports
pub use reservation::*;
