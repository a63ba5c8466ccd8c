//! Reservation Server - restaurant reservation management
//!
//! Server-rendered pages and a JSON API for listing, creating, editing and
//! deleting reservations, backed by SQLite.
//!
//! # Module layout
//!
//! ```text
//! reservation-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── db/            # connection pool, migrations, repositories
//! ├── api/           # routers and handlers (HTML + JSON + health)
//! ├── views/         # HTML rendering
//! ├── flash.rs       # redirect-with-flash cookie
//! └── utils/         # logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod flash;
pub mod utils;
pub mod views;

pub use core::{Config, Server, ServerError, ServerState};
pub use utils::logger::init_logger_with_file;

/// Guard that flushes the file logger on drop
pub type LogGuard = Option<tracing_appender::non_blocking::WorkerGuard>;

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> (Config, LogGuard) {
    // .env is optional
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    let guard = init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    for warning in config.startup_warnings() {
        tracing::warn!("{}", warning);
    }
    (config, guard)
}
