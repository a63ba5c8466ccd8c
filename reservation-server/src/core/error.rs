use thiserror::Error;

/// Startup / serving failures (request-level errors use `AppError`)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    App(#[from] shared::AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
