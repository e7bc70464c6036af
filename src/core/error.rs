use thiserror::Error;

/// Centralized error types for the application
///
/// Store, pool and Bot API failures are converted into this enum so handlers
/// can propagate them with `?` and the dispatcher logs them in one place.
///
/// # Example
///
/// ```no_run
/// use examscore_bot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed startup configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// An event reached a handler that cannot accept it (routing defect)
    #[error("Unexpected event: {0}")]
    UnexpectedEvent(String),

    /// A conversation draft lost data it must hold at its current step
    #[error("Conversation state error: {0}")]
    Conversation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
