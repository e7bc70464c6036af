use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

use crate::core::error::{AppError, AppResult};

// Configuration for the bot, read once from the environment.
// `main` loads `.env` through `dotenvy` before any of these statics is touched.

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: db_bota.db (`:memory:` keeps everything in RAM)
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "db_bota.db".to_string()));

/// Number of pooled SQLite connections
/// Read from DATABASE_POOL_SIZE environment variable
/// Default: 1, so every store operation runs on the same connection
pub static DATABASE_POOL_SIZE: Lazy<u32> = Lazy::new(|| {
    env::var("DATABASE_POOL_SIZE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|size| *size > 0)
        .unwrap_or(1)
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: bot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "bot.log".to_string()));

/// Picture sent together with the greeting after a successful login
/// Read from LOGIN_PHOTO_PATH environment variable
/// Default: photo/login_true.jpeg
pub static LOGIN_PHOTO_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOGIN_PHOTO_PATH").unwrap_or_else(|_| "photo/login_true.jpeg".to_string()));

/// Custom Bot API server (e.g. a local telegram-bot-api instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Returns the bot token or a configuration error when it is missing.
pub fn bot_token() -> AppResult<String> {
    token_or_error(BOT_TOKEN.as_str())
}

fn token_or_error(token: &str) -> AppResult<String> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::Config(
            "BOT_TOKEN (or TELOXIDE_TOKEN) environment variable is not set".to_string(),
        ));
    }
    Ok(token.to_string())
}

/// Retry configuration
pub mod retry {
    use super::Duration;

    /// Maximum number of retries for dispatcher reconnection
    pub const MAX_DISPATCHER_RETRIES: u32 = 5;

    /// Delay between dispatcher retry attempts (in seconds)
    pub const DISPATCHER_RETRY_DELAY_SECS: u64 = 5;

    /// Dispatcher retry delay duration
    pub fn dispatcher_delay() -> Duration {
        Duration::from_secs(DISPATCHER_RETRY_DELAY_SECS)
    }

    /// Base for exponential backoff calculation
    pub const EXPONENTIAL_BACKOFF_BASE: u64 = 2;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API requests (in seconds)
    /// Long polling holds a request open, so this stays well above the polling timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
