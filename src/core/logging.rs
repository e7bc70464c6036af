//! Logging initialization
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Startup diagnostics for the configuration in effect

use anyhow::Result;
use simplelog::*;
use std::fs::OpenOptions;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// The log file is opened in append mode so restarts keep the history.
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to open the file or a logger was already installed
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup.
///
/// The token itself is never written; only whether it is present.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Startup configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.trim().is_empty() {
        log::error!("❌ BOT_TOKEN: not set");
    } else {
        log::info!("✅ BOT_TOKEN: set");
    }

    log::info!("DATABASE_PATH: {}", config::DATABASE_PATH.as_str());
    log::info!("DATABASE_POOL_SIZE: {}", *config::DATABASE_POOL_SIZE);
    log::info!("LOG_FILE_PATH: {}", config::LOG_FILE_PATH.as_str());

    let photo = config::LOGIN_PHOTO_PATH.as_str();
    if std::path::Path::new(photo).exists() {
        log::info!("✅ LOGIN_PHOTO_PATH: {}", photo);
    } else {
        log::warn!("⚠️  LOGIN_PHOTO_PATH: {} (file not found, login greeting will be text only)", photo);
    }

    match config::BOT_API_URL.as_deref() {
        Some(url) => log::info!("BOT_API_URL: {}", url),
        None => log::info!("BOT_API_URL: default (api.telegram.org)"),
    }
}
