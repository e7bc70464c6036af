//! Examscore - Telegram bot that registers students and stores their exam scores
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging and the event/reply types
//! - `storage`: SQLite persistence
//! - `registration`: the registration gate
//! - `dialogue`: registration and score entry flows
//! - `menu`: top-level commands and the free-text fallback
//! - `router`: `ScoreBot`, which routes every event
//! - `telegram`: teloxide integration and handlers

pub mod cli;
pub mod core;
pub mod dialogue;
pub mod i18n;
pub mod menu;
pub mod registration;
pub mod router;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult, InboundEvent, Reply};
pub use router::ScoreBot;
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
