//! Core utilities, configuration, errors, and common types

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_startup_configuration};
pub use types::{InboundEvent, MenuLayout, Reply, Sender};
