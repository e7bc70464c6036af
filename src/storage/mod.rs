//! SQLite persistence for profiles, subject scores and the message log

pub mod db;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool};
