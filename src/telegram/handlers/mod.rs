//! Telegram bot handler tree configuration
//!
//! The same tree is used in production and can be fed updates in tests.

mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
