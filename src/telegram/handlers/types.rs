//! Handler types and dependencies

use std::sync::Arc;

use crate::router::ScoreBot;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub score_bot: Arc<ScoreBot>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(score_bot: Arc<ScoreBot>) -> Self {
        Self { score_bot }
    }
}
