//! Test fixtures for end-to-end flows
//!
//! Provides TestEnvironment: an on-disk SQLite database in a temporary
//! directory and a `ScoreBot` wired to it, fed with synthetic events.

#![allow(dead_code)]

use std::path::PathBuf;

use examscore_bot::core::types::{InboundEvent, Sender};
use examscore_bot::storage::{create_pool, get_connection, DbConnection};
use examscore_bot::{Reply, ScoreBot};
use tempfile::TempDir;

/// Username the test bot answers to
pub const BOT_USERNAME: &str = "exam_score_bot";

/// Complete test environment
///
/// # Example
/// ```ignore
/// let env = TestEnvironment::new();
/// let replies = env.send_text(7, "/enter_scores");
/// assert_eq!(env.bot.conversations().step(7), Step::AwaitingSubjectName);
/// ```
pub struct TestEnvironment {
    pub bot: ScoreBot,
    /// Path of the login picture (created unless `without_photo` is used)
    pub photo_path: PathBuf,
    pub db_path: PathBuf,
    /// Keeps the directory alive for the lifetime of the environment
    pub dir: TempDir,
    next_message_id: std::cell::Cell<i32>,
}

impl TestEnvironment {
    /// Environment with an existing login picture.
    pub fn new() -> Self {
        let env = Self::without_photo();
        std::fs::write(&env.photo_path, b"jpeg").unwrap();
        env
    }

    /// Environment whose login picture is missing on disk.
    pub fn without_photo() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("db_bota.db");
        let photo_path = dir.path().join("login_true.jpeg");

        let pool = create_pool(db_path.to_str().unwrap(), 1).unwrap();
        let bot = ScoreBot::new(pool, photo_path.clone(), BOT_USERNAME);

        Self {
            bot,
            photo_path,
            db_path,
            dir,
            next_message_id: std::cell::Cell::new(1),
        }
    }

    pub fn conn(&self) -> DbConnection {
        get_connection(self.bot.pool()).unwrap()
    }

    pub fn sender(user_id: i64) -> Sender {
        Sender {
            user_id,
            chat_id: user_id,
            display_name: format!("User{}", user_id),
        }
    }

    pub fn text_event(&self, user_id: i64, text: &str) -> InboundEvent {
        let message_id = self.next_message_id.get();
        self.next_message_id.set(message_id + 1);
        InboundEvent::Message {
            sender: Self::sender(user_id),
            message_id,
            text: text.to_string(),
        }
    }

    pub fn button_event(&self, user_id: i64, data: &str) -> InboundEvent {
        InboundEvent::Button {
            sender: Self::sender(user_id),
            data: data.to_string(),
            origin_message_id: Some(500),
        }
    }

    /// Sends a text message and returns the replies.
    pub fn send_text(&self, user_id: i64, text: &str) -> Vec<Reply> {
        self.bot.handle(&self.text_event(user_id, text)).unwrap()
    }

    /// Presses an inline button and returns the replies.
    pub fn press(&self, user_id: i64, data: &str) -> Vec<Reply> {
        self.bot.handle(&self.button_event(user_id, data)).unwrap()
    }

    /// Completes registration for `user_id`.
    pub fn register(&self, user_id: i64, first_name: &str, last_name: &str) {
        self.send_text(user_id, "/register");
        self.send_text(user_id, first_name);
        self.send_text(user_id, last_name);
    }
}

/// Texts and captions of the replies, in order.
pub fn bodies(replies: &[Reply]) -> Vec<&str> {
    replies.iter().filter_map(Reply::body).collect()
}
