//! Entry point for every inbound event.
//!
//! Routing depends on the sender's conversation: with an active flow every
//! text message is flow input (only `/cancel` escapes); without one, commands
//! go to the menu and anything else to the free-text fallback. Button presses
//! are never flow input.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::core::error::AppResult;
use crate::core::types::{InboundEvent, Reply, CALLBACK_LOGIN, CALLBACK_START_REGISTRATION};
use crate::dialogue::{ConversationMachine, Transition};
use crate::menu;
use crate::storage::db::{self, DbPool};
use crate::telegram::bot::{parse_command, Command};

/// The bot without its transport: events in, replies out.
pub struct ScoreBot {
    pool: DbPool,
    conversations: ConversationMachine,
    login_photo: PathBuf,
    /// Username without `@`; commands suffixed with another bot's name are plain text
    bot_username: String,
}

impl ScoreBot {
    pub fn new(pool: DbPool, login_photo: impl Into<PathBuf>, bot_username: impl Into<String>) -> Self {
        Self {
            pool,
            conversations: ConversationMachine::new(),
            login_photo: login_photo.into(),
            bot_username: bot_username.into(),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn conversations(&self) -> &ConversationMachine {
        &self.conversations
    }

    /// Handles one event and returns the replies for its chat, in order.
    ///
    /// Store errors are returned as is; the conversation is left where it
    /// was before the failing step.
    pub fn handle(&self, event: &InboundEvent) -> AppResult<Vec<Reply>> {
        let conn = db::get_connection(&self.pool)?;

        match event {
            InboundEvent::Message { text, .. } => self.handle_text(&conn, event, text),
            InboundEvent::Button { data, .. } => self.handle_button(&conn, event, data),
        }
    }

    fn handle_text(&self, conn: &Connection, event: &InboundEvent, text: &str) -> AppResult<Vec<Reply>> {
        let user_id = event.user_id();
        let command = parse_command(text, &self.bot_username);

        if self.conversations.is_active(user_id) {
            if command == Some(Command::Cancel) {
                if let Some(transition) = self.conversations.cancel(user_id) {
                    return Ok(transition.into_replies());
                }
            }
            let transition = self.conversations.handle_input(conn, event)?;
            return Ok(self.after_transition(conn, event, transition));
        }

        match command {
            Some(Command::Start) => Ok(menu::on_start(event)),
            Some(Command::Register) => self.conversations.start_registration(conn, event),
            Some(Command::EnterScores) => Ok(self.conversations.start_score_entry(event)),
            Some(Command::Help) => Ok(menu::on_help()),
            Some(Command::ViewScores) => menu::on_view_scores(conn, event),
            // idle /cancel has nothing to cancel
            Some(Command::Cancel) | None => menu::on_free_text(conn, event),
        }
    }

    fn handle_button(&self, conn: &Connection, event: &InboundEvent, data: &str) -> AppResult<Vec<Reply>> {
        match data {
            CALLBACK_LOGIN => menu::on_login(conn, event, &self.login_photo),
            CALLBACK_START_REGISTRATION => {
                if self.conversations.is_active(event.user_id()) {
                    log::debug!("Ignoring {} during an active flow", event);
                    return Ok(Vec::new());
                }
                self.conversations.start_registration(conn, event)
            }
            other => {
                log::warn!("Unknown callback data '{}' from user {}", other, event.user_id());
                Ok(Vec::new())
            }
        }
    }

    /// A finished flow closes with the login screen.
    ///
    /// The collected data is already stored at this point, so a failing login
    /// screen is logged and the completion reply still goes out.
    fn after_transition(&self, conn: &Connection, event: &InboundEvent, transition: Transition) -> Vec<Reply> {
        match transition {
            Transition::Completed(mut replies) => {
                match menu::on_login(conn, event, &self.login_photo) {
                    Ok(login) => replies.extend(login),
                    Err(e) => log::error!("Failed to show the login screen after {}: {}", event, e),
                }
                replies
            }
            other => other.into_replies(),
        }
    }
}
