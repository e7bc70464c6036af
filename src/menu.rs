//! Top-level commands handled outside of any flow, plus the free-text fallback.

use std::path::Path;

use fluent_templates::fluent_bundle::FluentArgs;
use rusqlite::Connection;

use crate::core::error::AppResult;
use crate::core::types::{InboundEvent, MenuLayout, Reply};
use crate::i18n;
use crate::storage::db;

/// Texts the fallback swallows without logging or replying.
///
/// The router resolves `/register` as a command before the fallback, so
/// this list only applies to callers that pass text to [`on_free_text`]
/// directly.
pub const IGNORED_MESSAGES: &[&str] = &["/register"];

/// `/start`: greeting with the register/login keyboard.
pub fn on_start(event: &InboundEvent) -> Vec<Reply> {
    let name = &event.sender().display_name;
    vec![Reply::with_keyboard(
        i18n::t_name("start-greeting", name),
        MenuLayout::RegisterOrLogin,
    )]
}

/// `login` button, and the closing screen of every finished flow.
///
/// Unregistered users are pointed back to registration. Registered users
/// get the greeting as a photo caption; when `photo` is missing on disk the
/// caption goes out as plain text.
pub fn on_login(conn: &Connection, event: &InboundEvent, photo: &Path) -> AppResult<Vec<Reply>> {
    let name = &event.sender().display_name;

    if db::get_profile(conn, event.user_id())?.is_empty() {
        log::info!("User {} tried to log in without a profile", event.user_id());
        return Ok(vec![Reply::with_keyboard(
            i18n::t_name("login-not-registered", name),
            MenuLayout::RegisterOnly,
        )]);
    }

    let mut replies = Vec::with_capacity(2);
    if event.is_button() {
        replies.push(Reply::DeleteOrigin);
    }

    let caption = i18n::t_name("login-greeting", name);
    if photo.exists() {
        replies.push(Reply::Photo {
            path: photo.to_path_buf(),
            caption,
        });
    } else {
        log::warn!("Login photo {} not found, sending greeting as text", photo.display());
        replies.push(Reply::text(caption));
    }

    Ok(replies)
}

pub fn on_help() -> Vec<Reply> {
    vec![Reply::text(i18n::t("help"))]
}

/// `/view_scores`: one line per stored score, in storage order.
pub fn on_view_scores(conn: &Connection, event: &InboundEvent) -> AppResult<Vec<Reply>> {
    let scores = db::get_subject_scores(conn, event.user_id())?;

    let mut replies = Vec::with_capacity(scores.len() + 1);
    replies.push(Reply::DeleteOrigin);

    if scores.is_empty() {
        replies.push(Reply::text(i18n::t_name("scores-empty", &event.sender().display_name)));
        return Ok(replies);
    }

    for score in scores {
        let mut args = FluentArgs::new();
        args.set("subject", score.subject_name);
        args.set("points", score.points.to_string());
        replies.push(Reply::text(i18n::t_args("scores-line", &args)));
    }

    Ok(replies)
}

/// Fallback for text that matched neither a command nor an active flow.
///
/// Logs the message with today's date and acknowledges it. Button presses
/// and ignored texts produce nothing.
pub fn on_free_text(conn: &Connection, event: &InboundEvent) -> AppResult<Vec<Reply>> {
    let InboundEvent::Message { sender, text, .. } = event else {
        return Ok(Vec::new());
    };
    if IGNORED_MESSAGES.contains(&text.as_str()) {
        return Ok(Vec::new());
    }

    db::log_message(conn, sender.user_id, text, &db::today())?;
    log::debug!("Logged free text from user {}", sender.user_id);

    Ok(vec![Reply::text(i18n::t("echo"))])
}
