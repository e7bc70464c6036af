//! Registration gate: a user with a stored profile can never register again.

use rusqlite::Connection;

use crate::core::types::{InboundEvent, Reply};
use crate::i18n;
use crate::storage::db;

/// Outcome of [`guard_registration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// User has no profile yet, the flow may start.
    Passed,
    /// User is registered. The reply must be sent and the flow aborted.
    Rejected(Reply),
}

/// Checks whether the user already has a profile.
pub fn is_registered(conn: &Connection, user_id: i64) -> rusqlite::Result<bool> {
    Ok(!db::get_profile(conn, user_id)?.is_empty())
}

/// Lets the registration flow start only for users without a profile.
///
/// The rejection reply goes to the event's chat: for a button press that is
/// the chat of the message carrying the button, for a text message the chat
/// it was sent in.
pub fn guard_registration(conn: &Connection, event: &InboundEvent) -> rusqlite::Result<GateDecision> {
    if is_registered(conn, event.user_id())? {
        log::info!("Registration rejected, user {} already has a profile", event.user_id());
        return Ok(GateDecision::Rejected(Reply::text(i18n::t("already-registered"))));
    }
    Ok(GateDecision::Passed)
}
