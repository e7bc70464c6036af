use dashmap::DashMap;
use rusqlite::Connection;

use super::state::{Conversation, Step};
use super::validation::{is_alphabetic, parse_points};
use crate::core::error::{AppError, AppResult};
use crate::core::types::{InboundEvent, Reply};
use crate::i18n;
use crate::registration::{guard_registration, GateDecision};
use crate::storage::db;

/// Result of feeding one input into an active flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Input accepted, the flow moved to its next step
    Advanced(Vec<Reply>),
    /// Input failed validation, the step and the bag are unchanged
    Rejected(Vec<Reply>),
    /// Last input accepted and the collected data persisted; user is idle again
    Completed(Vec<Reply>),
    /// Flow dropped on `/cancel`; user is idle again
    Cancelled(Vec<Reply>),
}

impl Transition {
    pub fn into_replies(self) -> Vec<Reply> {
        match self {
            Transition::Advanced(replies)
            | Transition::Rejected(replies)
            | Transition::Completed(replies)
            | Transition::Cancelled(replies) => replies,
        }
    }
}

/// Owner of every in-progress conversation, keyed by Telegram user ID.
///
/// An absent entry means the user is idle. Conversations live in memory only
/// and are lost on restart.
#[derive(Debug, Default)]
pub struct ConversationMachine {
    conversations: DashMap<i64, Conversation>,
}

impl ConversationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self, user_id: i64) -> Step {
        self.conversations
            .get(&user_id)
            .map(|conversation| conversation.step)
            .unwrap_or_default()
    }

    /// Snapshot of the user's conversation, `None` when idle.
    pub fn conversation(&self, user_id: i64) -> Option<Conversation> {
        self.conversations.get(&user_id).map(|conversation| conversation.clone())
    }

    pub fn is_active(&self, user_id: i64) -> bool {
        self.conversations.contains_key(&user_id)
    }

    /// `/register` or the `start_reg` button, from the idle state.
    ///
    /// Registered users get one rejection reply and stay idle.
    pub fn start_registration(&self, conn: &Connection, event: &InboundEvent) -> AppResult<Vec<Reply>> {
        if let GateDecision::Rejected(reply) = guard_registration(conn, event)? {
            return Ok(vec![reply]);
        }

        let mut replies = Vec::with_capacity(2);
        if event.is_button() {
            replies.push(Reply::DeleteOrigin);
        }
        replies.push(Reply::text(i18n::t("ask-first-name")));

        self.enter(event.user_id(), Step::AwaitingFirstName);
        log::info!("User {} started registration", event.user_id());
        Ok(replies)
    }

    /// `/enter_scores` from the idle state. Open to registered and unregistered users.
    pub fn start_score_entry(&self, event: &InboundEvent) -> Vec<Reply> {
        self.enter(event.user_id(), Step::AwaitingSubjectName);
        log::info!("User {} started score entry", event.user_id());
        vec![Reply::DeleteOrigin, Reply::text(i18n::t("ask-subject"))]
    }

    /// `/cancel`. Returns `None` for an idle user, who has nothing to cancel.
    pub fn cancel(&self, user_id: i64) -> Option<Transition> {
        let (_, dropped) = self.conversations.remove(&user_id)?;
        log::info!("User {} cancelled the flow at step {}", user_id, dropped.step);
        Some(Transition::Cancelled(vec![Reply::text(i18n::t("flow-cancelled"))]))
    }

    /// Feeds a text message into the user's active flow.
    ///
    /// The conversation is updated in place while its map entry is locked, so
    /// a concurrent `cancel` for the same user either runs first (and this
    /// input finds no flow) or after (and removes the updated draft).
    ///
    /// # Errors
    ///
    /// `AppError::UnexpectedEvent` for button presses or users without a flow
    /// (routing defects); store errors when persisting the finished flow, in
    /// which case the conversation stays at its last step.
    pub fn handle_input(&self, conn: &Connection, event: &InboundEvent) -> AppResult<Transition> {
        let InboundEvent::Message { sender, text, .. } = event else {
            return Err(AppError::UnexpectedEvent(format!("{} cannot be flow input", event)));
        };
        let user_id = sender.user_id;

        let (transition, finished_at) = {
            let Some(mut conversation) = self.conversations.get_mut(&user_id) else {
                return Err(AppError::UnexpectedEvent(format!("{} arrived without an active flow", event)));
            };
            let step = conversation.step;

            match step {
                Step::Idle => {
                    return Err(AppError::Conversation(format!(
                        "user {} has a stored idle conversation",
                        user_id
                    )));
                }
                Step::AwaitingFirstName => {
                    if !is_alphabetic(text) {
                        log::info!("User {} sent an invalid first name", user_id);
                        return Ok(rejected("invalid-first-name"));
                    }
                    conversation.bag.first_name = Some(text.clone());
                    conversation.step = Step::AwaitingLastName;
                    (Transition::Advanced(vec![Reply::text(i18n::t("ask-last-name"))]), None)
                }
                Step::AwaitingLastName => {
                    if !is_alphabetic(text) {
                        log::info!("User {} sent an invalid last name", user_id);
                        return Ok(rejected("invalid-last-name"));
                    }
                    let first_name = conversation.bag.first_name.as_deref().ok_or_else(|| {
                        AppError::Conversation(format!("user {} reached the surname step without a first name", user_id))
                    })?;

                    db::create_profile(conn, user_id, first_name, text)?;
                    log::info!("User {} registered", user_id);
                    (Transition::Completed(vec![Reply::text(i18n::t("flow-completed"))]), Some(step))
                }
                Step::AwaitingSubjectName => {
                    if !is_alphabetic(text) {
                        log::info!("User {} sent an invalid subject name", user_id);
                        return Ok(rejected("invalid-subject"));
                    }
                    conversation.bag.subject_name = Some(text.clone());
                    conversation.step = Step::AwaitingPoints;
                    (Transition::Advanced(vec![Reply::text(i18n::t("ask-points"))]), None)
                }
                Step::AwaitingPoints => {
                    let Some(points) = parse_points(text) else {
                        log::info!("User {} sent invalid points", user_id);
                        return Ok(rejected("invalid-points"));
                    };
                    let subject_name = conversation.bag.subject_name.as_deref().ok_or_else(|| {
                        AppError::Conversation(format!("user {} reached the points step without a subject", user_id))
                    })?;

                    db::create_subject_score(conn, user_id, subject_name, points)?;
                    log::info!("User {} saved {} points for {}", user_id, points, subject_name);
                    (Transition::Completed(vec![Reply::text(i18n::t("flow-completed"))]), Some(step))
                }
            }
        };

        // The entry lock is released; only drop the flow that just finished,
        // not one started from another chat in the meantime.
        if let Some(step) = finished_at {
            self.conversations.remove_if(&user_id, |_, conversation| conversation.step == step);
        }

        Ok(transition)
    }

    /// Starts a flow. A draft from another flow is replaced, not merged.
    fn enter(&self, user_id: i64, step: Step) {
        if let Some(previous) = self.conversations.insert(user_id, Conversation::at(step)) {
            log::warn!(
                "User {} entered {} while at {}, previous draft discarded",
                user_id,
                step,
                previous.step
            );
        }
    }
}

fn rejected(key: &str) -> Transition {
    Transition::Rejected(vec![Reply::text(i18n::t(key))])
}
