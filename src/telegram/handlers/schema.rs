//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::core::types::InboundEvent;
use crate::telegram::events;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Text messages and button presses are converted into [`InboundEvent`]s
/// and handed to the shared `ScoreBot`; everything else is dropped.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callback))
}

/// Handler for text messages (commands and flow input alike)
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_map(|msg: Message| events::from_message(&msg))
        .endpoint(move |bot: Bot, event: InboundEvent| {
            let deps = deps.clone();
            async move { handle_event(&bot, &deps, &event).await }
        })
}

/// Handler for inline button presses
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            // Stop the client's spinner whatever happens next
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::warn!("Failed to answer callback query {:?}: {}", q.id, e);
            }

            match events::from_callback(&q) {
                Some(event) => handle_event(&bot, &deps, &event).await,
                None => {
                    log::debug!("Callback query {:?} without data, ignored", q.id);
                    Ok(())
                }
            }
        }
    })
}

async fn handle_event(bot: &Bot, deps: &HandlerDeps, event: &InboundEvent) -> Result<(), HandlerError> {
    log::debug!("Handling {}", event);

    let replies = deps.score_bot.handle(event).map_err(|e| {
        log::error!("Failed to handle {}: {}", event, e);
        e
    })?;

    events::send_replies(bot, event, replies).await.map_err(|e| {
        log::error!("Failed to deliver replies for {}: {}", event, e);
        e
    })?;

    Ok(())
}
