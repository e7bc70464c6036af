//! Conversion between teloxide updates and the bot's own event/reply types

use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, User};

use super::keyboards;
use crate::core::types::{InboundEvent, Reply, Sender};

fn user_id_of(user: &User) -> Option<i64> {
    i64::try_from(user.id.0).ok()
}

/// Text message → `InboundEvent::Message`.
///
/// Returns `None` for messages without text or without a sender
/// (channel posts, service messages, media).
pub fn from_message(msg: &Message) -> Option<InboundEvent> {
    let text = msg.text()?;
    let user = msg.from.as_ref()?;

    Some(InboundEvent::Message {
        sender: Sender {
            user_id: user_id_of(user)?,
            chat_id: msg.chat.id.0,
            display_name: user.first_name.clone(),
        },
        message_id: msg.id.0,
        text: text.to_string(),
    })
}

/// Button press → `InboundEvent::Button`.
///
/// Without the originating message (inline mode) replies go to the user's
/// private chat and there is nothing to delete.
pub fn from_callback(q: &CallbackQuery) -> Option<InboundEvent> {
    let data = q.data.clone()?;
    let user_id = user_id_of(&q.from)?;

    let (chat_id, origin_message_id) = match &q.message {
        Some(message) => (message.chat().id.0, Some(message.id().0)),
        None => (user_id, None),
    };

    Some(InboundEvent::Button {
        sender: Sender {
            user_id,
            chat_id,
            display_name: q.from.first_name.clone(),
        },
        data,
        origin_message_id,
    })
}

/// Executes replies in order against the event's chat.
///
/// A failed deletion is logged and skipped: the message may be too old or
/// already gone. Any other failed request stops the sequence.
pub async fn send_replies(bot: &Bot, event: &InboundEvent, replies: Vec<Reply>) -> ResponseResult<()> {
    let chat_id = ChatId(event.sender().chat_id);

    for reply in replies {
        match reply {
            Reply::Text { text, keyboard } => {
                let mut request = bot.send_message(chat_id, text);
                if let Some(layout) = keyboard {
                    request = request.reply_markup(keyboards::markup(layout));
                }
                request.await?;
            }
            Reply::Photo { path, caption } => {
                bot.send_photo(chat_id, InputFile::file(path)).caption(caption).await?;
            }
            Reply::DeleteOrigin => match event.origin_message_id() {
                Some(message_id) => {
                    if let Err(e) = bot.delete_message(chat_id, MessageId(message_id)).await {
                        log::warn!("Failed to delete message {} in chat {}: {}", message_id, chat_id, e);
                    }
                }
                None => log::debug!("No origin message to delete for {}", event),
            },
        }
    }

    Ok(())
}
