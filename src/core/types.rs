use std::fmt;
use std::path::PathBuf;

/// Callback payload of the "register" inline button.
pub const CALLBACK_START_REGISTRATION: &str = "start_reg";
/// Callback payload of the "log in" inline button.
pub const CALLBACK_LOGIN: &str = "login";

/// Who sent an inbound event and where replies go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    /// Telegram user ID, the key for profiles, scores and conversations
    pub user_id: i64,
    /// Chat that replies are addressed to
    pub chat_id: i64,
    /// First name shown in Telegram, used in greetings
    pub display_name: String,
}

/// An update from the channel, already reduced to what the bot understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Text message (commands included)
    Message {
        sender: Sender,
        message_id: i32,
        text: String,
    },
    /// Inline button press
    Button {
        sender: Sender,
        data: String,
        /// Message that carried the keyboard, if Telegram still gives access to it
        origin_message_id: Option<i32>,
    },
}

impl InboundEvent {
    pub fn sender(&self) -> &Sender {
        match self {
            InboundEvent::Message { sender, .. } | InboundEvent::Button { sender, .. } => sender,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.sender().user_id
    }

    /// Message that a `Reply::DeleteOrigin` removes: the command message itself
    /// or the message that carried the pressed button.
    pub fn origin_message_id(&self) -> Option<i32> {
        match self {
            InboundEvent::Message { message_id, .. } => Some(*message_id),
            InboundEvent::Button { origin_message_id, .. } => *origin_message_id,
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(self, InboundEvent::Button { .. })
    }
}

impl fmt::Display for InboundEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InboundEvent::Message { sender, .. } => write!(f, "message from user {}", sender.user_id),
            InboundEvent::Button { sender, data, .. } => {
                write!(f, "button '{}' from user {}", data, sender.user_id)
            }
        }
    }
}

/// Inline keyboard layouts the bot can attach to a text reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLayout {
    /// "Register" and "Log in" buttons, one per row
    RegisterOrLogin,
    /// A single "Register" button
    RegisterOnly,
}

/// Outbound action, always addressed to the chat of the event being handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<MenuLayout>,
    },
    Photo {
        path: PathBuf,
        caption: String,
    },
    /// Delete the event's origin message (see [`InboundEvent::origin_message_id`])
    DeleteOrigin,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, layout: MenuLayout) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: Some(layout),
        }
    }

    /// Text of a `Text` reply or caption of a `Photo` reply.
    pub fn body(&self) -> Option<&str> {
        match self {
            Reply::Text { text, .. } => Some(text),
            Reply::Photo { caption, .. } => Some(caption),
            Reply::DeleteOrigin => None,
        }
    }
}
