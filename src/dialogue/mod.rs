//! Guided multi-step dialogs: registration and score entry

pub mod machine;
pub mod state;
pub mod validation;

pub use machine::{ConversationMachine, Transition};
pub use state::{Conversation, DataBag, Step};
