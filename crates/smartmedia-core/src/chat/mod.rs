//! Document hand-off to the chat transcript.

mod dispatcher;
mod message;

pub use dispatcher::{ChatDispatcher, RecordingChatSurface};
pub use message::{
    document_icon, truncate_for_chat, ChatExtra, ChatMessage, MAX_CHAT_CONTENT_CHARS,
};
