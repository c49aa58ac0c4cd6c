//! Collaborator traits the pipeline depends on.

mod chat;
mod hasher;
mod notifier;
mod storage;

pub use chat::*;
pub use hasher::*;
pub use notifier::*;
pub use storage::*;
