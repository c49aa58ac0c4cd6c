//! Chat surface seam.

use async_trait::async_trait;

use crate::chat::ChatMessage;
use crate::error::MediaResult;

/// A place a document message can be injected into the chat transcript.
#[async_trait]
pub trait ChatSurface: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Deliver a message. `Ok(false)` means the surface is not available.
    async fn deliver(&self, message: &ChatMessage) -> MediaResult<bool>;
}
