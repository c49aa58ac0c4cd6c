//! Ordered, best-effort delivery to chat surfaces.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::ChatMessage;
use crate::error::{MediaError, MediaResult};
use crate::traits::ChatSurface;

/// Tries each surface in order until one accepts the message.
///
/// A surface that errors or reports itself unavailable is logged and
/// skipped; delivery never fails the caller.
#[derive(Clone, Default)]
pub struct ChatDispatcher {
    surfaces: Vec<Arc<dyn ChatSurface>>,
}

impl ChatDispatcher {
    /// Dispatcher with no surfaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a surface after those already registered.
    pub fn with_surface(mut self, surface: Arc<dyn ChatSurface>) -> Self {
        self.surfaces.push(surface);
        self
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Returns whether any surface accepted the message.
    pub async fn dispatch(&self, message: &ChatMessage) -> bool {
        for surface in &self.surfaces {
            match surface.deliver(message).await {
                Ok(true) => {
                    tracing::debug!(surface = surface.name(), "Chat message delivered");
                    return true;
                }
                Ok(false) => {
                    tracing::debug!(surface = surface.name(), "Chat surface unavailable");
                }
                Err(e) => {
                    tracing::warn!(surface = surface.name(), error = %e, "Chat surface failed");
                }
            }
        }

        if !self.surfaces.is_empty() {
            tracing::warn!(
                file = %message.extra.file_name,
                "No chat surface accepted the document message"
            );
        }
        false
    }
}

impl std::fmt::Debug for ChatDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.surfaces.iter().map(|s| s.name()).collect();
        f.debug_struct("ChatDispatcher")
            .field("surfaces", &names)
            .finish()
    }
}

/// Keeps delivered messages in memory.
#[derive(Debug, Default)]
pub struct RecordingChatSurface {
    messages: Mutex<Vec<ChatMessage>>,
}

impl RecordingChatSurface {
    /// Surface with an empty message log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatSurface for RecordingChatSurface {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, message: &ChatMessage) -> MediaResult<bool> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|e| MediaError::Internal(format!("chat log lock poisoned: {}", e)))?;
        messages.push(message.clone());
        Ok(true)
    }
}
