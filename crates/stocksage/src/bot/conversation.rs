//! Conversation history for one session

use serde::{Deserialize, Serialize};
use stocksage_llm::Message;

/// Ordered, append-only message history
///
/// Owned by the caller and lent to [`StockBot::handle_turn`](super::StockBot::handle_turn)
/// for the duration of a turn. Nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Get number of messages in history
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Raw history as pretty-printed JSON, for debugging
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.messages).unwrap_or_else(|e| format!("<unprintable history: {e}>"))
    }
}
