//! Completion provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for chat-completion backends
///
/// The orchestrator only ever talks to this trait, so tests can script the
/// model's replies without a network.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate one assistant message for the given conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}
