//! Chat-completion client for stocksage
//!
//! This crate provides the pieces needed to hold a function-calling
//! conversation with a chat-completion model:
//!
//! - Message types, including assistant function calls and `function` results
//! - Completion request/response types
//! - Function definitions advertised to the model
//! - Provider trait for completion backends
//! - The OpenAI-compatible provider (behind the `openai` feature)

pub mod completion;
pub mod error;
pub mod functions;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, FunctionCallMode, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use functions::FunctionDefinition;
pub use messages::{FunctionCall, Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
