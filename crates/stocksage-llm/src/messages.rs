//! Message types for chat-completion conversations
//!
//! A conversation is an ordered list of [`Message`]s. Besides plain text, an
//! assistant message may carry a [`FunctionCall`] (the model asking us to run
//! one of the advertised functions), and a `function` message carries the
//! value we computed back to the model.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// User message
    User,
    /// Assistant message (text or function call)
    Assistant,
    /// Result of a function the assistant asked for
    Function,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Function => "function",
        }
    }
}

/// A function invocation requested by the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the advertised function
    pub name: String,
    /// Arguments as JSON-encoded text, exactly as the model produced them
    pub arguments: String,
}

impl FunctionCall {
    /// Create a function call
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content; absent on assistant function-call messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Function name, set on `function` messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Function call requested by the assistant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Message {
    fn text_message(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(text.into()),
            name: None,
            function_call: None,
        }
    }

    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self::text_message(Role::User, text)
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text_message(Role::Assistant, text)
    }

    /// Create a system message with text
    pub fn system(text: impl Into<String>) -> Self {
        Self::text_message(Role::System, text)
    }

    /// Create an assistant message that requests a function call
    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            name: None,
            function_call: Some(call),
        }
    }

    /// Create a `function` message carrying a function's result
    pub fn function_result(name: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            content: Some(result.into()),
            name: Some(name.into()),
            function_call: None,
        }
    }

    /// Text content, if any
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Check if this message asks for a function call
    pub fn has_function_call(&self) -> bool {
        self.function_call.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), Some("Hello"));
        assert!(!msg.has_function_call());
    }

    #[test]
    fn test_function_result() {
        let msg = Message::function_result("get_stock_price", "189.5");
        assert_eq!(msg.role, Role::Function);
        assert_eq!(msg.name.as_deref(), Some("get_stock_price"));
        assert_eq!(msg.text(), Some("189.5"));
    }

    #[test]
    fn test_function_call_serialization() {
        let msg = Message::function_call(FunctionCall::new(
            "calculate_sma",
            r#"{"ticker":"AAPL","window":20}"#,
        ));
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "assistant");
        assert!(json.get("content").is_none());
        assert_eq!(json["function_call"]["name"], "calculate_sma");

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Function.as_str(), "function");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
