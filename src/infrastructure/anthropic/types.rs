//! Request and response types for the Anthropic Messages API.

use serde::{Deserialize, Serialize};

/// Message request for `POST /v1/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    /// Model identifier
    pub model: String,

    /// Conversation messages; this client always sends a single user turn
    pub messages: Vec<Message>,

    /// Maximum tokens to generate
    pub max_tokens: u32,
}

/// A single message in a conversation
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Role of the message sender ("user" or "assistant")
    pub role: String,

    /// Text content of the message
    pub content: String,
}

impl Message {
    /// A user-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    /// Generated content blocks
    pub content: Vec<ContentBlock>,

    /// Why generation stopped, when reported
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessageResponse {
    /// Concatenated text of all text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// One content block of a response
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    /// Block type ("text" for generated text)
    #[serde(rename = "type")]
    pub block_type: String,

    /// Text payload; empty for non-text blocks
    #[serde(default)]
    pub text: String,
}
