//! Canonical gateway data models
//!
//! Provider-agnostic request, response, error and stream chunk structures.
//! Every provider adapter maps its native shapes onto these.

use super::deserialize_present;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical chat completion request parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionParams {
    /// Model name (optional, adapters may default it)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Message list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    /// Frequency penalty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Maximum completion tokens (newer alias of `max_tokens`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    /// Number of completions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Presence penalty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Stop sequence(s), either a string or an array of strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Value>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Any other canonical field; only forwarded when a provider declares it
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role (system/developer/user/assistant/tool)
    pub role: String,
    /// Message content: a string, a content part array, or `null`.
    /// Absent content stays absent.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Value>,
    /// Remaining fields (name, tool_calls, tool_call_id, ...) kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Create a plain text message
    pub fn text(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(Value::String(content.into())),
            extra: Map::new(),
        }
    }
}

/// Canonical chat completion response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response ID
    pub id: String,
    /// Object type
    pub object: String,
    /// Creation timestamp
    pub created: u64,
    /// Model used
    pub model: String,
    /// Provider tag
    pub provider: String,
    /// Choice list
    pub choices: Vec<ChatChoice>,
    /// Usage statistics
    pub usage: Usage,
}

/// Canonical choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    /// Choice index
    pub index: u32,
    /// Assistant message
    pub message: ChatMessage,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Role and content of a completed message, copied as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Value>,
}

/// Token usage. Counts the provider did not report stay absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

/// Canonical error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorBody,
    /// Provider tag
    pub provider: String,
}

/// Canonical error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Offending parameter
    pub param: Option<String>,
    /// Error code
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Build an error response for `provider`
    pub fn new(error: ErrorBody, provider: impl Into<String>) -> Self {
        Self {
            error,
            provider: provider.into(),
        }
    }

    /// Error for a provider body that is neither a success nor a known error shape.
    /// The raw body is embedded for diagnosis.
    pub fn invalid_provider_response(raw: &Value, provider: &str) -> Self {
        Self::new(
            ErrorBody {
                message: format!("Invalid response received from {}: {}", provider, raw),
                error_type: None,
                param: None,
                code: None,
            },
            provider,
        )
    }
}

/// Result of transforming a non-streaming provider response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatCompleteOutcome {
    /// Successful completion
    Completion(ChatCompletionResponse),
    /// Provider-reported or shape error
    Error(ErrorResponse),
}

impl ChatCompleteOutcome {
    /// Check if this is an error outcome
    pub fn is_error(&self) -> bool {
        matches!(self, ChatCompleteOutcome::Error(_))
    }
}

/// Canonical streaming chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub provider: String,
    pub choices: Vec<ChunkChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Canonical streaming choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: u32,
    /// Delta forwarded as received
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub delta: Option<Value>,
    pub finish_reason: Option<String>,
}
