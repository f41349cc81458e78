//! CrofAI native data models
//!
//! Wire shapes of the CrofAI chat completion API. These are parsed per call and
//! only live long enough to be mapped onto the canonical models.

use super::canonical::Usage;
use super::deserialize_present;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CrofAI chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrofAiChatResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<CrofAiChoice>,
    #[serde(default)]
    pub usage: Option<CrofAiUsage>,
}

/// CrofAI choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrofAiChoice {
    pub index: u32,
    pub message: CrofAiMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// CrofAI response message. Fields are kept loose so any body carrying
/// `choices` maps through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrofAiMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub content: Option<Value>,
}

/// CrofAI usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrofAiUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

impl From<CrofAiUsage> for Usage {
    fn from(usage: CrofAiUsage) -> Self {
        Usage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// CrofAI error response (FastAPI style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrofAiErrorResponse {
    pub detail: CrofAiErrorDetail,
}

/// Error detail: a validation error list or a bare message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrofAiErrorDetail {
    Entries(Vec<CrofAiValidationEntry>),
    Message(String),
}

/// One validation error entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrofAiValidationEntry {
    /// Path to the offending field; segments are strings or array indices
    #[serde(default)]
    pub loc: Option<Vec<Value>>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}

impl CrofAiErrorDetail {
    /// Whether the detail carries anything to report
    pub fn is_empty(&self) -> bool {
        match self {
            CrofAiErrorDetail::Entries(entries) => entries.is_empty(),
            CrofAiErrorDetail::Message(message) => message.is_empty(),
        }
    }
}

impl CrofAiValidationEntry {
    /// Dotted field path, e.g. `body.messages.0.content`
    pub fn field_path(&self) -> String {
        self.loc
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|segment| match segment {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// CrofAI streaming chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrofAiStreamChunk {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<CrofAiStreamChoice>,
    #[serde(default)]
    pub usage: Option<CrofAiUsage>,
}

/// CrofAI streaming choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrofAiStreamChoice {
    pub index: u32,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub delta: Option<Value>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// A CrofAI response body classified by shape
#[derive(Debug, Clone)]
pub enum CrofAiResponse {
    /// Non-200 body with a non-empty `detail`
    ValidationError(CrofAiErrorDetail),
    /// Body carrying `choices`
    Completion(CrofAiChatResponse),
    /// Anything else, kept raw for diagnostics
    Unrecognized(Value),
}

impl CrofAiResponse {
    /// Classify a raw body. Dispatch is driven by the presence of the `detail`
    /// and `choices` keys since the API offers no stronger signal.
    pub fn classify(body: &Value, status: u16) -> Self {
        if status != 200 {
            if let Some(detail) = body.get("detail") {
                if let Ok(detail) = serde_json::from_value::<CrofAiErrorDetail>(detail.clone()) {
                    if !detail.is_empty() {
                        return CrofAiResponse::ValidationError(detail);
                    }
                }
            }
        }

        if body.get("choices").is_some() {
            if let Ok(response) = serde_json::from_value::<CrofAiChatResponse>(body.clone()) {
                return CrofAiResponse::Completion(response);
            }
        }

        CrofAiResponse::Unrecognized(body.clone())
    }
}
