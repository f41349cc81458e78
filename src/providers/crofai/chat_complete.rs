//! CrofAI chat completion mapping
//!
//! Parameter table for outgoing requests plus the response and stream chunk
//! transforms onto the canonical schema.

use super::CROFAI;
use crate::models::canonical::{
    ChatChoice, ChatCompleteOutcome, ChatCompletionChunk, ChatCompletionParams,
    ChatCompletionResponse, ChatMessage, ChunkChoice, ErrorBody, ErrorResponse, Message,
};
use crate::models::crofai::{
    CrofAiChatResponse, CrofAiErrorDetail, CrofAiResponse, CrofAiStreamChunk,
};
use crate::providers::{ParameterSpec, ParameterTable};
use crate::utils::error::{AdapterError, AdapterResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Model used when the caller does not name one
pub const DEFAULT_MODEL: &str = "deepseek-r1-0528";

/// Keep-alive line, e.g. `: ping - 2025-04-13 03:55:09.637341+00:00`
static PING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:\s*ping\s*-\s*\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}\.\d{6}\+\d{2}:\d{2}$")
        .expect("ping pattern is valid")
});

/// CrofAI parameter mapping, built once
pub static CHAT_COMPLETE_PARAMS: Lazy<ParameterTable> = Lazy::new(|| {
    ParameterTable::new(vec![
        (
            "model",
            ParameterSpec::new("model")
                .required()
                .default_value(json!(DEFAULT_MODEL)),
        ),
        (
            "messages",
            ParameterSpec::new("messages")
                .required()
                .default_value(json!([]))
                .transform(transform_messages),
        ),
        (
            "frequency_penalty",
            ParameterSpec::new("frequency_penalty")
                .default_value(json!(0))
                .min(-2.0)
                .max(2.0),
        ),
        (
            "max_tokens",
            ParameterSpec::new("max_tokens").default_value(json!(100)).min(1.0),
        ),
        // alias; declared after max_tokens so it wins when both are sent
        (
            "max_completion_tokens",
            ParameterSpec::new("max_tokens").default_value(json!(100)).min(1.0),
        ),
        // multiple completions are not supported
        (
            "n",
            ParameterSpec::new("n").default_value(json!(1)).min(1.0).max(1.0),
        ),
        (
            "presence_penalty",
            ParameterSpec::new("presence_penalty")
                .default_value(json!(0))
                .min(-2.0)
                .max(2.0),
        ),
        (
            "temperature",
            ParameterSpec::new("temperature")
                .default_value(json!(1))
                .min(0.0)
                .max(2.0),
        ),
        (
            "top_p",
            ParameterSpec::new("top_p")
                .default_value(json!(1))
                .min(0.0)
                .max(1.0),
        ),
        ("stop", ParameterSpec::new("stop").default_value(Value::Null)),
        ("stream", ParameterSpec::new("stream").default_value(json!(false))),
    ])
});

/// CrofAI does not know the `developer` role; it becomes `system`.
pub fn rewrite_developer_roles(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .map(|message| {
            if message.role == "developer" {
                Message {
                    role: "system".to_string(),
                    ..message.clone()
                }
            } else {
                message.clone()
            }
        })
        .collect()
}

fn transform_messages(params: &ChatCompletionParams) -> AdapterResult<Value> {
    let messages = params.messages.as_deref().unwrap_or_default();
    Ok(serde_json::to_value(rewrite_developer_roles(messages))?)
}

/// Map a CrofAI response body onto the canonical schema
pub fn transform_chat_response(body: &Value, status: u16) -> ChatCompleteOutcome {
    match CrofAiResponse::classify(body, status) {
        CrofAiResponse::ValidationError(detail) => {
            debug!("CrofAI returned validation error, status {}", status);
            ChatCompleteOutcome::Error(validation_error(detail))
        }
        CrofAiResponse::Completion(response) => {
            ChatCompleteOutcome::Completion(completion(response))
        }
        CrofAiResponse::Unrecognized(raw) => {
            warn!("Unrecognized CrofAI response shape, status {}", status);
            ChatCompleteOutcome::Error(ErrorResponse::invalid_provider_response(&raw, CROFAI))
        }
    }
}

fn validation_error(detail: CrofAiErrorDetail) -> ErrorResponse {
    let (field, message, error_type) = match detail {
        CrofAiErrorDetail::Entries(entries) => match entries.into_iter().next() {
            Some(first) => (first.field_path(), first.msg.unwrap_or_default(), first.error_type),
            None => (String::new(), String::new(), None),
        },
        CrofAiErrorDetail::Message(message) => (String::new(), message, None),
    };

    let message = if field.is_empty() {
        message
    } else {
        format!("{}: {}", field, message)
    };

    ErrorResponse::new(
        ErrorBody {
            message,
            error_type,
            param: None,
            code: None,
        },
        CROFAI,
    )
}

fn completion(response: CrofAiChatResponse) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: response.id,
        object: response.object,
        created: response.created,
        model: response.model,
        provider: CROFAI.to_string(),
        choices: response
            .choices
            .into_iter()
            .map(|choice| ChatChoice {
                index: choice.index,
                message: ChatMessage {
                    role: choice.message.role,
                    content: choice.message.content,
                },
                finish_reason: choice.finish_reason,
            })
            .collect(),
        usage: response.usage.unwrap_or_default().into(),
    }
}

/// Reshape one raw CrofAI SSE line into a canonical SSE line.
///
/// Returns an empty string for keep-alive pings. Malformed chunks are returned
/// as `AdapterError::StreamChunk` for the caller to handle.
pub fn transform_stream_chunk(raw: &str) -> AdapterResult<String> {
    if PING_LINE.is_match(raw) {
        return Ok(String::new());
    }

    let chunk = raw.trim();
    let chunk = chunk.strip_prefix("data: ").unwrap_or(chunk).trim();
    if chunk == "[DONE]" {
        return Ok("data: [DONE]\n\n".to_string());
    }

    let parsed: CrofAiStreamChunk = serde_json::from_str(chunk)
        .map_err(|e| AdapterError::StreamChunk(format!("{}: {}", e, chunk)))?;
    let canonical = canonical_chunk(parsed)?;

    Ok(format!("data: {}\n\n", serde_json::to_string(&canonical)?))
}

fn canonical_chunk(chunk: CrofAiStreamChunk) -> AdapterResult<ChatCompletionChunk> {
    let first = chunk
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AdapterError::StreamChunk("chunk has no choices".to_string()))?;

    Ok(ChatCompletionChunk {
        id: chunk.id,
        object: chunk.object,
        created: chunk.created,
        model: chunk.model,
        provider: CROFAI.to_string(),
        choices: vec![ChunkChoice {
            index: first.index,
            delta: first.delta,
            finish_reason: first.finish_reason,
        }],
        usage: chunk.usage.map(Into::into),
    })
}
