//! Logging utilities
//!
//! Subscriber setup and log-friendly summaries of outgoing request bodies

use crate::config::settings::LoggingConfig;
use crate::utils::error::{AdapterError, AdapterResult};
use serde_json::{json, Map, Value};

/// Set to true to include full request bodies in debug logs
pub const VERBOSE_REQUEST_LOGGING: bool = false;

/// Initialize the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> AdapterResult<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AdapterError::Config(anyhow::anyhow!("Failed to set tracing subscriber: {}", e)))?;

    tracing::info!("Logging system initialized");
    Ok(())
}

/// Truncate a string with a note about original length
fn truncate_content(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, s.chars().count() - max_len)
    } else {
        s.to_string()
    }
}

fn filter_message(message: &Value) -> Value {
    let role = message.get("role").cloned().unwrap_or(Value::Null);
    let content = match message.get("content") {
        Some(Value::String(text)) => {
            let max_len = if role == "system" { 100 } else { 200 };
            Value::String(truncate_content(text, max_len))
        }
        Some(Value::Array(parts)) => json!(format!("[...{} content parts]", parts.len())),
        _ => Value::Null,
    };
    json!({ "role": role, "content": content })
}

/// Create a filtered summary of a provider request body for logging.
/// Keeps the scalar knobs, truncates message contents.
pub fn create_request_log_summary(body: &Map<String, Value>) -> Value {
    if VERBOSE_REQUEST_LOGGING {
        return Value::Object(body.clone());
    }

    let mut summary = Map::new();
    for (key, value) in body {
        let entry = match (key.as_str(), value) {
            ("messages", Value::Array(messages)) => {
                Value::Array(messages.iter().map(filter_message).collect())
            }
            (_, Value::Array(items)) if items.len() > 4 => {
                json!(format!("[...{} items]", items.len()))
            }
            _ => value.clone(),
        };
        summary.insert(key.clone(), entry);
    }
    Value::Object(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_only_once() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(AdapterError::Config(_))));
    }

    #[test]
    fn test_truncate_content() {
        assert_eq!(truncate_content("short", 10), "short");
        assert_eq!(truncate_content("abcdef", 3), "abc... (3 chars truncated)");
    }

    #[test]
    fn test_request_summary_truncates_messages() {
        let long = "x".repeat(500);
        let body = json!({
            "model": "deepseek-r1-0528",
            "max_tokens": 10,
            "messages": [
                {"role": "system", "content": long},
                {"role": "user", "content": [{"type": "text", "text": "hi"}]}
            ]
        });
        let summary = create_request_log_summary(body.as_object().unwrap());

        assert_eq!(summary["model"], "deepseek-r1-0528");
        assert_eq!(summary["max_tokens"], 10);
        let system = summary["messages"][0]["content"].as_str().unwrap();
        assert!(system.ends_with("(400 chars truncated)"));
        assert_eq!(summary["messages"][1]["content"], "[...1 content parts]");
    }
}
