//! Provider module
//!
//! Defines the Provider trait, the parameter mapping types, and provider implementations

pub mod crofai;

use crate::models::canonical::{ChatCompleteOutcome, ChatCompletionParams};
use crate::utils::error::AdapterResult;
use async_trait::async_trait;
use serde_json::Value;
use std::pin::Pin;
use tokio_stream::Stream;

/// A boxed stream of streaming responses
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = AdapterResult<T>> + Send + 'a>>;

/// Computes a provider value from the whole canonical request
pub type ParamTransform = fn(&ChatCompletionParams) -> AdapterResult<Value>;

/// How one canonical parameter lands in the provider request
#[derive(Clone)]
pub struct ParameterSpec {
    /// Target field in the provider request
    pub param: &'static str,
    /// Filled from `default` when the caller omits it
    pub required: bool,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub transform: Option<ParamTransform>,
}

impl ParameterSpec {
    /// Optional parameter forwarded as-is
    pub fn new(param: &'static str) -> Self {
        Self {
            param,
            required: false,
            default: None,
            min: None,
            max: None,
            transform: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn transform(mut self, transform: ParamTransform) -> Self {
        self.transform = Some(transform);
        self
    }
}

impl std::fmt::Debug for ParameterSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterSpec")
            .field("param", &self.param)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Ordered, immutable mapping of canonical names to parameter specs
#[derive(Debug, Clone, Default)]
pub struct ParameterTable {
    entries: Vec<(&'static str, ParameterSpec)>,
}

impl ParameterTable {
    /// Build a table. A name listed twice keeps its first spec.
    pub fn new(entries: Vec<(&'static str, ParameterSpec)>) -> Self {
        let mut deduped: Vec<(&'static str, ParameterSpec)> = Vec::with_capacity(entries.len());
        for (name, spec) in entries {
            if !deduped.iter().any(|(existing, _)| *existing == name) {
                deduped.push((name, spec));
            }
        }
        Self { entries: deduped }
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, spec)| spec)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParameterSpec)> {
        self.entries.iter().map(|(name, spec)| (*name, spec))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Provider trait for upstream API providers
///
/// All providers must implement this trait to support both
/// streaming and non-streaming chat completion requests.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider tag
    fn name(&self) -> &str;

    /// Parameter mapping applied to outgoing requests
    fn parameters(&self) -> &ParameterTable;

    /// Send a chat completion request (non-streaming)
    async fn chat_complete(&self, params: ChatCompletionParams) -> AdapterResult<ChatCompleteOutcome>;

    /// Send a chat completion request (streaming).
    /// Items are SSE lines ready to forward to the client.
    async fn chat_stream(
        &self,
        params: ChatCompletionParams,
    ) -> AdapterResult<BoxStream<'static, String>>;
}

pub use crofai::CrofAiProvider;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_keeps_order_and_first_spec() {
        let table = ParameterTable::new(vec![
            ("b", ParameterSpec::new("b")),
            ("a", ParameterSpec::new("a").min(1.0)),
            ("a", ParameterSpec::new("other")),
        ]);

        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(table.get("a").unwrap().param, "a");
        assert_eq!(table.get("a").unwrap().min, Some(1.0));
        assert!(table.get("c").is_none());
    }

    #[test]
    fn test_spec_builder() {
        let spec = ParameterSpec::new("model")
            .required()
            .default_value(json!("m"));
        assert!(spec.required);
        assert_eq!(spec.default, Some(json!("m")));
        assert!(spec.transform.is_none());
    }
}
