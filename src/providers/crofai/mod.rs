//! CrofAI Provider implementation
//!
//! OpenAI-like chat completion API with FastAPI-style validation errors and
//! keep-alive ping lines in its event stream

pub mod chat_complete;

use super::{BoxStream, ParameterTable, Provider};
use crate::config::{ProviderSettings, Settings};
use crate::models::canonical::{ChatCompleteOutcome, ChatCompletionParams};
use crate::services::build_request_body;
use crate::utils::error::{AdapterError, AdapterResult};
use crate::utils::sse::sse_lines;
use async_trait::async_trait;
use futures::{future, StreamExt};
use reqwest::{Client, Response};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error};

pub use chat_complete::{
    transform_chat_response, transform_stream_chunk, CHAT_COMPLETE_PARAMS, DEFAULT_MODEL,
};

/// Provider tag attached to every canonical response
pub const CROFAI: &str = "crofai";

/// CrofAI Provider
#[derive(Debug, Clone)]
pub struct CrofAiProvider {
    client: Client,
    stream_client: Client,
    settings: ProviderSettings,
}

impl CrofAiProvider {
    /// Create a new provider from provider settings
    pub fn new(settings: ProviderSettings) -> AdapterResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .user_agent(concat!("crofai-adapter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let stream_client = Client::builder()
            .timeout(Duration::from_secs(settings.stream_timeout))
            .user_agent(concat!("crofai-adapter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            stream_client,
            settings,
        })
    }

    /// Create a provider from the full adapter settings
    pub fn from_settings(settings: &Settings) -> AdapterResult<Self> {
        Self::new(settings.provider.clone())
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        let base_url = self.settings.base_url.trim_end_matches('/');
        format!("{}/chat/completions", base_url)
    }

    /// Build the provider body with the stream flag forced
    fn build_body(&self, params: &ChatCompletionParams, stream: bool) -> AdapterResult<Map<String, Value>> {
        let mut body = build_request_body(self.parameters(), params)?;
        body.insert("stream".to_string(), Value::Bool(stream));
        Ok(body)
    }

    async fn post(&self, client: &Client, body: &Map<String, Value>, stream: bool) -> AdapterResult<Response> {
        let mut request = client
            .post(self.build_url())
            .bearer_auth(&self.settings.api_key)
            .json(body);
        if stream {
            request = request.header("Accept", "text/event-stream");
        }

        request.send().await.map_err(|e| {
            error!("CrofAI request failed: {}", e);
            transport_error(e)
        })
    }

    /// Read a body and run it through the response transform.
    /// Non-JSON bodies cannot be classified and become transport errors.
    async fn read_outcome(response: Response) -> AdapterResult<ChatCompleteOutcome> {
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        let body: Value = serde_json::from_str(&text).map_err(|_| {
            error!("CrofAI returned non-JSON body: {} - {}", status, text);
            AdapterError::ExternalApi(format!("CrofAI request failed: {} - {}", status, text))
        })?;

        Ok(transform_chat_response(&body, status.as_u16()))
    }
}

fn transport_error(e: reqwest::Error) -> AdapterError {
    if e.is_timeout() {
        AdapterError::Timeout
    } else {
        AdapterError::HttpClient(e)
    }
}

#[async_trait]
impl Provider for CrofAiProvider {
    fn name(&self) -> &str {
        CROFAI
    }

    fn parameters(&self) -> &ParameterTable {
        &CHAT_COMPLETE_PARAMS
    }

    async fn chat_complete(&self, params: ChatCompletionParams) -> AdapterResult<ChatCompleteOutcome> {
        debug!("Sending CrofAI chat completion request");

        let body = self.build_body(&params, false)?;
        let response = self.post(&self.client, &body, false).await?;
        let outcome = Self::read_outcome(response).await?;

        if outcome.is_error() {
            debug!("CrofAI request completed with error outcome");
        } else {
            debug!("CrofAI request completed successfully");
        }
        Ok(outcome)
    }

    async fn chat_stream(
        &self,
        params: ChatCompletionParams,
    ) -> AdapterResult<BoxStream<'static, String>> {
        debug!("Sending CrofAI streaming chat completion request");

        let body = self.build_body(&params, true)?;
        let response = self.post(&self.stream_client, &body, true).await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(match Self::read_outcome(response).await? {
                ChatCompleteOutcome::Error(err) => {
                    AdapterError::ExternalApi(format!("{} - {}", status, err.error.message))
                }
                ChatCompleteOutcome::Completion(_) => {
                    AdapterError::ExternalApi(format!("CrofAI streaming request failed: {}", status))
                }
            });
        }

        let stream = sse_lines(response.bytes_stream()).filter_map(|line| {
            let item = match line.and_then(|line| transform_stream_chunk(&line)) {
                Ok(chunk) if chunk.is_empty() => None,
                other => Some(other),
            };
            future::ready(item)
        });

        Ok(Box::pin(stream))
    }
}
