//! Hugging Face inference client for seq2seq summarization models.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::SummaryModel;
use crate::core::models::SummaryLengths;
use crate::errors::AppError;

pub struct HuggingFaceClient {
    http: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(
        base_url: String,
        model: String,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!("{}/models/{}", base_url.trim_end_matches('/'), model);

        Ok(Self {
            http,
            endpoint,
            api_token,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[must_use]
pub fn build_request_body(chunk: &str, lengths: SummaryLengths) -> Value {
    json!({
        "inputs": chunk,
        "parameters": {
            "max_length": lengths.max_length,
            "min_length": lengths.min_length,
            "do_sample": false
        }
    })
}

/// Pulls `summary_text` out of the pipeline response, which is either a
/// one-element array or a bare object depending on the server.
#[must_use]
pub fn parse_summary(response: &Value) -> Option<String> {
    let item = match response {
        Value::Array(items) => items.first()?,
        other => other,
    };
    item.get("summary_text")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

#[async_trait]
impl SummaryModel for HuggingFaceClient {
    async fn summarize(&self, chunk: &str, lengths: SummaryLengths) -> Result<String, AppError> {
        debug!(
            endpoint = %self.endpoint,
            chars = chunk.chars().count(),
            "Requesting chunk summary"
        );

        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&build_request_body(chunk, lengths));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Model(format!("inference request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Model(format!(
                "inference API returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Model(format!("Failed to parse inference response: {}", e)))?;

        parse_summary(&body).ok_or_else(|| AppError::Model("No summary_text in response".to_string()))
    }
}
