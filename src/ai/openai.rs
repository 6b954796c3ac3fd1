//! `OpenAI` Responses API backend.
//!
//! Chat models have no min/max length knobs, so the bounds are phrased in the
//! instruction and `max_length` doubles as the output token cap.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::SummaryModel;
use crate::core::models::SummaryLengths;
use crate::errors::AppError;

const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

/// Instruction sent ahead of every chunk.
pub const SUMMARY_INSTRUCTIONS: &str = "You are a summarization model. \
    Write a concise abstractive summary of the user's text. \
    Output only the summary, with no preamble and no commentary.";

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            org_id,
            model_name,
        })
    }

    #[must_use]
    pub fn build_request_body(&self, chunk: &str, lengths: SummaryLengths) -> Value {
        json!({
            "model": self.model_name,
            "instructions": format!(
                "{} Aim for between {} and {} tokens.",
                SUMMARY_INSTRUCTIONS, lengths.min_length, lengths.max_length
            ),
            "input": chunk,
            "temperature": 0,
            "max_output_tokens": lengths.max_length
        })
    }
}

/// Reads the generated text from a Responses API payload.
///
/// Prefers the top-level `output_text` convenience field and falls back to
/// collecting `output_text` parts from `output[].content[]`.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    if let Some(items) = response_json.get("output").and_then(Value::as_array) {
        for item in items {
            let Some(parts) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for p in parts {
                let is_output_text = p
                    .get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| t == "output_text");
                if !is_output_text {
                    continue;
                }
                if let Some(s) = p.get("text").and_then(Value::as_str) {
                    collected.push(s.to_string());
                } else if let Some(s) = p
                    .get("text")
                    .and_then(|t| t.get("value"))
                    .and_then(Value::as_str)
                {
                    collected.push(s.to_string());
                }
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

#[async_trait]
impl SummaryModel for OpenAiClient {
    async fn summarize(&self, chunk: &str, lengths: SummaryLengths) -> Result<String, AppError> {
        #[cfg(feature = "debug-logs")]
        debug!("Summarizing chunk with OpenAI:\n{}", chunk);

        #[cfg(not(feature = "debug-logs"))]
        debug!(
            model = %self.model_name,
            chars = chunk.chars().count(),
            "Summarizing chunk with OpenAI"
        );

        let mut request = self
            .http
            .post(RESPONSES_URL)
            .bearer_auth(&self.api_key)
            .json(&self.build_request_body(chunk, lengths));

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Model(format!("OpenAI API request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Model(format!("OpenAI API error: {}", error_text)));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AppError::Model(format!("Failed to parse OpenAI response: {}", e)))?;

        let text = extract_output_text(&response_json)
            .ok_or_else(|| AppError::Model("No text in response".to_string()))?;
        info!(chars = text.chars().count(), "OpenAI chunk summary received");
        Ok(text)
    }
}
