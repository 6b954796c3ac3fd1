//! Summarization model backends.
//!
//! The rest of the crate only sees [`SummaryModel`]; which backend sits behind
//! it is decided once at startup by [`build_model`].

pub mod huggingface;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::config::{AppConfig, ModelBackend};
use crate::core::models::SummaryLengths;
use crate::errors::AppError;

pub use huggingface::HuggingFaceClient;
pub use openai::OpenAiClient;

/// A summarization model: text in, summary out.
///
/// Implementations must decode deterministically (no sampling) so the same
/// chunk always yields the same summary, and must tolerate repeated
/// sequential calls through a shared reference.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn summarize(&self, chunk: &str, lengths: SummaryLengths) -> Result<String, AppError>;
}

/// Builds the process-wide model handle from config.
pub fn build_model(config: &AppConfig) -> Result<Arc<dyn SummaryModel>, AppError> {
    let model: Arc<dyn SummaryModel> = match config.backend {
        ModelBackend::HuggingFace => Arc::new(HuggingFaceClient::new(
            config.hf_api_url.clone(),
            config.hf_model.clone(),
            config.hf_api_token.clone(),
            config.model_timeout,
        )?),
        ModelBackend::OpenAi => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                AppError::Config("OPENAI_API_KEY: required for the openai backend".to_string())
            })?;
            Arc::new(OpenAiClient::new(
                api_key,
                config.openai_org_id.clone(),
                config.openai_model.clone(),
                config.model_timeout,
            )?)
        }
    };
    Ok(model)
}
