use std::sync::Arc;

use reqwest::Client;

use crate::ai::{SummaryModel, build_model};
use crate::core::config::AppConfig;
use crate::core::summarizer::Summarizer;
use crate::errors::AppError;

/// Per-process state shared by every handler. The model inside the
/// summarizer is built once and only ever read.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Summarizer,
    pub http: Client,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wires state around an already constructed model.
    pub fn new(model: Arc<dyn SummaryModel>, config: AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            summarizer: Summarizer::new(model),
            http,
            config: Arc::new(config),
        })
    }

    /// Builds the configured model backend and the state around it.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let model = build_model(&config)?;
        Self::new(model, config)
    }
}
