use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::AppError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_HF_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    HuggingFace,
    OpenAi,
}

impl ModelBackend {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "openai" => Ok(Self::OpenAi),
            other => Err(AppError::Config(format!(
                "SUMMARIZER_BACKEND: unknown backend '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub backend: ModelBackend,
    pub hf_api_url: String,
    pub hf_api_token: Option<String>,
    pub hf_model: String,
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub fetch_timeout: Duration,
    pub model_timeout: Duration,
    pub max_upload_bytes: usize,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR: {}", e)))?;

        let backend = match get("SUMMARIZER_BACKEND") {
            Some(raw) => ModelBackend::parse(&raw)?,
            None => ModelBackend::HuggingFace,
        };

        let openai_api_key = get("OPENAI_API_KEY");
        if backend == ModelBackend::OpenAi && openai_api_key.is_none() {
            return Err(AppError::Config(
                "OPENAI_API_KEY: required when SUMMARIZER_BACKEND=openai".to_string(),
            ));
        }

        Ok(Self {
            bind_addr,
            backend,
            hf_api_url: get("HF_API_URL").unwrap_or_else(|| DEFAULT_HF_API_URL.to_string()),
            hf_api_token: get("HF_API_TOKEN"),
            hf_model: get("HF_MODEL").unwrap_or_else(|| DEFAULT_HF_MODEL.to_string()),
            openai_api_key,
            openai_org_id: get("OPENAI_ORG_ID"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            fetch_timeout: Duration::from_secs(parse_number(
                get("FETCH_TIMEOUT_SECS"),
                "FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
            model_timeout: Duration::from_secs(parse_number(
                get("MODEL_TIMEOUT_SECS"),
                "MODEL_TIMEOUT_SECS",
                DEFAULT_MODEL_TIMEOUT_SECS,
            )?),
            max_upload_bytes: parse_number(
                get("MAX_UPLOAD_BYTES"),
                "MAX_UPLOAD_BYTES",
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }
}

fn parse_number<T>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("{}: {}", key, e))),
        None => Ok(default),
    }
}
