use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Unsupported file type. Only TXT, PDF, and DOCX files are supported.";
pub const EMPTY_UPLOAD_MESSAGE: &str = "Uploaded file is empty.";
pub const EMPTY_URL_CONTENT_MESSAGE: &str = "No meaningful content found at the provided URL.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch the URL content.";
pub const EMPTY_TEXT_MESSAGE: &str = "Input text is empty.";
pub const EMPTY_SUMMARY_INPUT_MESSAGE: &str = "Cannot summarize empty text.";
pub const PDF_EXTRACTION_MESSAGE: &str = "Error extracting text from PDF.";
pub const DOCX_EXTRACTION_MESSAGE: &str = "Error extracting text from DOCX.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnsupportedContentType(String),

    #[error("{0}")]
    EmptyInput(String),

    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Fetch(String),

    #[error("Invalid form data: {0}")]
    InvalidForm(String),

    #[error("Summarization model error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status for the variant. Everything a caller can cause is a 400.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Model(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        tracing::debug!("HTTP request failed: {}", error);
        AppError::Fetch(FETCH_FAILED_MESSAGE.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        AppError::InvalidForm(error.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
