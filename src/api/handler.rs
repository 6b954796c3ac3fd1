//! Endpoint handlers: every path extracts text, summarizes it, then renders
//! the summary as bionic HTML.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::Html;
use tracing::{info, warn};
use uuid::Uuid;

use super::parsing::FormFields;
use super::state::AppState;
use crate::core::bionic;
use crate::core::models::BionicResponse;
use crate::core::text::is_blank;
use crate::errors::{
    AppError, EMPTY_TEXT_MESSAGE, EMPTY_UPLOAD_MESSAGE, EMPTY_URL_CONTENT_MESSAGE,
    UNSUPPORTED_FILE_MESSAGE,
};
use crate::extract::{self, ContentKind, html};

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<BionicResponse>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::InvalidForm(e.body_text()))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or("").to_string();
        let filename = field.file_name().unwrap_or("unknown").to_string();

        let Some(kind) = ContentKind::from_mime(&content_type) else {
            warn!(content_type = %content_type, filename = %filename, "Unsupported upload type");
            return Err(AppError::UnsupportedContentType(
                UNSUPPORTED_FILE_MESSAGE.to_string(),
            ));
        };

        let data = field.bytes().await?;
        info!(filename = %filename, content_type = %content_type, bytes = data.len(), "Received upload");

        let text = extract::extract_text(kind, data.to_vec()).await?;
        if is_blank(&text) {
            return Err(AppError::EmptyInput(EMPTY_UPLOAD_MESSAGE.to_string()));
        }

        return summarize_and_render(&state, &text).await;
    }

    warn!("Upload request without a file field");
    Err(AppError::InvalidForm(format!(
        "missing form field `{UPLOAD_FIELD}`"
    )))
}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn url_handler(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<BionicResponse>, AppError> {
    let url = form.require("url")?;
    info!(url = %url, "Fetching URL content");

    let text = html::fetch_page_text(&state.http, url).await?;
    if is_blank(&text) {
        return Err(AppError::EmptyInput(EMPTY_URL_CONTENT_MESSAGE.to_string()));
    }

    summarize_and_render(&state, &text).await
}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn summarize_handler(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<BionicResponse>, AppError> {
    text_form(&state, &form).await
}

/// Same behaviour as [`summarize_handler`]; the bundled page posts here.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn convert_handler(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<BionicResponse>, AppError> {
    text_form(&state, &form).await
}

async fn text_form(state: &AppState, form: &FormFields) -> Result<Json<BionicResponse>, AppError> {
    let text = form.require("text")?;
    if is_blank(text) {
        return Err(AppError::EmptyInput(EMPTY_TEXT_MESSAGE.to_string()));
    }

    summarize_and_render(state, text).await
}

async fn summarize_and_render(
    state: &AppState,
    text: &str,
) -> Result<Json<BionicResponse>, AppError> {
    let summary = state.summarizer.summarize(text).await?;
    let bionic_text = bionic::render(&summary);
    info!(
        input_chars = text.chars().count(),
        summary_chars = summary.chars().count(),
        "Rendered bionic summary"
    );
    Ok(Json(BionicResponse { bionic_text }))
}
