//! Turning uploads and web pages into plain text.

pub mod docx;
pub mod html;
pub mod pdf;

use tracing::{error, info};

use crate::errors::AppError;

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const TEXT_DECODE_MESSAGE: &str = "Error decoding text file as UTF-8.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Pdf,
    Docx,
}

impl ContentKind {
    /// Maps an upload's declared content type to a supported kind.
    /// Parameters such as `; charset=utf-8` are ignored.
    #[must_use]
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let main = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match main.as_str() {
            MIME_TEXT => Some(Self::Text),
            MIME_PDF => Some(Self::Pdf),
            MIME_DOCX => Some(Self::Docx),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mime(self) -> &'static str {
        match self {
            Self::Text => MIME_TEXT,
            Self::Pdf => MIME_PDF,
            Self::Docx => MIME_DOCX,
        }
    }
}

/// Extracts text from an uploaded file of the given kind.
///
/// PDF and DOCX parsing is CPU bound and runs on the blocking pool; a panic
/// inside a parser is reported as an extraction failure.
pub async fn extract_text(kind: ContentKind, data: Vec<u8>) -> Result<String, AppError> {
    let bytes = data.len();
    let text = match kind {
        ContentKind::Text => String::from_utf8(data).map_err(|e| {
            error!("Uploaded text is not UTF-8: {}", e);
            AppError::Extraction(TEXT_DECODE_MESSAGE.to_string())
        })?,
        ContentKind::Pdf => run_blocking(kind, move || pdf::extract_pdf_text(&data)).await?,
        ContentKind::Docx => run_blocking(kind, move || docx::extract_docx_text(&data)).await?,
    };

    info!(
        content_type = kind.as_mime(),
        bytes,
        chars = text.chars().count(),
        "Extracted text from upload"
    );
    Ok(text)
}

async fn run_blocking<F>(kind: ContentKind, f: F) -> Result<String, AppError>
where
    F: FnOnce() -> Result<String, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!(content_type = kind.as_mime(), "Extraction task failed: {}", e);
        AppError::Extraction(failure_message(kind).to_string())
    })?
}

fn failure_message(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Text => TEXT_DECODE_MESSAGE,
        ContentKind::Pdf => crate::errors::PDF_EXTRACTION_MESSAGE,
        ContentKind::Docx => crate::errors::DOCX_EXTRACTION_MESSAGE,
    }
}
