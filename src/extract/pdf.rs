use tracing::{debug, warn};

use crate::errors::{AppError, PDF_EXTRACTION_MESSAGE};

/// Concatenates the text of every page in page order, without separators or
/// layout reconstruction.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, AppError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data).map_err(|e| {
        warn!("PDF extraction failed: {}", e);
        AppError::Extraction(PDF_EXTRACTION_MESSAGE.to_string())
    })?;

    debug!(pages = pages.len(), "PDF pages extracted");
    Ok(pages.concat())
}
