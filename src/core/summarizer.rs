//! Chunk-and-combine summarization over an opaque [`SummaryModel`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::ai::SummaryModel;
use crate::core::models::SummaryLengths;
use crate::core::text::{is_blank, words};
use crate::errors::{AppError, EMPTY_SUMMARY_INPUT_MESSAGE};

/// Inputs with fewer words than this are returned untouched.
pub const MIN_WORDS_TO_SUMMARIZE: usize = 30;
/// Above this word count the larger output budget is used.
pub const LONG_TEXT_WORDS: usize = 100;
pub const LONG_MAX_LENGTH: usize = 250;
pub const SHORT_MAX_LENGTH: usize = 50;
pub const MIN_LENGTH: usize = 30;
/// Chunk width in characters. Word counts drive the length budget while
/// chunking is by characters; both are kept as they are.
pub const CHUNK_SIZE: usize = 1000;

impl SummaryLengths {
    #[must_use]
    pub fn for_word_count(words: usize) -> Self {
        let max_length = if words > LONG_TEXT_WORDS {
            LONG_MAX_LENGTH
        } else {
            SHORT_MAX_LENGTH
        };
        Self {
            max_length,
            min_length: MIN_LENGTH,
        }
    }
}

#[must_use]
pub fn word_count(text: &str) -> usize {
    words(text).count()
}

/// Splits `text` into consecutive slices of at most `chunk_size` characters.
///
/// Boundaries ignore words and sentences, so a word can be cut in two.
/// A `chunk_size` of zero is treated as one.
#[must_use]
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<&str> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut chars_in_chunk = 0;

    for (idx, _) in text.char_indices() {
        if chars_in_chunk == chunk_size {
            chunks.push(&text[start..idx]);
            start = idx;
            chars_in_chunk = 0;
        }
        chars_in_chunk += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Shared summarizer. Cheap to clone; the model handle is reference counted.
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn SummaryModel>,
}

impl Summarizer {
    #[must_use]
    pub fn new(model: Arc<dyn SummaryModel>) -> Self {
        Self { model }
    }

    /// Summarizes `text` chunk by chunk, in order.
    ///
    /// A chunk whose model call fails is logged and dropped; if every chunk
    /// fails the result is an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmptyInput`] when `text` is blank.
    pub async fn summarize(&self, text: &str) -> Result<String, AppError> {
        if is_blank(text) {
            return Err(AppError::EmptyInput(EMPTY_SUMMARY_INPUT_MESSAGE.to_string()));
        }

        let words = word_count(text);
        if words < MIN_WORDS_TO_SUMMARIZE {
            debug!(words, "Text too short to summarize, returning as is");
            return Ok(text.to_string());
        }

        let lengths = SummaryLengths::for_word_count(words);
        let chunks = chunk_text(text, CHUNK_SIZE);
        info!(
            words,
            chunks = chunks.len(),
            max_length = lengths.max_length,
            min_length = lengths.min_length,
            "Summarizing text"
        );

        let mut summaries = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            match self.model.summarize(chunk, lengths).await {
                Ok(summary) => summaries.push(summary),
                Err(e) => warn!(chunk = index, error = %e, "Error summarizing chunk, skipping"),
            }
        }

        if summaries.len() < chunks.len() {
            info!(
                succeeded = summaries.len(),
                total = chunks.len(),
                "Summary assembled from partial chunk results"
            );
        }

        Ok(summaries.join(" "))
    }
}
