//! Bionic reading transform: the first half of every word is wrapped in `<b>`.

use crate::core::text::{is_blank, words};

/// Renders `text` as an HTML fragment with the leading half of each
/// whitespace-delimited word emphasised.
///
/// The split point is `floor(chars / 2)`, so a one-character word gets an
/// empty `<b></b>` and stays unmarked. Running this over its own output
/// re-splits the tags; it is not idempotent.
#[must_use]
pub fn render(text: &str) -> String {
    if is_blank(text) {
        return String::new();
    }

    words(text)
        .map(render_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_word(word: &str) -> String {
    let half = word.chars().count() / 2;
    let split_at = word
        .char_indices()
        .nth(half)
        .map_or(word.len(), |(idx, _)| idx);
    let (head, tail) = word.split_at(split_at);
    format!("<b>{head}</b>{tail}")
}
