//! Word splitting shared by the summarizer and the bionic renderer.

/// Unicode whitespace plus the ASCII file, group, record and unit separators
/// (`\x1c`..=`\x1f`), which also delimit words.
#[must_use]
pub fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Non-empty runs of text between separators.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_separator).filter(|word| !word.is_empty())
}

#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_word_separator)
}

#[must_use]
pub fn trim_separators(text: &str) -> &str {
    text.trim_matches(is_word_separator)
}
