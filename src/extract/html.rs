//! Fetching a web page and reducing it to its readable text.

use reqwest::Client;
use scraper::{Html, Node};
use tracing::{info, warn};
use url::Url;

use crate::core::text::trim_separators;
use crate::errors::{AppError, FETCH_FAILED_MESSAGE};

/// Elements whose whole subtree is dropped before text is collected.
pub const STRIPPED_ELEMENTS: &[&str] = &[
    "script",
    "style",
    "header",
    "footer",
    "nav",
    "aside",
    "advertisement",
];

/// GETs `raw_url` and returns the cleaned page text.
///
/// Any transport failure, malformed URL or non-success status becomes
/// [`AppError::Fetch`].
pub async fn fetch_page_text(client: &Client, raw_url: &str) -> Result<String, AppError> {
    let url = Url::parse(raw_url.trim()).map_err(|e| {
        warn!(url = %raw_url, "Rejected URL: {}", e);
        AppError::Fetch(FETCH_FAILED_MESSAGE.to_string())
    })?;

    let response = client.get(url.clone()).send().await?.error_for_status()?;
    let body = response.text().await?;

    info!(url = %url, bytes = body.len(), "Fetched page");
    Ok(clean_html(&body))
}

/// Strips [`STRIPPED_ELEMENTS`] and joins the remaining text nodes, each
/// trimmed, with single spaces. Whitespace-only nodes are dropped.
#[must_use]
pub fn clean_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut pieces: Vec<&str> = Vec::new();
    let mut pending = vec![document.tree.root()];

    while let Some(node) = pending.pop() {
        match node.value() {
            Node::Element(element) if STRIPPED_ELEMENTS.contains(&element.name()) => continue,
            Node::Text(text) => {
                let trimmed = trim_separators(text);
                if !trimmed.is_empty() {
                    pieces.push(trimmed);
                }
            }
            _ => {}
        }

        let children: Vec<_> = node.children().collect();
        pending.extend(children.into_iter().rev());
    }

    pieces.join(" ")
}
