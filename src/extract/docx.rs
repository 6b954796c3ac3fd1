//! DOCX text extraction straight from `word/document.xml`.
//!
//! Only paragraphs that are direct children of `w:body` count, each followed
//! by a newline. A paragraph's text comes from its own runs and the runs of
//! its hyperlinks; runs wrapped in tracked changes, content controls or smart
//! tags are skipped, as are table cells and text boxes.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;
use zip::ZipArchive;

use crate::errors::{AppError, DOCX_EXTRACTION_MESSAGE};

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_docx_text(data: &[u8]) -> Result<String, AppError> {
    let xml = read_document_part(data).map_err(|e| {
        warn!("DOCX container could not be read: {}", e);
        AppError::Extraction(DOCX_EXTRACTION_MESSAGE.to_string())
    })?;

    body_paragraph_text(&xml).map_err(|e| {
        warn!("DOCX document part is malformed: {}", e);
        AppError::Extraction(DOCX_EXTRACTION_MESSAGE.to_string())
    })
}

fn read_document_part(data: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| e.to_string())?;
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(|e| e.to_string())?;
    Ok(xml)
}

/// Walks the document part and returns each body paragraph's text plus `\n`.
pub fn body_paragraph_text(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // Stack index of the open body paragraph's `w:p`, and its text so far.
    let mut paragraph: Option<(usize, String)> = None;
    let mut out = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && paragraph.is_none() && parent_is(&stack, b"body") {
                    paragraph = Some((stack.len(), String::new()));
                }
                stack.push(name);
            }
            Event::End(_) => {
                stack.pop();
                if paragraph.as_ref().is_some_and(|(depth, _)| *depth == stack.len())
                    && let Some((_, text)) = paragraph.take()
                {
                    out.push_str(&text);
                    out.push('\n');
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"p"
                    && paragraph.is_none()
                    && parent_is(&stack, b"body")
                {
                    out.push('\n');
                } else if let Some((depth, text)) = paragraph.as_mut()
                    && is_paragraph_run(&stack[*depth + 1..])
                    && let Some(inline) = run_inline_text(&e)
                {
                    text.push_str(inline);
                }
            }
            Event::Text(t) => {
                if let Some((depth, text)) = paragraph.as_mut()
                    && stack.last().is_some_and(|top| top.as_slice() == b"t")
                    && is_paragraph_run(&stack[*depth + 1..stack.len() - 1])
                {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

/// True when `path`, relative to the paragraph, is `r` or `hyperlink/r`.
fn is_paragraph_run(path: &[Vec<u8>]) -> bool {
    match path {
        [run] => run.as_slice() == b"r",
        [link, run] => link.as_slice() == b"hyperlink" && run.as_slice() == b"r",
        _ => false,
    }
}

/// Text contributed by an empty run child. Page and column breaks add nothing.
fn run_inline_text(e: &BytesStart<'_>) -> Option<&'static str> {
    match e.local_name().as_ref() {
        b"tab" | b"ptab" => Some("\t"),
        b"cr" => Some("\n"),
        b"noBreakHyphen" => Some("-"),
        b"br" => {
            let wraps = e
                .attributes()
                .flatten()
                .find(|attr| attr.key.local_name().as_ref() == b"type")
                .is_none_or(|attr| attr.value.as_ref() == b"textWrapping");
            wraps.then_some("\n")
        }
        _ => None,
    }
}

fn parent_is(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.last().is_some_and(|top| top.as_slice() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        )
    }

    #[test]
    fn each_paragraph_ends_with_newline() {
        let xml = document(
            "<w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space=\"preserve\"> world</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Second</w:t></w:r></w:p>",
        );
        assert_eq!(body_paragraph_text(&xml).unwrap(), "Hello world\nSecond\n");
    }

    #[test]
    fn empty_paragraphs_still_emit_newline() {
        let xml = document("<w:p/><w:p><w:pPr/></w:p><w:p><w:r><w:t>x</w:t></w:r></w:p>");
        assert_eq!(body_paragraph_text(&xml).unwrap(), "\n\nx\n");
    }

    #[test]
    fn tabs_and_breaks_inside_runs() {
        let xml = document(
            "<w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr>\
             <w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>",
        );
        assert_eq!(body_paragraph_text(&xml).unwrap(), "a\tb\nc\n");
    }

    #[test]
    fn table_cells_are_not_body_paragraphs() {
        let xml = document(
            "<w:p><w:r><w:t>before</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>\
             <w:p><w:r><w:t>after</w:t></w:r></w:p>",
        );
        assert_eq!(body_paragraph_text(&xml).unwrap(), "before\nafter\n");
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = document("<w:p><w:r><w:t>Fish &amp; chips</w:t></w:r></w:p>");
        assert_eq!(body_paragraph_text(&xml).unwrap(), "Fish & chips\n");
    }

    #[test]
    fn hyperlink_runs_are_paragraph_text() {
        let xml = document(
            "<w:p><w:r><w:t xml:space=\"preserve\">see </w:t></w:r>\
             <w:hyperlink r:id=\"rId4\"><w:r><w:t>docs</w:t></w:r></w:hyperlink></w:p>",
        );
        assert_eq!(body_paragraph_text(&xml).unwrap(), "see docs\n");
    }

    #[test]
    fn wrapped_runs_and_page_breaks_add_nothing() {
        let xml = document(
            "<w:p><w:r><w:t>kept</w:t></w:r>\
             <w:ins w:id=\"1\"><w:r><w:t>INSERTED</w:t></w:r></w:ins>\
             <w:sdt><w:sdtContent><w:r><w:t>control</w:t></w:r></w:sdtContent></w:sdt>\
             <w:smartTag><w:r><w:t>tagged</w:t></w:r></w:smartTag>\
             <w:r><w:br w:type=\"page\"/></w:r></w:p>",
        );
        assert_eq!(body_paragraph_text(&xml).unwrap(), "kept\n");
    }

    #[test]
    fn explicit_text_wrapping_break_is_a_newline() {
        let xml = document(
            "<w:p><w:r><w:t>a</w:t><w:br w:type=\"textWrapping\"/><w:t>b</w:t>\
             <w:br w:type=\"column\"/><w:noBreakHyphen/><w:t>c</w:t></w:r></w:p>",
        );
        assert_eq!(body_paragraph_text(&xml).unwrap(), "a\nb-c\n");
    }

    #[test]
    fn text_box_content_is_skipped() {
        let xml = document(
            "<w:p><w:r><w:t>outer</w:t></w:r><w:r><w:pict><v:textbox><w:txbxContent>\
             <w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></v:textbox></w:pict></w:r></w:p>",
        );
        assert_eq!(body_paragraph_text(&xml).unwrap(), "outer\n");
    }

    #[test]
    fn garbage_is_an_extraction_error() {
        let err = extract_docx_text(b"definitely not a zip").unwrap_err();
        assert_eq!(err.to_string(), DOCX_EXTRACTION_MESSAGE);
    }
}
