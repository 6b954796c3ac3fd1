mod common;

use std::io::{Cursor, Write};

use bionic_tldr::AppError;
use bionic_tldr::errors::{DOCX_EXTRACTION_MESSAGE, PDF_EXTRACTION_MESSAGE};
use bionic_tldr::extract::{ContentKind, extract_text, html::clean_html};
use common::pdf_bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut cursor);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<?xml version=\"1.0\"?><Types/>").unwrap();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

#[tokio::test]
async fn test_docx_paragraphs_in_document_order() {
    let data = docx_bytes(&["First paragraph.", "", "Third one."]);

    let text = extract_text(ContentKind::Docx, data).await.unwrap();

    assert_eq!(text, "First paragraph.\n\nThird one.\n");
}

#[tokio::test]
async fn test_docx_without_document_part_fails() {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut zip = ZipWriter::new(&mut cursor);
        zip.start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"not a word document").unwrap();
        zip.finish().unwrap();
    }

    let err = extract_text(ContentKind::Docx, cursor.into_inner())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Extraction(_)));
    assert_eq!(err.to_string(), DOCX_EXTRACTION_MESSAGE);
}

#[tokio::test]
async fn test_pdf_pages_are_concatenated_in_order() {
    let data = pdf_bytes(&["Alpha page", "Bravo page"]);

    let text = extract_text(ContentKind::Pdf, data).await.unwrap();

    let alpha = text.find("Alpha page").expect("first page text");
    let bravo = text.find("Bravo page").expect("second page text");
    assert!(alpha < bravo, "pages out of order: {text:?}");
}

#[tokio::test]
async fn test_malformed_pdf_is_an_extraction_error() {
    let err = extract_text(ContentKind::Pdf, b"%PDF-1.4 this is not really a pdf".to_vec())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Extraction(_)));
    assert_eq!(err.to_string(), PDF_EXTRACTION_MESSAGE);
}

#[tokio::test]
async fn test_plain_text_passes_through() {
    let text = extract_text(ContentKind::Text, "héllo\nworld".as_bytes().to_vec())
        .await
        .unwrap();
    assert_eq!(text, "héllo\nworld");
}

#[tokio::test]
async fn test_invalid_utf8_text_is_rejected() {
    let err = extract_text(ContentKind::Text, vec![0xff, 0xfe, 0x00])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Extraction(_)));
}

#[test]
fn test_clean_html_keeps_main_content_only() {
    let html = r#"<!doctype html><html><body>
        <nav>Menu</nav>
        <article><p>Rust is a systems language.</p><p>It is fast.</p></article>
        <script>track()</script>
        <footer>Footer text</footer>
    </body></html>"#;

    assert_eq!(
        clean_html(html),
        "Rust is a systems language. It is fast."
    );
}
