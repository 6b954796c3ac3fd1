#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use bionic_tldr::AppError;
use bionic_tldr::ai::SummaryModel;
use bionic_tldr::core::models::SummaryLengths;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tokio::net::TcpListener;

/// Returns `summary-{n}` for the n-th call and records every chunk it saw.
#[derive(Default)]
pub struct RecordingModel {
    pub calls: Mutex<Vec<(String, SummaryLengths)>>,
}

impl RecordingModel {
    pub fn chunks(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(chunk, _)| chunk.clone())
            .collect()
    }

    pub fn lengths(&self) -> Vec<SummaryLengths> {
        self.calls.lock().unwrap().iter().map(|(_, l)| *l).collect()
    }
}

#[async_trait]
impl SummaryModel for RecordingModel {
    async fn summarize(&self, chunk: &str, lengths: SummaryLengths) -> Result<String, AppError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((chunk.to_string(), lengths));
        Ok(format!("summary-{}", calls.len() - 1))
    }
}

/// Always fails.
pub struct FailingModel;

#[async_trait]
impl SummaryModel for FailingModel {
    async fn summarize(&self, _chunk: &str, _lengths: SummaryLengths) -> Result<String, AppError> {
        Err(AppError::Model("model offline".to_string()))
    }
}

/// Fails on the listed call indices, succeeds with `ok-{n}` otherwise.
pub struct FlakyModel {
    pub fail_on: Vec<usize>,
    pub counter: AtomicUsize,
}

impl FlakyModel {
    pub fn new(fail_on: Vec<usize>) -> Self {
        Self {
            fail_on,
            counter: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SummaryModel for FlakyModel {
    async fn summarize(&self, _chunk: &str, _lengths: SummaryLengths) -> Result<String, AppError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&n) {
            Err(AppError::Model(format!("chunk {n} failed")))
        } else {
            Ok(format!("ok-{n}"))
        }
    }
}

/// A text of `words` distinct-looking words separated by single spaces.
pub fn words(count: usize) -> String {
    (0..count)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A PDF with one page per entry, each page showing its entry as a single line.
pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|line| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

/// Serves every path, answering only after `delay`; returns the base URL.
pub async fn stalled_server(delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let site = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        "too late"
    });
    tokio::spawn(async move {
        axum::serve(listener, site).await.unwrap();
    });
    format!("http://{addr}")
}
