//! Configuration, data types, and the summarize-then-render pipeline.

pub mod bionic;
pub mod config;
pub mod models;
pub mod summarizer;
pub mod text;
