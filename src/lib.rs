//! bionic-tldr: summarize text, documents, or web pages and render the
//! summary for bionic reading.
//!
//! Text arrives from a form field, an uploaded TXT/PDF/DOCX file, or a URL.
//! It is cut into fixed-width chunks, each chunk is summarized by the
//! configured model, and the joined summary has the first half of every
//! word wrapped in `<b>`.
//!
//! # Example
//!
//! ```no_run
//! use bionic_tldr::api::{AppState, create_router};
//! use bionic_tldr::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     bionic_tldr::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let addr = config.bind_addr;
//!     let app = create_router(AppState::from_config(config)?);
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod extract;

pub use errors::AppError;

/// Configure structured logging.
///
/// Honors `RUST_LOG` and switches to JSON lines when `LOG_FORMAT=json`.
/// Calling it more than once is harmless; later calls are ignored.
///
/// # Example
///
/// ```
/// bionic_tldr::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bionic_tldr=debug,tower_http=info"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let result = if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialised");
    }
}
