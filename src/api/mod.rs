//! HTTP surface: routing, form parsing and the endpoint handlers.

pub mod handler;
pub mod parsing;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
