//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the project use cases.

pub mod handlers;
mod server;

pub use handlers::ApiError;
pub use server::HttpServer;
