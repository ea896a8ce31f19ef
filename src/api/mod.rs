//! HTTP API: the chat transport and read access to conversation moods

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use server::build_app;
pub use server::serve_api;
