//! Inbound HTTP adapters.

pub mod clone_http;

pub use clone_http::{build_router, CloneHttpConfig, CloneHttpServer};
