//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: concrete service construction over the SurrealDB
//!   repositories
//! - `routes/`: HTTP routes and handlers, one file per resource
//! - `envelope.rs`: the `{status, success, msg, object?, date?}` JSON
//!   envelope and the error → HTTP status boundary adapter

use std::sync::Arc;

use axum::{Extension, Router};

pub mod envelope;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(Extension(services))
}
