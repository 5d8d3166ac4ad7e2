//! Talentos Database — SurrealDB connection management, schema
//! migrations and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`]) plus the
//!   bootstrap perfil seeder ([`seed_perfis`])
//! - Error types ([`DbError`])
//! - SurrealDB implementations of the `talentos-core` repository traits

pub mod repository;

mod connection;
mod error;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1, seed_perfis};
