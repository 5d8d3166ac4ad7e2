//! Talentos Core — domain models, error taxonomy, repository traits and
//! the request validation layer shared by every other crate.

pub mod error;
pub mod models;
pub mod repository;
pub mod validate;

pub use error::{TalentosError, TalentosResult};
