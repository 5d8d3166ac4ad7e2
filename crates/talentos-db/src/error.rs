//! Database-specific error types and conversions.

use talentos_core::error::TalentosError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Row decode failed: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for TalentosError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => TalentosError::NotFound { entity, id },
            other => TalentosError::Database(other.to_string()),
        }
    }
}
