//! Error types for the Talentos system.

use thiserror::Error;

use crate::validate::FieldErrors;

#[derive(Debug, Error)]
pub enum TalentosError {
    /// One or more request fields violated a validation rule.
    /// Carries every failing field with its messages, aggregated.
    #[error("Erro de validação.")]
    Validation { errors: FieldErrors },

    #[error("{entity} não encontrado(a): {id}")]
    NotFound { entity: String, id: String },

    /// Deliberately undifferentiated — the caller must not learn
    /// whether the CPF exists or the password mismatched.
    #[error("CPF ou senha inválido(s).")]
    CredenciaisInvalidas,

    /// The invitation exists but was issued more than 24 hours ago.
    #[error("Convite expirado.")]
    ConviteExpirado,

    #[error("Erro de banco de dados: {0}")]
    Database(String),

    #[error("Erro interno: {0}")]
    Internal(String),
}

impl TalentosError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        TalentosError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

pub type TalentosResult<T> = Result<T, TalentosError>;
