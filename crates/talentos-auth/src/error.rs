//! Authentication error types.

use talentos_core::error::TalentosError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("CPF ou senha inválido(s).")]
    CredenciaisInvalidas,

    #[error("convite expirado")]
    ConviteExpirado,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TalentosError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::CredenciaisInvalidas => TalentosError::CredenciaisInvalidas,
            AuthError::ConviteExpirado => TalentosError::ConviteExpirado,
            AuthError::Crypto(msg) => TalentosError::Internal(msg),
        }
    }
}
