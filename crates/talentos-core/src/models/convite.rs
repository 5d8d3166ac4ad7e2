//! Convite domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminator for what an invitation grants.
///
/// Serialized as the integers the original wire format uses:
/// 1 = registration invite, 2 = password-reset invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum TipoEnvio {
    CriarPerfil,
    RedefinirSenha,
}

impl From<TipoEnvio> for i64 {
    fn from(t: TipoEnvio) -> Self {
        match t {
            TipoEnvio::CriarPerfil => 1,
            TipoEnvio::RedefinirSenha => 2,
        }
    }
}

impl TryFrom<i64> for TipoEnvio {
    type Error = String;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(TipoEnvio::CriarPerfil),
            2 => Ok(TipoEnvio::RedefinirSenha),
            other => Err(format!("tipo_envio desconhecido: {other}")),
        }
    }
}

/// A time-boxed, token-based grant allowing registration or password
/// reset. The token (`hash`) is the sole credential needed to read or
/// redeem it; validity is exactly 24 hours from `data_e_hora`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Convite {
    pub id: Uuid,
    pub email: String,
    /// Opaque random token, stored as issued.
    pub hash: String,
    pub tipo_envio: TipoEnvio,
    pub data_e_hora: DateTime<Utc>,
}

/// Fields required to persist a new convite. The issuance timestamp is
/// set by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConvite {
    pub email: String,
    pub hash: String,
    pub tipo_envio: TipoEnvio,
}
