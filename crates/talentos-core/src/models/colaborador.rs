//! Colaborador domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered collaborator with login credentials and a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colaborador {
    pub id: Uuid,
    pub nome: String,
    /// Foreign key into the perfil table.
    pub id_perfil: i64,
    pub email: String,
    /// Digits-only, 11 characters after normalization.
    pub cpf: String,
    pub celular: Option<String>,
    pub cep: Option<String>,
    pub uf: Option<String>,
    pub localidade: Option<String>,
    pub bairro: Option<String>,
    pub logradouro: Option<String>,
    /// Argon2id hash of the password. Never leaves the backend.
    #[serde(skip_serializing, default)]
    pub senha: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to register a new colaborador.
///
/// `cpf`, `celular` and `email` are expected pre-normalized (digits-only
/// / trimmed) by the time this reaches a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateColaborador {
    pub nome: String,
    pub id_perfil: i64,
    pub email: String,
    pub cpf: String,
    pub celular: Option<String>,
    pub cep: Option<String>,
    pub uf: Option<String>,
    pub localidade: Option<String>,
    pub bairro: Option<String>,
    pub logradouro: Option<String>,
    /// Raw password (hashed with Argon2id before storage).
    pub senha: String,
}
