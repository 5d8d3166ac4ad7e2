//! Perfil domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named role/category assigned to colaboradores.
///
/// Profiles are immutable after creation; there is no update or delete
/// operation. The bootstrap migration seeds `Administrador`,
/// `Gente e Cultura` and `Colaborador Comum`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perfil {
    pub id: i64,
    /// Display name (≤ 50 chars).
    pub perfil: String,
    /// Single-character status flag, `"A"` = active.
    pub status: String,
    /// Creation date, date-only.
    pub data: NaiveDate,
}

/// Fields required to create a new perfil.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePerfil {
    pub perfil: String,
    pub status: String,
}
