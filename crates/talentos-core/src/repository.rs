//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Uniqueness and existence checks
//! are explicit methods so services can report per-field validation
//! messages; the storage layer's unique indexes remain the authoritative
//! guard against races.

use chrono::{DateTime, Utc};

use crate::error::TalentosResult;
use crate::models::{
    colaborador::{Colaborador, CreateColaborador},
    convite::{Convite, CreateConvite},
    perfil::{CreatePerfil, Perfil},
};

pub trait ColaboradorRepository: Send + Sync {
    /// Persist a new colaborador. The raw `senha` is hashed by the
    /// implementation before it touches the store.
    fn create(
        &self,
        input: CreateColaborador,
    ) -> impl Future<Output = TalentosResult<Colaborador>> + Send;

    /// Lookup by normalized (digits-only) CPF.
    fn get_by_cpf(&self, cpf: &str) -> impl Future<Output = TalentosResult<Colaborador>> + Send;

    fn get_by_email(&self, email: &str)
    -> impl Future<Output = TalentosResult<Colaborador>> + Send;

    fn exists_by_email(&self, email: &str) -> impl Future<Output = TalentosResult<bool>> + Send;

    fn exists_by_cpf(&self, cpf: &str) -> impl Future<Output = TalentosResult<bool>> + Send;

    /// Replace the stored password hash for the colaborador with this
    /// email. The raw `senha` is hashed by the implementation.
    fn update_senha(
        &self,
        email: &str,
        senha: &str,
    ) -> impl Future<Output = TalentosResult<()>> + Send;

    /// Overwrite the profile reference of the colaborador with this CPF.
    fn update_perfil(
        &self,
        cpf: &str,
        id_perfil: i64,
    ) -> impl Future<Output = TalentosResult<Colaborador>> + Send;

    /// All colaboradores, in creation order.
    fn list(&self) -> impl Future<Output = TalentosResult<Vec<Colaborador>>> + Send;
}

pub trait PerfilRepository: Send + Sync {
    /// Persist a new perfil with the next sequential id and today's
    /// date as creation date.
    fn create(&self, input: CreatePerfil) -> impl Future<Output = TalentosResult<Perfil>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = TalentosResult<Perfil>> + Send;

    /// All perfis, in creation order.
    fn list(&self) -> impl Future<Output = TalentosResult<Vec<Perfil>>> + Send;
}

pub trait ConviteRepository: Send + Sync {
    /// Persist a new convite; the store assigns the issuance timestamp.
    fn create(&self, input: CreateConvite) -> impl Future<Output = TalentosResult<Convite>> + Send;

    /// Lookup by token regardless of age. Expiry is the caller's check.
    fn get_by_hash(&self, hash: &str) -> impl Future<Output = TalentosResult<Convite>> + Send;

    /// Lookup by token filtered at the data layer to
    /// `data_e_hora >= issued_after`. A stale token and an unknown token
    /// are indistinguishable through this method.
    fn get_valid_by_hash(
        &self,
        hash: &str,
        issued_after: DateTime<Utc>,
    ) -> impl Future<Output = TalentosResult<Convite>> + Send;
}
