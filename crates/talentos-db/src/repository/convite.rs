//! SurrealDB implementation of [`ConviteRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use talentos_core::error::TalentosResult;
use talentos_core::models::convite::{Convite, CreateConvite, TipoEnvio};
use talentos_core::repository::ConviteRepository;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ConviteRow {
    email: String,
    hash: String,
    tipo_envio: i64,
    data_e_hora: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ConviteRowWithId {
    record_id: String,
    email: String,
    hash: String,
    tipo_envio: i64,
    data_e_hora: DateTime<Utc>,
}

fn parse_tipo(v: i64) -> Result<TipoEnvio, DbError> {
    TipoEnvio::try_from(v).map_err(DbError::Decode)
}

impl ConviteRow {
    fn into_convite(self, id: Uuid) -> Result<Convite, DbError> {
        Ok(Convite {
            id,
            email: self.email,
            hash: self.hash,
            tipo_envio: parse_tipo(self.tipo_envio)?,
            data_e_hora: self.data_e_hora,
        })
    }
}

impl ConviteRowWithId {
    fn try_into_convite(self) -> Result<Convite, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Convite {
            id,
            email: self.email,
            hash: self.hash,
            tipo_envio: parse_tipo(self.tipo_envio)?,
            data_e_hora: self.data_e_hora,
        })
    }
}

/// SurrealDB implementation of the Convite repository.
#[derive(Clone)]
pub struct SurrealConviteRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealConviteRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ConviteRepository for SurrealConviteRepository<C> {
    async fn create(&self, input: CreateConvite) -> TalentosResult<Convite> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('convites', $id) SET \
                 email = $email, hash = $hash, \
                 tipo_envio = $tipo_envio",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("hash", input.hash))
            .bind(("tipo_envio", i64::from(input.tipo_envio)))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ConviteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "convite".into(),
            id: id_str,
        })?;

        Ok(row.into_convite(id)?)
    }

    async fn get_by_hash(&self, hash: &str) -> TalentosResult<Convite> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM convites \
                 WHERE hash = $hash",
            )
            .bind(("hash", hash.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ConviteRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "convite".into(),
            id: format!("hash={hash}"),
        })?;

        Ok(row.try_into_convite()?)
    }

    async fn get_valid_by_hash(
        &self,
        hash: &str,
        issued_after: DateTime<Utc>,
    ) -> TalentosResult<Convite> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM convites \
                 WHERE hash = $hash AND data_e_hora >= $limite",
            )
            .bind(("hash", hash.to_string()))
            .bind(("limite", issued_after))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ConviteRowWithId> = result.take(0).map_err(DbError::from)?;
        // A stale token and an unknown token both land here.
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "convite".into(),
            id: format!("hash={hash}"),
        })?;

        Ok(row.try_into_convite()?)
    }
}
