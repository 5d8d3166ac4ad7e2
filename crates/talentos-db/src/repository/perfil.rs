//! SurrealDB implementation of [`PerfilRepository`].
//!
//! Perfis use small sequential integer record ids so the public API can
//! keep referring to them as plain integers. The next id is derived
//! from the current row count; perfis are never deleted, which keeps
//! that scheme collision-free.

use chrono::NaiveDate;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use talentos_core::error::TalentosResult;
use talentos_core::models::perfil::{CreatePerfil, Perfil};
use talentos_core::repository::PerfilRepository;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PerfilRow {
    perfil: String,
    status: String,
    data: String,
}

#[derive(Debug, SurrealValue)]
struct PerfilRowWithId {
    record_id: i64,
    perfil: String,
    status: String,
    data: String,
}

fn parse_data(data: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(data, "%Y-%m-%d")
        .map_err(|e| DbError::Decode(format!("invalid perfil date '{data}': {e}")))
}

impl PerfilRow {
    fn into_perfil(self, id: i64) -> Result<Perfil, DbError> {
        Ok(Perfil {
            id,
            perfil: self.perfil,
            status: self.status,
            data: parse_data(&self.data)?,
        })
    }
}

impl PerfilRowWithId {
    fn try_into_perfil(self) -> Result<Perfil, DbError> {
        Ok(Perfil {
            id: self.record_id,
            perfil: self.perfil,
            status: self.status,
            data: parse_data(&self.data)?,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Perfil repository.
#[derive(Clone)]
pub struct SurrealPerfilRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPerfilRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PerfilRepository for SurrealPerfilRepository<C> {
    async fn create(&self, input: CreatePerfil) -> TalentosResult<Perfil> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM perfis GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let id = count_rows.first().map(|r| r.total).unwrap_or(0) as i64 + 1;

        let hoje = chrono::Utc::now().date_naive();

        let result = self
            .db
            .query(
                "CREATE type::record('perfis', $id) SET \
                 perfil = $perfil, status = $status, data = $data",
            )
            .bind(("id", id))
            .bind(("perfil", input.perfil))
            .bind(("status", input.status))
            .bind(("data", hoje.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<PerfilRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "perfil".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_perfil(id)?)
    }

    async fn get_by_id(&self, id: i64) -> TalentosResult<Perfil> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('perfis', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PerfilRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "perfil".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_perfil(id)?)
    }

    async fn list(&self) -> TalentosResult<Vec<Perfil>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM perfis \
                 ORDER BY record_id ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PerfilRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_perfil())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
