//! SurrealDB implementation of [`ColaboradorRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (server-side secret) can be
//! provided at construction time.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use talentos_core::error::TalentosResult;
use talentos_core::models::colaborador::{Colaborador, CreateColaborador};
use talentos_core::repository::ColaboradorRepository;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ColaboradorRow {
    nome: String,
    id_perfil: i64,
    email: String,
    cpf: String,
    celular: Option<String>,
    cep: Option<String>,
    uf: Option<String>,
    localidade: Option<String>,
    bairro: Option<String>,
    logradouro: Option<String>,
    senha: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ColaboradorRowWithId {
    record_id: String,
    nome: String,
    id_perfil: i64,
    email: String,
    cpf: String,
    celular: Option<String>,
    cep: Option<String>,
    uf: Option<String>,
    localidade: Option<String>,
    bairro: Option<String>,
    logradouro: Option<String>,
    senha: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ColaboradorRow {
    fn into_colaborador(self, id: Uuid) -> Colaborador {
        Colaborador {
            id,
            nome: self.nome,
            id_perfil: self.id_perfil,
            email: self.email,
            cpf: self.cpf,
            celular: self.celular,
            cep: self.cep,
            uf: self.uf,
            localidade: self.localidade,
            bairro: self.bairro,
            logradouro: self.logradouro,
            senha: self.senha,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl ColaboradorRowWithId {
    fn try_into_colaborador(self) -> Result<Colaborador, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Colaborador {
            id,
            nome: self.nome,
            id_perfil: self.id_perfil,
            email: self.email,
            cpf: self.cpf,
            celular: self.celular,
            cep: self.cep,
            uf: self.uf,
            localidade: self.localidade,
            bairro: self.bairro,
            logradouro: self.logradouro,
            senha: self.senha,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
fn hash_senha(senha: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Decode(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{senha}");
            peppered.as_bytes()
        }
        None => senha.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::Decode(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// SurrealDB implementation of the Colaborador repository.
#[derive(Clone)]
pub struct SurrealColaboradorRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealColaboradorRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }

    async fn count_where(&self, campo: &'static str, valor: &str) -> Result<u64, DbError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT count() AS total FROM colaborador \
                 WHERE {campo} = $valor GROUP ALL"
            ))
            .bind(("valor", valor.to_string()))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn get_where(&self, campo: &'static str, valor: &str) -> TalentosResult<Colaborador> {
        let mut result = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM colaborador \
                 WHERE {campo} = $valor"
            ))
            .bind(("valor", valor.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ColaboradorRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "colaborador".into(),
            id: format!("{campo}={valor}"),
        })?;

        Ok(row.try_into_colaborador()?)
    }
}

impl<C: Connection> ColaboradorRepository for SurrealColaboradorRepository<C> {
    async fn create(&self, input: CreateColaborador) -> TalentosResult<Colaborador> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let senha_hash = hash_senha(&input.senha, self.pepper.as_deref())?;

        let result = self
            .db
            .query(
                "CREATE type::record('colaborador', $id) SET \
                 nome = $nome, \
                 id_perfil = $id_perfil, \
                 email = $email, cpf = $cpf, \
                 celular = $celular, cep = $cep, uf = $uf, \
                 localidade = $localidade, bairro = $bairro, \
                 logradouro = $logradouro, \
                 senha = $senha",
            )
            .bind(("id", id_str.clone()))
            .bind(("nome", input.nome))
            .bind(("id_perfil", input.id_perfil))
            .bind(("email", input.email))
            .bind(("cpf", input.cpf))
            .bind(("celular", input.celular))
            .bind(("cep", input.cep))
            .bind(("uf", input.uf))
            .bind(("localidade", input.localidade))
            .bind(("bairro", input.bairro))
            .bind(("logradouro", input.logradouro))
            .bind(("senha", senha_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ColaboradorRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "colaborador".into(),
            id: id_str,
        })?;

        Ok(row.into_colaborador(id))
    }

    async fn get_by_cpf(&self, cpf: &str) -> TalentosResult<Colaborador> {
        self.get_where("cpf", cpf).await
    }

    async fn get_by_email(&self, email: &str) -> TalentosResult<Colaborador> {
        self.get_where("email", email).await
    }

    async fn exists_by_email(&self, email: &str) -> TalentosResult<bool> {
        Ok(self.count_where("email", email).await? > 0)
    }

    async fn exists_by_cpf(&self, cpf: &str) -> TalentosResult<bool> {
        Ok(self.count_where("cpf", cpf).await? > 0)
    }

    async fn update_senha(&self, email: &str, senha: &str) -> TalentosResult<()> {
        let atual = self.get_by_email(email).await?;
        let senha_hash = hash_senha(senha, self.pepper.as_deref())?;

        self.db
            .query(
                "UPDATE type::record('colaborador', $id) SET \
                 senha = $senha, updated_at = time::now()",
            )
            .bind(("id", atual.id.to_string()))
            .bind(("senha", senha_hash))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        Ok(())
    }

    async fn update_perfil(&self, cpf: &str, id_perfil: i64) -> TalentosResult<Colaborador> {
        let atual = self.get_by_cpf(cpf).await?;
        let id_str = atual.id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('colaborador', $id) SET \
                 id_perfil = $id_perfil, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("id_perfil", id_perfil))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<ColaboradorRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "colaborador".into(),
            id: id_str,
        })?;

        Ok(row.into_colaborador(atual.id))
    }

    async fn list(&self) -> TalentosResult<Vec<Colaborador>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM colaborador \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ColaboradorRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_colaborador())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
