//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings; perfis use small integer record ids.
//! Email and CPF uniqueness is enforced by unique indexes so concurrent
//! registrations cannot race past the service-level existence checks.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Colaboradores (registered people with credentials)
-- =======================================================================
DEFINE TABLE colaborador SCHEMAFULL;
DEFINE FIELD nome ON TABLE colaborador TYPE string;
DEFINE FIELD id_perfil ON TABLE colaborador TYPE int;
DEFINE FIELD email ON TABLE colaborador TYPE string;
DEFINE FIELD cpf ON TABLE colaborador TYPE string;
DEFINE FIELD celular ON TABLE colaborador TYPE option<string>;
DEFINE FIELD cep ON TABLE colaborador TYPE option<string>;
DEFINE FIELD uf ON TABLE colaborador TYPE option<string>;
DEFINE FIELD localidade ON TABLE colaborador TYPE option<string>;
DEFINE FIELD bairro ON TABLE colaborador TYPE option<string>;
DEFINE FIELD logradouro ON TABLE colaborador TYPE option<string>;
DEFINE FIELD senha ON TABLE colaborador TYPE string;
DEFINE FIELD created_at ON TABLE colaborador TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE colaborador TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_colaborador_email ON TABLE colaborador \
    COLUMNS email UNIQUE;
DEFINE INDEX idx_colaborador_cpf ON TABLE colaborador \
    COLUMNS cpf UNIQUE;

-- =======================================================================
-- Perfis (roles; integer record ids, immutable after creation)
-- =======================================================================
DEFINE TABLE perfis SCHEMAFULL;
DEFINE FIELD perfil ON TABLE perfis TYPE string;
DEFINE FIELD status ON TABLE perfis TYPE string;
DEFINE FIELD data ON TABLE perfis TYPE string;
DEFINE FIELD created_at ON TABLE perfis TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Convites (invitation tokens; hash is deliberately NOT unique-indexed,
-- matching the observed behavior of the system this replaces)
-- =======================================================================
DEFINE TABLE convites SCHEMAFULL;
DEFINE FIELD email ON TABLE convites TYPE string;
DEFINE FIELD hash ON TABLE convites TYPE string;
DEFINE FIELD tipo_envio ON TABLE convites TYPE int \
    ASSERT $value IN [1, 2];
DEFINE FIELD data_e_hora ON TABLE convites TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_convites_hash ON TABLE convites COLUMNS hash;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Seed the three bootstrap perfis (Administrador, Gente e Cultura,
/// Colaborador Comum) with ids 1..3 if the table is empty.
///
/// Kept separate from the migration runner so tests can opt out of the
/// seed data, mirroring how the system this replaces seeded its roles.
pub async fn seed_perfis<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    let mut result = db
        .query("SELECT count() AS total FROM perfis GROUP ALL")
        .await?;
    let rows: Vec<CountRow> = result.take(0)?;
    if rows.first().map(|r| r.total).unwrap_or(0) > 0 {
        return Ok(());
    }

    let hoje = chrono::Utc::now().date_naive().to_string();
    let nomes = ["Administrador", "Gente e Cultura", "Colaborador Comum"];
    for (i, nome) in nomes.iter().enumerate() {
        db.query(
            "CREATE type::record('perfis', $id) SET \
             perfil = $perfil, status = 'A', data = $data",
        )
        .bind(("id", (i + 1) as i64))
        .bind(("perfil", nome.to_string()))
        .bind(("data", hoje.clone()))
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("Failed to seed perfil '{nome}': {e}")))?;
    }

    info!("Seeded bootstrap perfis");
    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
