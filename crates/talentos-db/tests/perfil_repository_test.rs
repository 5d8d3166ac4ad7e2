//! Integration tests for the Perfil repository and the bootstrap seed
//! using in-memory SurrealDB.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use talentos_core::error::TalentosError;
use talentos_core::models::perfil::CreatePerfil;
use talentos_core::repository::PerfilRepository;
use talentos_db::repository::SurrealPerfilRepository;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    talentos_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn seed_creates_the_three_bootstrap_perfis() {
    let db = setup().await;
    talentos_db::seed_perfis(&db).await.unwrap();

    let repo = SurrealPerfilRepository::new(db);
    let perfis = repo.list().await.unwrap();

    assert_eq!(perfis.len(), 3);
    assert_eq!(perfis[0].id, 1);
    assert_eq!(perfis[0].perfil, "Administrador");
    assert_eq!(perfis[1].id, 2);
    assert_eq!(perfis[1].perfil, "Gente e Cultura");
    assert_eq!(perfis[2].id, 3);
    assert_eq!(perfis[2].perfil, "Colaborador Comum");
    assert!(perfis.iter().all(|p| p.status == "A"));
}

#[tokio::test]
async fn seed_is_idempotent() {
    let db = setup().await;
    talentos_db::seed_perfis(&db).await.unwrap();
    talentos_db::seed_perfis(&db).await.unwrap();

    let repo = SurrealPerfilRepository::new(db);
    assert_eq!(repo.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn create_continues_the_id_sequence() {
    let db = setup().await;
    talentos_db::seed_perfis(&db).await.unwrap();

    let repo = SurrealPerfilRepository::new(db);
    let criado = repo
        .create(CreatePerfil {
            perfil: "Estagiário".into(),
            status: "A".into(),
        })
        .await
        .unwrap();

    assert_eq!(criado.id, 4);
    assert_eq!(criado.perfil, "Estagiário");
    assert_eq!(criado.data, Utc::now().date_naive());
}

#[tokio::test]
async fn create_on_an_empty_table_starts_at_one() {
    let db = setup().await;
    let repo = SurrealPerfilRepository::new(db);

    let criado = repo
        .create(CreatePerfil {
            perfil: "Administrador".into(),
            status: "A".into(),
        })
        .await
        .unwrap();
    assert_eq!(criado.id, 1);
}

#[tokio::test]
async fn get_by_id_roundtrips() {
    let db = setup().await;
    talentos_db::seed_perfis(&db).await.unwrap();

    let repo = SurrealPerfilRepository::new(db);
    let perfil = repo.get_by_id(2).await.unwrap();
    assert_eq!(perfil.perfil, "Gente e Cultura");
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let db = setup().await;
    let repo = SurrealPerfilRepository::new(db);

    let err = repo.get_by_id(99).await.unwrap_err();
    assert!(matches!(err, TalentosError::NotFound { .. }));
}

#[tokio::test]
async fn list_on_an_empty_table_is_empty() {
    let db = setup().await;
    let repo = SurrealPerfilRepository::new(db);
    assert!(repo.list().await.unwrap().is_empty());
}
