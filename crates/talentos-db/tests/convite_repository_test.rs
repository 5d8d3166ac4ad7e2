//! Integration tests for the Convite repository implementation using
//! in-memory SurrealDB.

use chrono::{Duration, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use talentos_core::error::TalentosError;
use talentos_core::models::convite::{CreateConvite, TipoEnvio};
use talentos_core::repository::ConviteRepository;
use talentos_db::repository::SurrealConviteRepository;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    talentos_db::run_migrations(&db).await.unwrap();
    db
}

fn novo_convite(hash: &str, tipo_envio: TipoEnvio) -> CreateConvite {
    CreateConvite {
        email: "ana@example.com".into(),
        hash: hash.into(),
        tipo_envio,
    }
}

/// Backdate a convite so age-sensitive paths can be exercised.
async fn envelhecer(db: &Surreal<surrealdb::engine::local::Db>, hash: &str, horas: i64) {
    let quando = Utc::now() - Duration::hours(horas);
    db.query("UPDATE convites SET data_e_hora = $quando WHERE hash = $hash")
        .bind(("quando", quando))
        .bind(("hash", hash.to_string()))
        .await
        .unwrap()
        .check()
        .unwrap();
}

#[tokio::test]
async fn create_assigns_the_issuance_timestamp() {
    let db = setup().await;
    let repo = SurrealConviteRepository::new(db);

    let antes = Utc::now();
    let convite = repo
        .create(novo_convite("token-abc", TipoEnvio::CriarPerfil))
        .await
        .unwrap();

    assert_eq!(convite.email, "ana@example.com");
    assert_eq!(convite.tipo_envio, TipoEnvio::CriarPerfil);
    assert!(convite.data_e_hora >= antes - Duration::seconds(1));
    assert!(convite.data_e_hora <= Utc::now() + Duration::seconds(1));
}

#[tokio::test]
async fn tipo_envio_roundtrips() {
    let db = setup().await;
    let repo = SurrealConviteRepository::new(db);

    repo.create(novo_convite("token-reset", TipoEnvio::RedefinirSenha))
        .await
        .unwrap();

    let relido = repo.get_by_hash("token-reset").await.unwrap();
    assert_eq!(relido.tipo_envio, TipoEnvio::RedefinirSenha);
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let db = setup().await;
    let repo = SurrealConviteRepository::new(db);

    let err = repo.get_by_hash("nope").await.unwrap_err();
    assert!(matches!(err, TalentosError::NotFound { .. }));
}

#[tokio::test]
async fn get_valid_by_hash_accepts_a_fresh_token() {
    let db = setup().await;
    let repo = SurrealConviteRepository::new(db.clone());

    repo.create(novo_convite("token-fresco", TipoEnvio::CriarPerfil))
        .await
        .unwrap();

    let limite = Utc::now() - Duration::hours(24);
    let convite = repo.get_valid_by_hash("token-fresco", limite).await.unwrap();
    assert_eq!(convite.hash, "token-fresco");
}

#[tokio::test]
async fn get_valid_by_hash_filters_out_a_stale_token() {
    let db = setup().await;
    let repo = SurrealConviteRepository::new(db.clone());

    repo.create(novo_convite("token-velho", TipoEnvio::CriarPerfil))
        .await
        .unwrap();
    envelhecer(&db, "token-velho", 25).await;

    let limite = Utc::now() - Duration::hours(24);
    let err = repo
        .get_valid_by_hash("token-velho", limite)
        .await
        .unwrap_err();
    assert!(matches!(err, TalentosError::NotFound { .. }));

    // The unfiltered lookup still sees it.
    let relido = repo.get_by_hash("token-velho").await.unwrap();
    assert_eq!(relido.hash, "token-velho");
}

#[tokio::test]
async fn a_token_just_inside_the_window_is_still_valid() {
    let db = setup().await;
    let repo = SurrealConviteRepository::new(db.clone());

    repo.create(novo_convite("token-limite", TipoEnvio::RedefinirSenha))
        .await
        .unwrap();
    envelhecer(&db, "token-limite", 23).await;

    let limite = Utc::now() - Duration::hours(24);
    assert!(repo.get_valid_by_hash("token-limite", limite).await.is_ok());
}

#[tokio::test]
async fn reissued_tokens_coexist_for_the_same_email() {
    let db = setup().await;
    let repo = SurrealConviteRepository::new(db);

    repo.create(novo_convite("token-um", TipoEnvio::CriarPerfil))
        .await
        .unwrap();
    repo.create(novo_convite("token-dois", TipoEnvio::CriarPerfil))
        .await
        .unwrap();

    // Both remain retrievable; issuing again never revokes.
    assert!(repo.get_by_hash("token-um").await.is_ok());
    assert!(repo.get_by_hash("token-dois").await.is_ok());
}
