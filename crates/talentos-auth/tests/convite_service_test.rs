//! Integration tests for the invitation lifecycle service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use talentos_auth::config::AuthConfig;
use talentos_auth::notifier::RecordingNotifier;
use talentos_auth::service::{CadastroService, ConviteService, NovoCadastro};
use talentos_core::error::TalentosError;
use talentos_core::models::convite::TipoEnvio;
use talentos_db::repository::{
    SurrealColaboradorRepository, SurrealConviteRepository, SurrealPerfilRepository,
};

type Db = surrealdb::engine::local::Db;

/// Spin up in-memory DB, run migrations, seed the bootstrap perfis.
async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    talentos_db::run_migrations(&db).await.unwrap();
    talentos_db::seed_perfis(&db).await.unwrap();
    db
}

fn servico(
    db: &Surreal<Db>,
) -> (
    ConviteService<
        SurrealConviteRepository<Db>,
        SurrealColaboradorRepository<Db>,
        Arc<RecordingNotifier>,
    >,
    Arc<RecordingNotifier>,
) {
    let notifier = Arc::new(RecordingNotifier::new());
    let svc = ConviteService::new(
        SurrealConviteRepository::new(db.clone()),
        SurrealColaboradorRepository::new(db.clone()),
        notifier.clone(),
        AuthConfig::default(),
    );
    (svc, notifier)
}

fn cadastro(
    db: &Surreal<Db>,
) -> CadastroService<
    SurrealColaboradorRepository<Db>,
    SurrealPerfilRepository<Db>,
    SurrealConviteRepository<Db>,
> {
    CadastroService::new(
        SurrealColaboradorRepository::new(db.clone()),
        SurrealPerfilRepository::new(db.clone()),
        SurrealConviteRepository::new(db.clone()),
        AuthConfig::default(),
    )
}

fn novo_cadastro(email: &str, cpf: &str) -> NovoCadastro {
    NovoCadastro {
        nome: Some("Ana Souza".into()),
        id_perfil: Some(3),
        email: Some(email.into()),
        cpf: Some(cpf.into()),
        senha: Some("Password1!".into()),
        ..Default::default()
    }
}

/// The token is the last path segment of the emailed link.
fn token_do_link(link: &str) -> String {
    link.rsplit('/').next().unwrap().to_string()
}

/// Backdate every convite issued to this address.
async fn envelhecer(db: &Surreal<Db>, email: &str, horas: i64) {
    let quando = Utc::now() - Duration::hours(horas);
    db.query("UPDATE convites SET data_e_hora = $quando WHERE email = $email")
        .bind(("quando", quando))
        .bind(("email", email.to_string()))
        .await
        .unwrap()
        .check()
        .unwrap();
}

#[tokio::test]
async fn issue_persists_and_queues_the_mail() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    svc.issue(Some("ana@example.com")).await.unwrap();

    let enviados = notifier.sent();
    assert_eq!(enviados.len(), 1);
    assert_eq!(enviados[0].email, "ana@example.com");
    assert_eq!(enviados[0].tipo_envio, TipoEnvio::CriarPerfil);
    assert!(enviados[0].link.contains("/cadastro/"));

    // The emailed token resolves back to the invitation.
    let token = token_do_link(&enviados[0].link);
    let info = svc.lookup(&token).await.unwrap();
    assert_eq!(info.email, "ana@example.com");
}

#[tokio::test]
async fn issue_rejects_a_missing_or_malformed_email() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    let faltando = svc.issue(None).await.unwrap_err();
    assert!(matches!(faltando, TalentosError::Validation { .. }));

    let invalido = svc.issue(Some("not-an-email")).await.unwrap_err();
    assert!(matches!(invalido, TalentosError::Validation { .. }));

    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn issue_does_not_require_an_unregistered_address() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    cadastro(&db)
        .register(novo_cadastro("ana@example.com", "12345678900"))
        .await
        .unwrap();

    svc.issue(Some("ana@example.com")).await.unwrap();
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn issue_reset_requires_a_registered_address() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    let err = svc.issue_reset(Some("ninguem@example.com")).await.unwrap_err();
    assert!(matches!(err, TalentosError::NotFound { .. }));
    assert!(notifier.sent().is_empty());

    cadastro(&db)
        .register(novo_cadastro("ana@example.com", "12345678900"))
        .await
        .unwrap();

    svc.issue_reset(Some("ana@example.com")).await.unwrap();
    let enviados = notifier.sent();
    assert_eq!(enviados.len(), 1);
    assert_eq!(enviados[0].tipo_envio, TipoEnvio::RedefinirSenha);
    assert!(enviados[0].link.contains("/redefinir-senha/"));
}

#[tokio::test]
async fn lookup_of_an_unknown_token_is_not_found() {
    let db = setup().await;
    let (svc, _) = servico(&db);

    let err = svc.lookup("nope").await.unwrap_err();
    assert!(matches!(err, TalentosError::NotFound { .. }));
}

#[tokio::test]
async fn lookup_reports_expiry_distinctly_from_unknown() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    svc.issue(Some("ana@example.com")).await.unwrap();
    let token = token_do_link(&notifier.sent()[0].link);
    envelhecer(&db, "ana@example.com", 25).await;

    let err = svc.lookup(&token).await.unwrap_err();
    assert!(matches!(err, TalentosError::ConviteExpirado));
}

#[tokio::test]
async fn redeem_does_not_distinguish_stale_from_unknown() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    let desconhecido = svc.redeem("nope").await.unwrap_err();
    assert!(matches!(desconhecido, TalentosError::NotFound { .. }));

    svc.issue(Some("ana@example.com")).await.unwrap();
    let token = token_do_link(&notifier.sent()[0].link);
    envelhecer(&db, "ana@example.com", 25).await;

    let expirado = svc.redeem(&token).await.unwrap_err();
    assert!(matches!(expirado, TalentosError::NotFound { .. }));
}

#[tokio::test]
async fn a_valid_token_can_be_redeemed_more_than_once() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    svc.issue(Some("ana@example.com")).await.unwrap();
    let token = token_do_link(&notifier.sent()[0].link);

    assert_eq!(svc.redeem(&token).await.unwrap(), "ana@example.com");
    assert_eq!(svc.redeem(&token).await.unwrap(), "ana@example.com");
}

#[tokio::test]
async fn reissuing_never_revokes_an_earlier_token() {
    let db = setup().await;
    let (svc, notifier) = servico(&db);

    svc.issue(Some("ana@example.com")).await.unwrap();
    svc.issue(Some("ana@example.com")).await.unwrap();

    let enviados = notifier.sent();
    let primeiro = token_do_link(&enviados[0].link);
    let segundo = token_do_link(&enviados[1].link);
    assert_ne!(primeiro, segundo);
    assert!(svc.lookup(&primeiro).await.is_ok());
    assert!(svc.lookup(&segundo).await.is_ok());
}

#[tokio::test]
async fn an_empty_directory_is_not_found() {
    let db = setup().await;
    let (svc, _) = servico(&db);

    let err = svc.list_colaboradores().await.unwrap_err();
    assert!(matches!(err, TalentosError::NotFound { .. }));
}

#[tokio::test]
async fn the_directory_lists_registered_colaboradores() {
    let db = setup().await;
    let (svc, _) = servico(&db);

    cadastro(&db)
        .register(novo_cadastro("ana@example.com", "12345678900"))
        .await
        .unwrap();

    let todos = svc.list_colaboradores().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].nome, "Ana Souza");
}

#[tokio::test]
async fn full_invitation_to_login_flow() {
    let db = setup().await;
    let (convites, notifier) = servico(&db);
    let cadastros = cadastro(&db);

    convites.issue(Some("ana@example.com")).await.unwrap();
    let token = token_do_link(&notifier.sent()[0].link);

    // The front end looks the token up to prefill the email.
    let info = convites.lookup(&token).await.unwrap();

    cadastros
        .register(novo_cadastro(&info.email, "123.456.789-00"))
        .await
        .unwrap();

    let login = cadastros
        .authenticate(Some("12345678900"), Some("Password1!"))
        .await
        .unwrap();
    assert_eq!(login.nome, "Ana Souza");
    assert_eq!(login.id_perfil, 3);
}
