//! Talentos Server — application entry point.

use std::sync::Arc;

use talentos_server::app;
use talentos_server::config::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("talentos=info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env();

    let manager = match talentos_db::DbManager::connect(&config.db).await {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(erro = %e, "Falha ao conectar ao banco");
            std::process::exit(1);
        }
    };
    let db = manager.client().clone();

    if let Err(e) = talentos_db::run_migrations(&db).await {
        tracing::error!(erro = %e, "Falha ao aplicar migrações");
        std::process::exit(1);
    }
    if let Err(e) = talentos_db::seed_perfis(&db).await {
        tracing::error!(erro = %e, "Falha ao semear perfis");
        std::process::exit(1);
    }

    let services = Arc::new(app::services::build_services(db, config.auth.clone()));
    let router = app::build_app(services);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(endereco = %config.bind_addr, erro = %e, "Falha ao abrir o listener");
            std::process::exit(1);
        }
    };

    tracing::info!(endereco = %config.bind_addr, "Servidor iniciado");

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!(erro = %e, "Servidor encerrado com erro");
        std::process::exit(1);
    }
}
