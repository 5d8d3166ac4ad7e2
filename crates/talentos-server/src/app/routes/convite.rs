//! Invitation endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use talentos_core::error::TalentosError;

use crate::app::envelope::{self, Resposta};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(listar))
        .route("/criar", post(criar))
        .route("/redefinir/:email", get(redefinir))
}

#[derive(Debug, Default, Deserialize)]
pub struct CriarConviteRequest {
    email: Option<String>,
}

/// POST /convite/criar — issue a registration invitation.
pub async fn criar(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<CriarConviteRequest>>,
) -> Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    match services.convites.issue(body.email.as_deref()).await {
        Ok(()) => Resposta::sucesso(StatusCode::CREATED, "Convite enviado com sucesso", None),
        Err(e) => envelope::erro(e),
    }
}

/// GET /convite/redefinir/{email} — issue a password-reset invitation
/// for a registered address.
pub async fn redefinir(
    Extension(services): Extension<Arc<AppServices>>,
    Path(email): Path<String>,
) -> Response {
    match services.convites.issue_reset(Some(&email)).await {
        Ok(()) => Resposta::sucesso(StatusCode::CREATED, "Convite enviado com sucesso", None),
        Err(TalentosError::NotFound { .. }) => {
            Resposta::falha(StatusCode::NOT_FOUND, "Email não encontrado", None)
        }
        Err(e) => envelope::erro(e),
    }
}

/// GET /convite — the colaborador directory, password hashes omitted.
///
/// The resource name is historical: the listing the front end renders
/// under "convites" is the registered colaboradores.
pub async fn listar(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.convites.list_colaboradores().await {
        Ok(colaboradores) => Resposta::sucesso(
            StatusCode::OK,
            "Convites retornados com sucesso",
            Some(json!(colaboradores)),
        ),
        Err(TalentosError::NotFound { .. }) => {
            Resposta::falha(StatusCode::NOT_FOUND, "Nenhum convite encontrado", None)
        }
        Err(e) => envelope::erro(e),
    }
}
