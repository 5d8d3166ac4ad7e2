//! Login and password reset endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::Response,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use talentos_core::error::TalentosError;

use crate::app::envelope::{self, Resposta};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(entrar))
        .route("/redefinir", post(redefinir))
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    cpf: Option<String>,
    senha: Option<String>,
}

/// POST /login — authenticate by CPF and password.
pub async fn entrar(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<LoginRequest>>,
) -> Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    match services
        .cadastros
        .authenticate(body.cpf.as_deref(), body.senha.as_deref())
        .await
    {
        Ok(login) => Resposta::sucesso(
            StatusCode::OK,
            "Login bem-sucedido.",
            Some(json!({
                "id_perfil": login.id_perfil,
                "nome": login.nome,
            })),
        ),
        Err(e) => envelope::erro(e),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RedefinirRequest {
    hash: Option<String>,
    senha: Option<String>,
}

/// POST /login/redefinir — set a new password through an emailed
/// invitation token.
pub async fn redefinir(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<RedefinirRequest>>,
) -> Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    match services
        .cadastros
        .reset_password(body.hash.as_deref(), body.senha.as_deref())
        .await
    {
        Ok(()) => Resposta::sucesso(StatusCode::OK, "Senha atualizada com sucesso.", None),
        Err(TalentosError::NotFound { .. }) => Resposta::falha(
            StatusCode::NOT_FOUND,
            "Convite não encontrado ou expirado.",
            None,
        ),
        Err(e) => envelope::erro(e),
    }
}
