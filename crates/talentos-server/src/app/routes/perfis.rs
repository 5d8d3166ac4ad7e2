//! Perfil directory endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::Response,
    routing::{get, patch, post},
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
        .route("/editar/:cpf/:id_perfil", patch(editar))
}

/// GET /perfis — every perfil, in creation order.
pub async fn listar(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.perfis.list().await {
        Ok(perfis) => Resposta::sucesso(
            StatusCode::OK,
            "Perfis retornados com sucesso",
            Some(json!(perfis)),
        ),
        Err(TalentosError::NotFound { .. }) => {
            Resposta::falha(StatusCode::NOT_FOUND, "Nenhum perfil encontrado", None)
        }
        Err(e) => envelope::erro(e),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CriarPerfilRequest {
    perfil: Option<String>,
    status: Option<String>,
}

/// POST /perfis/criar — create a perfil.
pub async fn criar(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<CriarPerfilRequest>>,
) -> Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    match services
        .perfis
        .create(body.perfil.as_deref(), body.status.as_deref())
        .await
    {
        Ok(perfil) => Resposta::sucesso(
            StatusCode::CREATED,
            "Perfil cadastrado com sucesso",
            Some(json!(perfil)),
        ),
        Err(e) => envelope::erro(e),
    }
}

/// PATCH /perfis/editar/{cpf}/{id_perfil} — reassign a colaborador's
/// perfil.
pub async fn editar(
    Extension(services): Extension<Arc<AppServices>>,
    Path((cpf, id_perfil)): Path<(String, String)>,
) -> Response {
    match services.cadastros.assign_perfil(&cpf, &id_perfil).await {
        Ok(_) => Resposta::sucesso(
            StatusCode::OK,
            "Perfil atualizado com sucesso",
            Some(json!(true)),
        ),
        Err(TalentosError::NotFound { .. }) => {
            Resposta::falha(StatusCode::NOT_FOUND, "Perfil não encontrado", None)
        }
        Err(e) => envelope::erro(e),
    }
}
