//! Registration endpoints.

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
use talentos_auth::NovoCadastro;
use talentos_core::error::TalentosError;

use crate::app::envelope::{self, Resposta};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(cadastrar))
        .route("/buscar/:token", get(buscar))
}

#[derive(Debug, Default, Deserialize)]
pub struct CadastroRequest {
    nome: Option<String>,
    id_perfil: Option<i64>,
    email: Option<String>,
    cpf: Option<String>,
    celular: Option<String>,
    cep: Option<String>,
    uf: Option<String>,
    localidade: Option<String>,
    bairro: Option<String>,
    logradouro: Option<String>,
    senha: Option<String>,
}

impl From<CadastroRequest> for NovoCadastro {
    fn from(body: CadastroRequest) -> Self {
        NovoCadastro {
            nome: body.nome,
            id_perfil: body.id_perfil,
            email: body.email,
            cpf: body.cpf,
            celular: body.celular,
            cep: body.cep,
            uf: body.uf,
            localidade: body.localidade,
            bairro: body.bairro,
            logradouro: body.logradouro,
            senha: body.senha,
        }
    }
}

/// POST /cadastrar — register a new colaborador.
///
/// A missing or malformed body is treated as an empty payload so the
/// caller gets the per-field validation map instead of a framework
/// rejection.
pub async fn cadastrar(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<CadastroRequest>>,
) -> Response {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    match services.cadastros.register(body.into()).await {
        Ok(_) => Resposta::sucesso(
            StatusCode::CREATED,
            "Colaborador cadastrado com sucesso.",
            None,
        ),
        Err(e) => envelope::erro(e),
    }
}

/// GET /cadastrar/buscar/{token} — resolve an invitation token to the
/// invited address, for prefilling the registration form.
pub async fn buscar(
    Extension(services): Extension<Arc<AppServices>>,
    Path(token): Path<String>,
) -> Response {
    match services.convites.lookup(&token).await {
        Ok(info) => Resposta::sucesso(
            StatusCode::OK,
            "Convite encontrado com sucesso.",
            Some(json!({
                "email": info.email,
                "data_e_hora": info.data_e_hora.format("%Y-%m-%d %H:%M:%S").to_string(),
            })),
        ),
        Err(TalentosError::NotFound { .. }) => {
            Resposta::falha(StatusCode::NOT_FOUND, "Convite não encontrado", None)
        }
        Err(e) => envelope::erro(e),
    }
}
