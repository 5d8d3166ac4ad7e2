//! The JSON response envelope and the error → status boundary adapter.
//!
//! Every endpoint answers with the same body shape:
//! `{status, success, msg, object?, date?}` — `status` repeats the HTTP
//! status code, `msg` is the user-facing Portuguese message, `object`
//! carries the payload (or the per-field validation map) and `date` is
//! the server timestamp in `YYYY-MM-DD HH:MM:SS`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use talentos_core::error::TalentosError;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct Resposta {
    pub status: u16,
    pub success: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

fn agora() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl Resposta {
    pub fn sucesso(status: StatusCode, msg: impl Into<String>, object: Option<Value>) -> Response {
        let body = Resposta {
            status: status.as_u16(),
            success: true,
            msg: msg.into(),
            object,
            date: Some(agora()),
        };
        (status, Json(body)).into_response()
    }

    pub fn falha(status: StatusCode, msg: impl Into<String>, object: Option<Value>) -> Response {
        let body = Resposta {
            status: status.as_u16(),
            success: false,
            msg: msg.into(),
            object,
            date: Some(agora()),
        };
        (status, Json(body)).into_response()
    }
}

/// Generic boundary adapter from the core error taxonomy to HTTP.
///
/// Handlers that need a route-specific 404 message match NotFound
/// themselves and fall back here for everything else.
pub fn erro(err: TalentosError) -> Response {
    match err {
        TalentosError::Validation { errors } => Resposta::falha(
            StatusCode::BAD_REQUEST,
            "Erro de validação.",
            Some(json!(errors)),
        ),
        e @ TalentosError::NotFound { .. } => {
            Resposta::falha(StatusCode::NOT_FOUND, e.to_string(), None)
        }
        e @ TalentosError::CredenciaisInvalidas => {
            Resposta::falha(StatusCode::UNAUTHORIZED, e.to_string(), None)
        }
        e @ TalentosError::ConviteExpirado => {
            Resposta::falha(StatusCode::BAD_REQUEST, e.to_string(), None)
        }
        TalentosError::Database(msg) | TalentosError::Internal(msg) => {
            error!(causa = %msg, "Erro interno ao atender requisição");
            Resposta::falha(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erro interno no servidor: {msg}"),
                None,
            )
        }
    }
}
