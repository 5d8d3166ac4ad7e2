use axum::Router;

pub mod cadastro;
pub mod convite;
pub mod login;
pub mod perfis;

/// Router for the whole public API.
pub fn router() -> Router {
    Router::new()
        .nest("/cadastrar", cadastro::router())
        .nest("/login", login::router())
        .nest("/perfis", perfis::router())
        .nest("/convite", convite::router())
}
