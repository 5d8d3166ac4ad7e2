//! Environment-driven server configuration.

use talentos_auth::AuthConfig;
use talentos_db::DbConfig;
use tracing::warn;

/// Full server configuration, assembled from `TALENTOS_*` environment
/// variables with development defaults.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let validade_convite_horas = std::env::var("TALENTOS_VALIDADE_CONVITE_HORAS")
            .ok()
            .and_then(|v| match v.parse::<i64>() {
                Ok(h) if h > 0 => Some(h),
                _ => {
                    warn!(valor = %v, "TALENTOS_VALIDADE_CONVITE_HORAS inválido, usando 24");
                    None
                }
            })
            .unwrap_or(24);

        let auth = AuthConfig {
            validade_convite_horas,
            base_url: var_or("TALENTOS_BASE_URL", "http://localhost:3000"),
            pepper: std::env::var("TALENTOS_PEPPER").ok(),
        };

        Self {
            bind_addr: var_or("TALENTOS_BIND_ADDR", "0.0.0.0:8080"),
            db: DbConfig::from_env(),
            auth,
        }
    }
}
