//! Authentication and invitation configuration.

/// Configuration shared by the invitation and credential services.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Invitation validity window in hours (default: 24).
    pub validade_convite_horas: i64,
    /// Base URL embedded in invitation emails; the token is appended
    /// to the send-type-specific path.
    pub base_url: String,
    /// Optional pepper prepended to passwords before Argon2id
    /// verification. Must match the pepper used when hashing.
    pub pepper: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            validade_convite_horas: 24,
            base_url: "http://localhost:3000".into(),
            pepper: None,
        }
    }
}
