//! Invitation lifecycle, credential and profile directory services.
//!
//! Generic over the repository traits so this layer has no dependency
//! on the database crate. Every public operation validates its input
//! before any mutation and returns errors from the core taxonomy only.

use chrono::{DateTime, Duration, Utc};
use talentos_core::error::{TalentosError, TalentosResult};
use talentos_core::models::colaborador::{Colaborador, CreateColaborador};
use talentos_core::models::convite::{CreateConvite, TipoEnvio};
use talentos_core::models::perfil::{CreatePerfil, Perfil};
use talentos_core::repository::{ColaboradorRepository, ConviteRepository, PerfilRepository};
use talentos_core::validate::{Validador, normalizar_celular, normalizar_cpf, normalizar_email};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::notifier::{ConviteEmail, ConviteNotifier};
use crate::password;
use crate::token;

/// Invitation metadata returned by token lookup.
///
/// The send-type is deliberately absent: this path exposes only the
/// target address and the issuance timestamp.
#[derive(Debug, Clone)]
pub struct ConviteInfo {
    pub email: String,
    pub data_e_hora: DateTime<Utc>,
}

/// Successful login result. Never carries the password hash.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub id_perfil: i64,
    pub nome: String,
}

/// Raw registration payload. Everything is optional so validation can
/// report missing fields instead of failing at deserialization.
#[derive(Debug, Clone, Default)]
pub struct NovoCadastro {
    pub nome: Option<String>,
    pub id_perfil: Option<i64>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub celular: Option<String>,
    pub cep: Option<String>,
    pub uf: Option<String>,
    pub localidade: Option<String>,
    pub bairro: Option<String>,
    pub logradouro: Option<String>,
    pub senha: Option<String>,
}

// ---------------------------------------------------------------------------
// Invitation lifecycle
// ---------------------------------------------------------------------------

/// Issues, looks up and redeems invitation tokens.
pub struct ConviteService<V, C, N>
where
    V: ConviteRepository,
    C: ColaboradorRepository,
    N: ConviteNotifier,
{
    convites: V,
    colaboradores: C,
    notifier: N,
    config: AuthConfig,
}

impl<V, C, N> ConviteService<V, C, N>
where
    V: ConviteRepository,
    C: ColaboradorRepository,
    N: ConviteNotifier,
{
    pub fn new(convites: V, colaboradores: C, notifier: N, config: AuthConfig) -> Self {
        Self {
            convites,
            colaboradores,
            notifier,
            config,
        }
    }

    /// Issue a registration invitation for `email`.
    ///
    /// The address does not have to be unregistered; the invitation is
    /// persisted and the email is queued without awaiting delivery.
    pub async fn issue(&self, email: Option<&str>) -> TalentosResult<()> {
        let email = self.validar_email(email)?;
        self.dispatch(email, TipoEnvio::CriarPerfil).await
    }

    /// Issue a password-reset invitation. Unlike [`issue`](Self::issue)
    /// this requires a registered colaborador with that address.
    pub async fn issue_reset(&self, email: Option<&str>) -> TalentosResult<()> {
        let email = self.validar_email(email)?;
        self.colaboradores
            .get_by_email(&email)
            .await
            .map_err(|e| match e {
                TalentosError::NotFound { .. } => TalentosError::not_found("email", &email),
                other => other,
            })?;
        self.dispatch(email, TipoEnvio::RedefinirSenha).await
    }

    /// Fetch invitation metadata by token.
    ///
    /// Expiry (issued more than the configured window ago) is reported
    /// distinctly from an unknown token.
    pub async fn lookup(&self, token: &str) -> TalentosResult<ConviteInfo> {
        let convite = self.convites.get_by_hash(token).await?;

        let validade = Duration::hours(self.config.validade_convite_horas);
        if Utc::now() - convite.data_e_hora > validade {
            return Err(AuthError::ConviteExpirado.into());
        }

        Ok(ConviteInfo {
            email: convite.email,
            data_e_hora: convite.data_e_hora,
        })
    }

    /// Redeem a token for the address it was issued to.
    ///
    /// The age filter runs at the data layer, so an expired token and an
    /// unknown token are both reported as NotFound here — callers of
    /// this path cannot tell the two apart.
    pub async fn redeem(&self, token: &str) -> TalentosResult<String> {
        let limite = Utc::now() - Duration::hours(self.config.validade_convite_horas);
        let convite = self.convites.get_valid_by_hash(token, limite).await?;
        Ok(convite.email)
    }

    /// All registered colaboradores, hashes stripped at serialization.
    /// Empty is an error by the conventions of this API.
    pub async fn list_colaboradores(&self) -> TalentosResult<Vec<Colaborador>> {
        let colaboradores = self.colaboradores.list().await?;
        if colaboradores.is_empty() {
            return Err(TalentosError::not_found("colaborador", "nenhum registro"));
        }
        Ok(colaboradores)
    }

    fn validar_email(&self, email: Option<&str>) -> TalentosResult<String> {
        let mut v = Validador::new();
        if v.required("email", email) {
            v.email("email", email.unwrap_or_default());
        }
        v.finish()?;
        Ok(normalizar_email(email.unwrap_or_default()))
    }

    async fn dispatch(&self, email: String, tipo_envio: TipoEnvio) -> TalentosResult<()> {
        let token = token::gerar_token();

        self.convites
            .create(CreateConvite {
                email: email.clone(),
                hash: token.clone(),
                tipo_envio,
            })
            .await?;

        let link = self.link_para(tipo_envio, &token);
        self.notifier.enviar(ConviteEmail {
            email,
            link,
            tipo_envio,
        });

        Ok(())
    }

    fn link_para(&self, tipo_envio: TipoEnvio, token: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match tipo_envio {
            TipoEnvio::CriarPerfil => format!("{base}/cadastro/{token}"),
            TipoEnvio::RedefinirSenha => format!("{base}/redefinir-senha/{token}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Registers colaboradores, authenticates by CPF + password, resets
/// passwords via redeemed invitations and reassigns profiles.
pub struct CadastroService<C, P, V>
where
    C: ColaboradorRepository,
    P: PerfilRepository,
    V: ConviteRepository,
{
    colaboradores: C,
    perfis: P,
    convites: V,
    config: AuthConfig,
}

impl<C, P, V> CadastroService<C, P, V>
where
    C: ColaboradorRepository,
    P: PerfilRepository,
    V: ConviteRepository,
{
    pub fn new(colaboradores: C, perfis: P, convites: V, config: AuthConfig) -> Self {
        Self {
            colaboradores,
            perfis,
            convites,
            config,
        }
    }

    /// Register a new colaborador.
    ///
    /// Every failing rule — format, profile existence, email/CPF
    /// uniqueness — lands in one aggregated validation error so the
    /// caller sees all problems at once. Nothing is written unless
    /// everything passes; the unique indexes on email and CPF remain
    /// the authoritative guard against concurrent duplicates.
    pub async fn register(&self, input: NovoCadastro) -> TalentosResult<Colaborador> {
        let mut v = Validador::new();

        if v.required("nome", input.nome.as_deref()) {
            v.max_len("nome", input.nome.as_deref().unwrap_or_default(), 100);
        }
        if input.id_perfil.is_none() {
            v.add("id_perfil", "O campo id_perfil é obrigatório");
        }
        let email_ok = v.required("email", input.email.as_deref());
        if email_ok {
            let email = input.email.as_deref().unwrap_or_default();
            v.email("email", email);
            v.max_len("email", email, 50);
        }
        let cpf_ok = v.required("cpf", input.cpf.as_deref());
        if cpf_ok {
            v.max_len("cpf", input.cpf.as_deref().unwrap_or_default(), 14);
        }
        if let Some(celular) = input.celular.as_deref() {
            v.max_len("celular", celular, 11);
        }
        if let Some(cep) = input.cep.as_deref() {
            v.max_len("cep", cep, 9);
        }
        if let Some(uf) = input.uf.as_deref() {
            v.max_len("uf", uf, 2);
        }
        if let Some(localidade) = input.localidade.as_deref() {
            v.max_len("localidade", localidade, 30);
        }
        if let Some(bairro) = input.bairro.as_deref() {
            v.max_len("bairro", bairro, 40);
        }
        if let Some(logradouro) = input.logradouro.as_deref() {
            v.max_len("logradouro", logradouro, 100);
        }
        if v.required("senha", input.senha.as_deref()) {
            v.senha("senha", input.senha.as_deref().unwrap_or_default());
        }

        // Existence and uniqueness checks join the same aggregate.
        if let Some(id_perfil) = input.id_perfil {
            match self.perfis.get_by_id(id_perfil).await {
                Ok(_) => {}
                Err(TalentosError::NotFound { .. }) => {
                    v.add("id_perfil", "O id_perfil informado não existe");
                }
                Err(e) => return Err(e),
            }
        }
        let email = normalizar_email(input.email.as_deref().unwrap_or_default());
        if email_ok && self.colaboradores.exists_by_email(&email).await? {
            v.add("email", "O email informado já está cadastrado");
        }
        let cpf = normalizar_cpf(input.cpf.as_deref().unwrap_or_default());
        if cpf_ok && self.colaboradores.exists_by_cpf(&cpf).await? {
            v.add("cpf", "O cpf informado já está cadastrado");
        }

        v.finish()?;

        self.colaboradores
            .create(CreateColaborador {
                nome: input.nome.unwrap_or_default(),
                id_perfil: input.id_perfil.unwrap_or_default(),
                email,
                cpf,
                celular: input.celular.as_deref().map(normalizar_celular),
                cep: input.cep,
                uf: input.uf,
                localidade: input.localidade,
                bairro: input.bairro,
                logradouro: input.logradouro,
                senha: input.senha.unwrap_or_default(),
            })
            .await
    }

    /// Authenticate by CPF and password.
    ///
    /// An unknown CPF and a wrong password produce the same error so a
    /// caller cannot probe which CPFs are registered. The password
    /// complexity policy is applied to the login payload as well — a
    /// documented quirk kept for compatibility.
    pub async fn authenticate(
        &self,
        cpf: Option<&str>,
        senha: Option<&str>,
    ) -> TalentosResult<LoginOutput> {
        let mut v = Validador::new();
        if v.required("cpf", cpf) {
            v.max_len("cpf", cpf.unwrap_or_default(), 14);
        }
        if v.required("senha", senha) {
            v.senha("senha", senha.unwrap_or_default());
        }
        v.finish()?;

        let cpf = normalizar_cpf(cpf.unwrap_or_default());
        let colaborador = match self.colaboradores.get_by_cpf(&cpf).await {
            Ok(c) => c,
            Err(TalentosError::NotFound { .. }) => {
                return Err(AuthError::CredenciaisInvalidas.into());
            }
            Err(e) => return Err(e),
        };

        let valido = password::verificar_senha(
            senha.unwrap_or_default(),
            &colaborador.senha,
            self.config.pepper.as_deref(),
        )?;
        if !valido {
            return Err(AuthError::CredenciaisInvalidas.into());
        }

        Ok(LoginOutput {
            id_perfil: colaborador.id_perfil,
            nome: colaborador.nome,
        })
    }

    /// Reset a password through a redeemed invitation token.
    ///
    /// The redemption uses the same data-layer age filter as
    /// [`ConviteService::redeem`], so NotFound covers both an unknown
    /// and an expired token. A redeemed invitation whose email no
    /// longer resolves to a colaborador is an internal error: it should
    /// not happen when reset invites are only issued for registered
    /// addresses, but it is handled defensively.
    pub async fn reset_password(
        &self,
        hash: Option<&str>,
        senha: Option<&str>,
    ) -> TalentosResult<()> {
        let mut v = Validador::new();
        v.required("hash", hash);
        if v.required("senha", senha) {
            v.senha("senha", senha.unwrap_or_default());
        }
        v.finish()?;

        let limite = Utc::now() - Duration::hours(self.config.validade_convite_horas);
        let convite = self
            .convites
            .get_valid_by_hash(hash.unwrap_or_default(), limite)
            .await?;

        if let Err(e) = self.colaboradores.get_by_email(&convite.email).await {
            return Err(match e {
                TalentosError::NotFound { .. } => TalentosError::Internal(format!(
                    "convite válido sem colaborador correspondente: {}",
                    convite.email
                )),
                other => other,
            });
        }

        self.colaboradores
            .update_senha(&convite.email, senha.unwrap_or_default())
            .await
    }

    /// Reassign the profile of the colaborador with this CPF.
    pub async fn assign_perfil(&self, cpf: &str, id_perfil: &str) -> TalentosResult<Colaborador> {
        let mut v = Validador::new();
        if v.required("cpf", Some(cpf)) {
            v.max_len("cpf", cpf, 14);
        }
        let parsed = match id_perfil.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                v.add("id_perfil", "O campo id_perfil deve ser um inteiro");
                None
            }
        };
        v.finish()?;

        let cpf = normalizar_cpf(cpf);
        self.colaboradores
            .update_perfil(&cpf, parsed.unwrap_or_default())
            .await
    }
}

// ---------------------------------------------------------------------------
// Profile directory
// ---------------------------------------------------------------------------

/// Read and create perfis. Perfis are immutable after creation.
pub struct PerfilService<P: PerfilRepository> {
    perfis: P,
}

impl<P: PerfilRepository> PerfilService<P> {
    pub fn new(perfis: P) -> Self {
        Self { perfis }
    }

    /// All perfis in creation order. An empty directory is reported as
    /// NotFound — the convention of the API this system replaces.
    pub async fn list(&self) -> TalentosResult<Vec<Perfil>> {
        let perfis = self.perfis.list().await?;
        if perfis.is_empty() {
            return Err(TalentosError::not_found("perfil", "nenhum registro"));
        }
        Ok(perfis)
    }

    /// Create a new perfil dated today.
    pub async fn create(
        &self,
        perfil: Option<&str>,
        status: Option<&str>,
    ) -> TalentosResult<Perfil> {
        let mut v = Validador::new();
        if v.required("perfil", perfil) {
            v.max_len("perfil", perfil.unwrap_or_default(), 50);
        }
        if v.required("status", status) {
            v.exact_len("status", status.unwrap_or_default(), 1);
        }
        v.finish()?;

        self.perfis
            .create(CreatePerfil {
                perfil: perfil.unwrap_or_default().to_string(),
                status: status.unwrap_or_default().to_string(),
            })
            .await
    }
}
