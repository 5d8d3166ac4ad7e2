//! Concrete service wiring over the SurrealDB repositories.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;
use talentos_auth::{AuthConfig, CadastroService, ConviteService, PerfilService, QueueNotifier};
use talentos_db::repository::{
    SurrealColaboradorRepository, SurrealConviteRepository, SurrealPerfilRepository,
};

type Colaboradores = SurrealColaboradorRepository<Client>;
type Perfis = SurrealPerfilRepository<Client>;
type Convites = SurrealConviteRepository<Client>;

/// Every service the handlers reach for, shared via `Extension<Arc<_>>`.
pub struct AppServices {
    pub convites: ConviteService<Convites, Colaboradores, QueueNotifier>,
    pub cadastros: CadastroService<Colaboradores, Perfis, Convites>,
    pub perfis: PerfilService<Perfis>,
}

/// Wire the services against one database connection.
///
/// Spawns the invitation mail worker; the same pepper drives hashing in
/// the repository and verification in the login path.
pub fn build_services(db: Surreal<Client>, config: AuthConfig) -> AppServices {
    let colaboradores = match &config.pepper {
        Some(pepper) => SurrealColaboradorRepository::with_pepper(db.clone(), pepper.clone()),
        None => SurrealColaboradorRepository::new(db.clone()),
    };
    let perfis = SurrealPerfilRepository::new(db.clone());
    let convites = SurrealConviteRepository::new(db.clone());

    AppServices {
        convites: ConviteService::new(
            convites.clone(),
            colaboradores.clone(),
            QueueNotifier::spawn(),
            config.clone(),
        ),
        cadastros: CadastroService::new(
            colaboradores,
            perfis.clone(),
            convites,
            config,
        ),
        perfis: PerfilService::new(perfis),
    }
}
