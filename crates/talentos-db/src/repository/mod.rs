//! SurrealDB repository implementations.

mod colaborador;
mod convite;
mod perfil;

pub use colaborador::SurrealColaboradorRepository;
pub use convite::SurrealConviteRepository;
pub use perfil::SurrealPerfilRepository;
