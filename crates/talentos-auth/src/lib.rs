//! Talentos Auth — invitation lifecycle, credential handling and the
//! profile directory, built on the `talentos-core` repository traits so
//! this crate has no dependency on the database crate.

pub mod config;
pub mod error;
pub mod notifier;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use notifier::{ConviteEmail, ConviteNotifier, QueueNotifier, RecordingNotifier};
pub use password::verificar_senha;
pub use service::{
    CadastroService, ConviteInfo, ConviteService, LoginOutput, NovoCadastro, PerfilService,
};
pub use token::gerar_token;
