//! Talentos Server — HTTP surface for registration, login, invitations
//! and the perfil directory.

pub mod app;
pub mod config;
