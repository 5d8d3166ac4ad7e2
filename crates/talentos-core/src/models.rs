//! Domain models for Talentos.
//!
//! Field names mirror the public API payloads (`nome`, `cpf`, `senha`,
//! `id_perfil`, ...), so the structs serialize straight onto the wire.

pub mod colaborador;
pub mod convite;
pub mod perfil;
