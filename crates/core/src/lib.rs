//! `spjt-core`: shared building blocks for the SPJT client.
//!
//! This crate contains **pure** primitives (no HTTP, no session state).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, replace_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{ActuacionId, DocumentoId, ExpedienteId, InstitucionId, UsuarioId};
