//! `spjt-client`: REST collaborator for the SPJT API.
//!
//! Each resource family is exposed as an `async` service trait so the
//! application layer can be driven by in-memory fakes in tests. [`ApiClient`]
//! implements every trait over HTTP.

pub mod auth;
pub mod documentos;
pub mod error;
pub mod expedientes;
pub mod http;
pub mod usuarios;

pub use auth::{AuthService, Credentials, LoginResponse};
pub use documentos::DocumentosService;
pub use error::{ClientError, ClientResult};
pub use expedientes::ExpedientesService;
pub use http::ApiClient;
pub use usuarios::{UsuarioPage, UsuariosService};
