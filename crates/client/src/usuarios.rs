use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use spjt_auth::{EstadoUsuario, NuevoUsuario, User, UsuarioFilter, UsuarioUpdate};
use spjt_core::UsuarioId;

use crate::{ApiClient, ClientResult};

/// One page of `GET /usuarios`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsuarioPage {
    pub data: Vec<User>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

/// User administration endpoints.
#[async_trait]
pub trait UsuariosService: Send + Sync {
    async fn list(&self, filter: &UsuarioFilter) -> ClientResult<UsuarioPage>;
    async fn create(&self, usuario: &NuevoUsuario) -> ClientResult<User>;
    async fn update(&self, id: &UsuarioId, update: &UsuarioUpdate) -> ClientResult<User>;
    async fn set_estado(&self, id: &UsuarioId, estado: EstadoUsuario) -> ClientResult<User>;
}

#[async_trait]
impl UsuariosService for ApiClient {
    async fn list(&self, filter: &UsuarioFilter) -> ClientResult<UsuarioPage> {
        let req = self
            .request(Method::GET, "/usuarios")
            .query(&filter.to_query());
        self.send_json(req).await
    }

    async fn create(&self, usuario: &NuevoUsuario) -> ClientResult<User> {
        let req = self.request(Method::POST, "/usuarios").json(usuario);
        self.send_json(req).await
    }

    async fn update(&self, id: &UsuarioId, update: &UsuarioUpdate) -> ClientResult<User> {
        let req = self
            .request(Method::PUT, &format!("/usuarios/{id}"))
            .json(update);
        self.send_json(req).await
    }

    async fn set_estado(&self, id: &UsuarioId, estado: EstadoUsuario) -> ClientResult<User> {
        let req = self
            .request(Method::PATCH, &format!("/usuarios/{id}/estado"))
            .json(&serde_json::json!({ "estado": estado }));
        self.send_json(req).await
    }
}
