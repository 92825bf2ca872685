use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use spjt_auth::{NuevoUsuario, User};

use crate::{ApiClient, ClientResult};

/// Login form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login/refresh: a bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Authentication endpoints.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse>;

    /// Identity check for the stored token.
    async fn current_user(&self) -> ClientResult<User>;

    async fn refresh(&self) -> ClientResult<LoginResponse>;

    async fn logout(&self) -> ClientResult<()>;

    async fn recover_password(&self, email: &str) -> ClientResult<()>;

    /// Self-service account request from the unauthenticated flow.
    async fn register(&self, usuario: &NuevoUsuario) -> ClientResult<User>;

    /// Whether a bearer token is available for an identity check.
    fn has_token(&self) -> bool;
}

#[async_trait]
impl AuthService for ApiClient {
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        let req = self.request(Method::POST, "/auth/login").json(credentials);
        let resp: LoginResponse = self.send_json(req).await?;
        self.set_token(Some(resp.token.clone()));
        Ok(resp)
    }

    async fn current_user(&self) -> ClientResult<User> {
        let req = self.request(Method::GET, "/auth/me");
        self.send_json(req).await
    }

    async fn refresh(&self) -> ClientResult<LoginResponse> {
        let req = self.request(Method::POST, "/auth/refresh");
        let resp: LoginResponse = self.send_json(req).await?;
        self.set_token(Some(resp.token.clone()));
        Ok(resp)
    }

    async fn logout(&self) -> ClientResult<()> {
        let req = self.request(Method::POST, "/auth/logout");
        let outcome = self.send_empty(req).await;
        // The local token is dropped even if the server call failed.
        self.set_token(None);
        outcome
    }

    async fn recover_password(&self, email: &str) -> ClientResult<()> {
        let req = self
            .request(Method::POST, "/auth/recuperar-password")
            .json(&serde_json::json!({ "email": email }));
        self.send_empty(req).await
    }

    async fn register(&self, usuario: &NuevoUsuario) -> ClientResult<User> {
        let req = self.request(Method::POST, "/auth/register").json(usuario);
        self.send_json(req).await
    }

    fn has_token(&self) -> bool {
        self.token().is_some()
    }
}
