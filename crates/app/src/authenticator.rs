//! The authentication collaborator: the only owner of the session writer.

use std::sync::Arc;

use tracing::{info, warn};

use spjt_auth::{NuevoUsuario, SessionHandle, SessionWriter, User, session_channel};
use spjt_client::{AuthService, ClientError, ClientResult, Credentials};

pub struct Authenticator {
    service: Arc<dyn AuthService>,
    writer: SessionWriter,
}

impl Authenticator {
    /// Fresh authenticator with the session in the loading state.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        let (writer, _) = session_channel();
        Self { service, writer }
    }

    pub fn session(&self) -> SessionHandle {
        self.writer.handle()
    }

    /// Startup identity check. Always leaves the loading state: any failure
    /// resolves to "no user".
    pub async fn bootstrap(&self) {
        if !self.service.has_token() {
            info!("no stored token; skipping identity check");
            self.writer.resolve(None);
            return;
        }

        match self.service.current_user().await {
            Ok(user) => self.writer.resolve(Some(user)),
            Err(e) => {
                warn!(error = %e, "identity check failed");
                self.writer.resolve(None);
            }
        }
    }

    /// On failure the session is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<User> {
        match self.service.login(credentials).await {
            Ok(resp) => {
                self.writer.login(resp.user.clone());
                Ok(resp.user)
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                Err(e)
            }
        }
    }

    /// Local logout happens even if the server call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.service.logout().await {
            warn!(error = %e, "server logout failed");
        }
        self.writer.logout();
    }

    /// Refresh the token. A 401 expires the session; other failures keep it.
    pub async fn refresh(&self) -> ClientResult<User> {
        match self.service.refresh().await {
            Ok(resp) => {
                self.writer.refresh(resp.user.clone());
                Ok(resp.user)
            }
            Err(e) => {
                self.on_failure(&e);
                Err(e)
            }
        }
    }

    pub async fn recover_password(&self, email: &str) -> ClientResult<()> {
        self.service.recover_password(email).await
    }

    pub async fn register(&self, usuario: &NuevoUsuario) -> ClientResult<User> {
        self.service.register(usuario).await
    }

    /// Inspect a collaborator failure; a 401 while logged in ends the session.
    pub fn on_failure(&self, error: &ClientError) {
        if error.is_unauthorized() && self.session().get_session().is_authenticated() {
            warn!("server rejected the session token");
            self.writer.expire();
        }
    }
}

impl core::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}
