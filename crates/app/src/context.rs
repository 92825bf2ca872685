//! Shared application state handed to every screen.

use std::sync::Arc;

use spjt_auth::{CapabilityTable, PermissionGate, SessionHandle};
use spjt_client::{
    ApiClient, AuthService, ClientError, DocumentosService, ExpedientesService, UsuariosService,
};

use crate::actions::GatedAction;
use crate::authenticator::Authenticator;
use crate::error::ActionError;

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionHandle,
    pub gate: PermissionGate,
    pub auth: Arc<Authenticator>,
    pub expedientes: Arc<dyn ExpedientesService>,
    pub documentos: Arc<dyn DocumentosService>,
    pub usuarios: Arc<dyn UsuariosService>,
}

impl AppContext {
    pub fn new(
        auth: Arc<dyn AuthService>,
        expedientes: Arc<dyn ExpedientesService>,
        documentos: Arc<dyn DocumentosService>,
        usuarios: Arc<dyn UsuariosService>,
        table: Arc<CapabilityTable>,
    ) -> Self {
        let auth = Arc::new(Authenticator::new(auth));
        let session = auth.session();
        let gate = PermissionGate::new(session.clone(), table);

        Self {
            session,
            gate,
            auth,
            expedientes,
            documentos,
            usuarios,
        }
    }

    /// Every collaborator backed by the same HTTP client (and token).
    pub fn from_client(client: ApiClient, table: Arc<CapabilityTable>) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client.clone(), client.clone(), client, table)
    }

    /// Permission check to run before any mutating collaborator call.
    pub fn guard(&self, action: GatedAction) -> Result<(), ActionError> {
        self.gate
            .check(&action.capability())
            .map_err(|source| ActionError::PermissionDenied { action, source })
    }

    pub fn can(&self, action: GatedAction) -> bool {
        self.gate.has_permission(action.capability().as_str())
    }

    /// Turn a collaborator failure into an action error, expiring the
    /// session on 401.
    pub fn failure(&self, message: impl Into<String>, error: ClientError) -> ActionError {
        let message = message.into();
        tracing::warn!(error = %error, %message, "collaborator call failed");
        self.auth.on_failure(&error);
        ActionError::collaborator(message, error)
    }

    /// Gated action failure: uses the action's generic message.
    pub fn action_failure(&self, action: GatedAction, error: ClientError) -> ActionError {
        self.failure(action.failure_message(), error)
    }
}
