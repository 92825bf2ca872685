//! `spjt-auth`: roles, capabilities, the session store and the permission gate.
//!
//! No HTTP in here: the session is written by
//! whatever authentication collaborator the application wires in.

pub mod authorize;
pub mod permissions;
pub mod policy;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{
    AuthorizationExplanation, AuthzError, DenialKind, PermissionGate, authorize,
    explain_authorization,
};
pub use permissions::Capability;
pub use policy::{CapabilityTable, PolicyError};
pub use roles::Role;
pub use session::{Session, SessionError, SessionHandle, SessionWriter, session_channel};
pub use user::{EstadoUsuario, NuevoUsuario, RolFilter, User, UsuarioFilter, UsuarioUpdate};
