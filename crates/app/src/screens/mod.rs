//! Screen view-models.
//!
//! Each screen holds its own form/list state and an [`AppContext`]. Mutating
//! actions go through the permission gate first, then local validation, and
//! only then reach a collaborator.
//!
//! [`AppContext`]: crate::context::AppContext

pub mod acceso;
pub mod documentos;
pub mod expedientes;
pub mod firmar_documento;
pub mod form;
pub mod nuevo_expediente;
pub mod subir_documento;
pub mod usuario_form;
pub mod usuarios;

pub use acceso::{LoginField, LoginScreen, RecuperarPasswordScreen};
pub use documentos::DocumentosScreen;
pub use expedientes::{ActuacionField, ActuacionForm, ExpedienteDetailScreen, ExpedientesScreen};
pub use firmar_documento::{FirmaField, FirmaPhase, FirmarDocumentoScreen};
pub use form::FieldErrors;
pub use nuevo_expediente::{ExpedienteField, NuevoExpedienteForm, NuevoExpedienteScreen};
pub use subir_documento::{DocumentoField, SubirDocumentoScreen};
pub use usuario_form::{UsuarioField, UsuarioFormMode, UsuarioFormScreen};
pub use usuarios::{PendingToggle, UsuariosScreen};
