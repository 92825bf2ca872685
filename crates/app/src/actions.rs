//! Mutating actions and the capability each one requires.

use serde::Serialize;

use spjt_auth::Capability;

/// Every UI action that changes server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatedAction {
    CrearExpediente,
    EditarExpediente,
    EliminarExpediente,
    RegistrarActuacion,
    CrearUsuario,
    EditarUsuario,
    CambiarEstadoUsuario,
    SubirDocumento,
    FirmarDocumento,
    EliminarDocumento,
}

impl GatedAction {
    pub const ALL: [GatedAction; 10] = [
        GatedAction::CrearExpediente,
        GatedAction::EditarExpediente,
        GatedAction::EliminarExpediente,
        GatedAction::RegistrarActuacion,
        GatedAction::CrearUsuario,
        GatedAction::EditarUsuario,
        GatedAction::CambiarEstadoUsuario,
        GatedAction::SubirDocumento,
        GatedAction::FirmarDocumento,
        GatedAction::EliminarDocumento,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GatedAction::CrearExpediente => "crear_expediente",
            GatedAction::EditarExpediente => "editar_expediente",
            GatedAction::EliminarExpediente => "eliminar_expediente",
            GatedAction::RegistrarActuacion => "registrar_actuacion",
            GatedAction::CrearUsuario => "crear_usuario",
            GatedAction::EditarUsuario => "editar_usuario",
            GatedAction::CambiarEstadoUsuario => "cambiar_estado_usuario",
            GatedAction::SubirDocumento => "subir_documento",
            GatedAction::FirmarDocumento => "firmar_documento",
            GatedAction::EliminarDocumento => "eliminar_documento",
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            GatedAction::CrearExpediente
            | GatedAction::EditarExpediente
            | GatedAction::EliminarExpediente
            | GatedAction::RegistrarActuacion => Capability::EXPEDIENTES_WRITE,
            GatedAction::CrearUsuario
            | GatedAction::EditarUsuario
            | GatedAction::CambiarEstadoUsuario => Capability::USUARIOS_WRITE,
            GatedAction::SubirDocumento | GatedAction::EliminarDocumento => {
                Capability::DOCUMENTOS_WRITE
            }
            GatedAction::FirmarDocumento => Capability::DOCUMENTOS_SIGN,
        }
    }

    /// Body of the "Acceso Denegado" notice.
    pub fn denial_message(self) -> &'static str {
        match self {
            GatedAction::CrearExpediente => "No tienes permisos para crear expedientes.",
            GatedAction::EditarExpediente => "No tienes permisos para editar expedientes.",
            GatedAction::EliminarExpediente => "No tienes permisos para eliminar expedientes.",
            GatedAction::RegistrarActuacion => "No tienes permisos para registrar actuaciones.",
            GatedAction::CrearUsuario => "No tienes permisos para crear usuarios.",
            GatedAction::EditarUsuario => "No tienes permisos para editar usuarios.",
            GatedAction::CambiarEstadoUsuario => {
                "No tienes permisos para cambiar el estado de usuarios."
            }
            GatedAction::SubirDocumento => "No tienes permisos para subir documentos.",
            GatedAction::FirmarDocumento => "No tienes permisos para firmar documentos.",
            GatedAction::EliminarDocumento => "No tienes permisos para eliminar documentos.",
        }
    }

    /// Body of the generic error notice when the collaborator call fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            GatedAction::CrearExpediente => "Error al crear el expediente",
            GatedAction::EditarExpediente => "Error al actualizar el expediente",
            GatedAction::EliminarExpediente => "Error al eliminar el expediente",
            GatedAction::RegistrarActuacion => "Error al registrar la actuación",
            GatedAction::CrearUsuario => "Error al crear el usuario",
            GatedAction::EditarUsuario => "Error al actualizar el usuario",
            GatedAction::CambiarEstadoUsuario => "Error al cambiar el estado del usuario",
            GatedAction::SubirDocumento => "Error al subir el documento",
            GatedAction::FirmarDocumento => "Error al firmar el documento",
            GatedAction::EliminarDocumento => "Error al eliminar el documento",
        }
    }
}

impl core::fmt::Display for GatedAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
