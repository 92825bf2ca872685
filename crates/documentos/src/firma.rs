use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spjt_core::{DocumentoId, UsuarioId};

/// Signing method. Exactly one is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoFirma {
    #[default]
    Demo,
    Token,
    Hsm,
}

impl TipoFirma {
    pub const ALL: [TipoFirma; 3] = [TipoFirma::Demo, TipoFirma::Token, TipoFirma::Hsm];

    pub fn title(self) -> &'static str {
        match self {
            TipoFirma::Demo => "Firma Demo",
            TipoFirma::Token => "Firma con Token",
            TipoFirma::Hsm => "Firma HSM",
        }
    }

    /// Token signatures need the device PIN.
    pub fn requires_pin(self) -> bool {
        matches!(self, TipoFirma::Token)
    }
}

/// Body of `POST /documentos/{id}/firma`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmaRequest {
    pub tipo_firma: TipoFirma,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comentario: Option<String>,
}

/// One entry of a document's signature history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmaRecord {
    pub documento_id: DocumentoId,
    pub tipo_firma: TipoFirma,
    pub firmante_id: UsuarioId,
    #[serde(default)]
    pub firmante_nombre: String,
    pub fecha: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comentario: Option<String>,
}

/// Result of `GET /documentos/{id}/verificar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificacionFirma {
    pub valida: bool,
    #[serde(default)]
    pub firmas: Vec<FirmaRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
}
