use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spjt_core::{Entity, ExpedienteId, InstitucionId};

/// Procedural status of a case file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoExpediente {
    Abierto,
    EnTramite,
    Resuelto,
    Archivado,
}

impl EstadoExpediente {
    pub const ALL: [EstadoExpediente; 4] = [
        EstadoExpediente::Abierto,
        EstadoExpediente::EnTramite,
        EstadoExpediente::Resuelto,
        EstadoExpediente::Archivado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EstadoExpediente::Abierto => "abierto",
            EstadoExpediente::EnTramite => "en_tramite",
            EstadoExpediente::Resuelto => "resuelto",
            EstadoExpediente::Archivado => "archivado",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EstadoExpediente::Abierto => "Abierto",
            EstadoExpediente::EnTramite => "En Trámite",
            EstadoExpediente::Resuelto => "Resuelto",
            EstadoExpediente::Archivado => "Archivado",
        }
    }
}

/// A judicial case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expediente {
    pub id: ExpedienteId,
    pub nro: String,
    pub caratula: String,
    pub fuero: String,
    pub estado: EstadoExpediente,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institucion_id: Option<InstitucionId>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Expediente {
    type Id = ExpedienteId;

    fn id(&self) -> &ExpedienteId {
        &self.id
    }
}

/// Payload for `POST /expedientes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoExpediente {
    pub nro: String,
    pub caratula: String,
    pub fuero: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institucion_id: Option<InstitucionId>,
}

/// Partial payload for `PUT /expedientes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpedienteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caratula: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<EstadoExpediente>,
}

/// Status chip of the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstadoFilter {
    #[default]
    Todos,
    Solo(EstadoExpediente),
}

/// Search text + status filter of the list screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpedienteFilter {
    pub search: String,
    pub estado: EstadoFilter,
}

impl ExpedienteFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.estado != EstadoFilter::Todos
    }

    /// Query parameters for `GET /expedientes`. "todos" sends no `estado`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !self.search.trim().is_empty() {
            query.push(("search", self.search.trim().to_string()));
        }
        if let EstadoFilter::Solo(estado) = self.estado {
            query.push(("estado", estado.as_str().to_string()));
        }
        query
    }

    /// Message shown when the list comes back empty.
    pub fn empty_message(&self) -> &'static str {
        if self.is_active() {
            "No se encontraron expedientes con los filtros aplicados"
        } else {
            "No hay expedientes registrados en el sistema"
        }
    }
}
