use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spjt_core::{ActuacionId, Entity, ExpedienteId};

/// A procedural filing attached to a case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actuacion {
    pub id: ActuacionId,
    pub expediente_id: ExpedienteId,
    pub tipo: String,
    pub descripcion: String,
    pub fecha: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autor: Option<String>,
}

impl Entity for Actuacion {
    type Id = ActuacionId;

    fn id(&self) -> &ActuacionId {
        &self.id
    }
}

/// Payload for `POST /expedientes/{id}/actuaciones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevaActuacion {
    pub tipo: String,
    pub descripcion: String,
}
