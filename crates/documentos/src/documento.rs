use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spjt_core::{DocumentoId, Entity, ExpedienteId};

/// MIME type assumed when the picked file does not report one.
pub const DEFAULT_MIME_TYPE: &str = "application/pdf";

/// Largest file accepted for upload (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// A document stored against a case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documento {
    pub id: DocumentoId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub tipo: String,
    pub expediente_id: ExpedienteId,
    #[serde(default)]
    pub firmado: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Documento {
    type Id = DocumentoId;

    fn id(&self) -> &DocumentoId {
        &self.id
    }
}

/// File content handed over by the platform file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archivo {
    pub nombre: String,
    pub mime_type: Option<String>,
    pub contenido: Vec<u8>,
}

impl Archivo {
    pub fn mime_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_MIME_TYPE)
    }

    pub fn size_bytes(&self) -> usize {
        self.contenido.len()
    }

    /// Size in megabytes, formatted with two decimals.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes() as f64 / 1024.0 / 1024.0)
    }
}

/// Extra multipart text fields sent alongside the uploaded file.
///
/// Kept ordered so the request body is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadMetadata(BTreeMap<String, String>);

impl UploadMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field; blank values are skipped.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.0.insert(key.into(), value);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Query for `GET /documentos`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentoFilter {
    pub search: String,
    pub expediente_id: Option<ExpedienteId>,
    pub firmado: Option<bool>,
}

impl DocumentoFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if !self.search.trim().is_empty() {
            query.push(("search", self.search.trim().to_string()));
        }
        if let Some(id) = &self.expediente_id {
            query.push(("expediente_id", id.to_string()));
        }
        if let Some(firmado) = self.firmado {
            query.push(("firmado", firmado.to_string()));
        }
        query
    }
}
