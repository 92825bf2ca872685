use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use spjt_core::{DocumentoId, ExpedienteId};
use spjt_documentos::{
    Archivo, Documento, DocumentoFilter, FirmaRecord, FirmaRequest, UploadMetadata,
    VerificacionFirma,
};

use crate::{ApiClient, ClientError, ClientResult};

/// Document endpoints.
#[async_trait]
pub trait DocumentosService: Send + Sync {
    async fn list(&self, filter: &DocumentoFilter) -> ClientResult<Vec<Documento>>;
    async fn get(&self, id: &DocumentoId) -> ClientResult<Documento>;

    /// Multipart upload: a `file` part plus one text part per metadata entry.
    async fn upload(
        &self,
        expediente_id: &ExpedienteId,
        archivo: Archivo,
        metadata: &UploadMetadata,
    ) -> ClientResult<Documento>;

    async fn sign(&self, id: &DocumentoId, request: &FirmaRequest) -> ClientResult<FirmaRecord>;
    async fn verify(&self, id: &DocumentoId) -> ClientResult<VerificacionFirma>;
    async fn download(&self, id: &DocumentoId) -> ClientResult<Vec<u8>>;
    async fn delete(&self, id: &DocumentoId) -> ClientResult<()>;
    async fn signature_history(&self, id: &DocumentoId) -> ClientResult<Vec<FirmaRecord>>;
}

#[async_trait]
impl DocumentosService for ApiClient {
    async fn list(&self, filter: &DocumentoFilter) -> ClientResult<Vec<Documento>> {
        let req = self
            .request(Method::GET, "/documentos")
            .query(&filter.to_query());
        self.send_json(req).await
    }

    async fn get(&self, id: &DocumentoId) -> ClientResult<Documento> {
        let req = self.request(Method::GET, &format!("/documentos/{id}"));
        self.send_json(req).await
    }

    async fn upload(
        &self,
        expediente_id: &ExpedienteId,
        archivo: Archivo,
        metadata: &UploadMetadata,
    ) -> ClientResult<Documento> {
        let mime = archivo.mime_type().to_string();
        let file = Part::bytes(archivo.contenido)
            .file_name(archivo.nombre)
            .mime_str(&mime)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid MIME type '{mime}': {e}")))?;

        let mut form = Form::new().part("file", file);
        for (key, value) in metadata.iter() {
            form = form.text(key.to_string(), value.to_string());
        }

        let req = self
            .request(Method::POST, &format!("/expedientes/{expediente_id}/documentos"))
            .multipart(form);
        self.send_json(req).await
    }

    async fn sign(&self, id: &DocumentoId, request: &FirmaRequest) -> ClientResult<FirmaRecord> {
        let req = self
            .request(Method::POST, &format!("/documentos/{id}/firma"))
            .json(request);
        self.send_json(req).await
    }

    async fn verify(&self, id: &DocumentoId) -> ClientResult<VerificacionFirma> {
        let req = self.request(Method::GET, &format!("/documentos/{id}/verificar"));
        self.send_json(req).await
    }

    async fn download(&self, id: &DocumentoId) -> ClientResult<Vec<u8>> {
        let req = self.request(Method::GET, &format!("/documentos/{id}/download"));
        self.send_bytes(req).await
    }

    async fn delete(&self, id: &DocumentoId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/documentos/{id}"));
        self.send_empty(req).await
    }

    async fn signature_history(&self, id: &DocumentoId) -> ClientResult<Vec<FirmaRecord>> {
        let req = self.request(Method::GET, &format!("/documentos/{id}/firmas"));
        self.send_json(req).await
    }
}
