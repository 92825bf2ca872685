use async_trait::async_trait;
use reqwest::Method;

use spjt_core::ExpedienteId;
use spjt_documentos::Documento;
use spjt_expedientes::{
    Actuacion, Expediente, ExpedienteFilter, ExpedienteUpdate, NuevaActuacion, NuevoExpediente,
};

use crate::{ApiClient, ClientResult};

/// Case-file endpoints.
#[async_trait]
pub trait ExpedientesService: Send + Sync {
    async fn list(&self, filter: &ExpedienteFilter) -> ClientResult<Vec<Expediente>>;
    async fn get(&self, id: &ExpedienteId) -> ClientResult<Expediente>;
    async fn create(&self, expediente: &NuevoExpediente) -> ClientResult<Expediente>;
    async fn update(
        &self,
        id: &ExpedienteId,
        update: &ExpedienteUpdate,
    ) -> ClientResult<Expediente>;
    async fn delete(&self, id: &ExpedienteId) -> ClientResult<()>;
    async fn actuaciones(&self, id: &ExpedienteId) -> ClientResult<Vec<Actuacion>>;
    async fn create_actuacion(
        &self,
        id: &ExpedienteId,
        actuacion: &NuevaActuacion,
    ) -> ClientResult<Actuacion>;
    async fn documentos(&self, id: &ExpedienteId) -> ClientResult<Vec<Documento>>;
}

#[async_trait]
impl ExpedientesService for ApiClient {
    async fn list(&self, filter: &ExpedienteFilter) -> ClientResult<Vec<Expediente>> {
        let req = self
            .request(Method::GET, "/expedientes")
            .query(&filter.to_query());
        self.send_json(req).await
    }

    async fn get(&self, id: &ExpedienteId) -> ClientResult<Expediente> {
        let req = self.request(Method::GET, &format!("/expedientes/{id}"));
        self.send_json(req).await
    }

    async fn create(&self, expediente: &NuevoExpediente) -> ClientResult<Expediente> {
        let req = self.request(Method::POST, "/expedientes").json(expediente);
        self.send_json(req).await
    }

    async fn update(
        &self,
        id: &ExpedienteId,
        update: &ExpedienteUpdate,
    ) -> ClientResult<Expediente> {
        let req = self
            .request(Method::PUT, &format!("/expedientes/{id}"))
            .json(update);
        self.send_json(req).await
    }

    async fn delete(&self, id: &ExpedienteId) -> ClientResult<()> {
        let req = self.request(Method::DELETE, &format!("/expedientes/{id}"));
        self.send_empty(req).await
    }

    async fn actuaciones(&self, id: &ExpedienteId) -> ClientResult<Vec<Actuacion>> {
        let req = self.request(Method::GET, &format!("/expedientes/{id}/actuaciones"));
        self.send_json(req).await
    }

    async fn create_actuacion(
        &self,
        id: &ExpedienteId,
        actuacion: &NuevaActuacion,
    ) -> ClientResult<Actuacion> {
        let req = self
            .request(Method::POST, &format!("/expedientes/{id}/actuaciones"))
            .json(actuacion);
        self.send_json(req).await
    }

    async fn documentos(&self, id: &ExpedienteId) -> ClientResult<Vec<Documento>> {
        let req = self.request(Method::GET, &format!("/expedientes/{id}/documentos"));
        self.send_json(req).await
    }
}
