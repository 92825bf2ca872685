//! Document list.

use spjt_core::DocumentoId;
use spjt_documentos::{Documento, DocumentoFilter, FirmaRecord, VerificacionFirma};

use crate::actions::GatedAction;
use crate::context::AppContext;
use crate::error::ActionError;
use crate::navigation::Screen;
use crate::notice::Notice;

pub struct DocumentosScreen {
    ctx: AppContext,
    pub filter: DocumentoFilter,
    pub items: Vec<Documento>,
    pub is_loading: bool,
    pub notice: Option<Notice>,
}

impl DocumentosScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            filter: DocumentoFilter::default(),
            items: Vec::new(),
            is_loading: false,
            notice: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ActionError> {
        self.is_loading = true;
        let outcome = self.ctx.documentos.list(&self.filter).await;
        self.is_loading = false;

        outcome
            .map(|items| self.items = items)
            .map_err(|e| self.report("Error al cargar los documentos", e))
    }

    pub fn can_sign(&self) -> bool {
        self.ctx.can(GatedAction::FirmarDocumento)
    }

    pub fn can_upload(&self) -> bool {
        self.ctx.can(GatedAction::SubirDocumento)
    }

    pub fn open_subir(&mut self) -> Result<Screen, ActionError> {
        self.gate(GatedAction::SubirDocumento)?;
        Ok(Screen::SubirDocumento)
    }

    /// Signed documents cannot be signed again.
    pub fn open_firmar(&mut self, documento: &Documento) -> Result<Screen, ActionError> {
        self.gate(GatedAction::FirmarDocumento)?;
        if documento.firmado {
            let err = ActionError::Rejected("El documento ya se encuentra firmado".to_string());
            self.notice = err.notice();
            return Err(err);
        }
        Ok(Screen::FirmarDocumento)
    }

    pub async fn verify(&mut self, id: &DocumentoId) -> Result<VerificacionFirma, ActionError> {
        self.ctx
            .documentos
            .verify(id)
            .await
            .map_err(|e| self.report("Error al verificar la firma", e))
    }

    pub async fn download(&mut self, id: &DocumentoId) -> Result<Vec<u8>, ActionError> {
        self.ctx
            .documentos
            .download(id)
            .await
            .map_err(|e| self.report("Error al descargar el documento", e))
    }

    pub async fn history(&mut self, id: &DocumentoId) -> Result<Vec<FirmaRecord>, ActionError> {
        self.ctx
            .documentos
            .signature_history(id)
            .await
            .map_err(|e| self.report("Error al cargar el historial de firmas", e))
    }

    pub async fn delete(&mut self, id: &DocumentoId) -> Result<(), ActionError> {
        self.gate(GatedAction::EliminarDocumento)?;

        match self.ctx.documentos.delete(id).await {
            Ok(()) => {
                self.items.retain(|d| &d.id != id);
                self.notice = Some(Notice::success("Documento eliminado correctamente"));
                Ok(())
            }
            Err(e) => Err(self.report(GatedAction::EliminarDocumento.failure_message(), e)),
        }
    }

    fn gate(&mut self, action: GatedAction) -> Result<(), ActionError> {
        self.ctx.guard(action).inspect_err(|e| self.notice = e.notice())
    }

    fn report(&mut self, message: &str, error: spjt_client::ClientError) -> ActionError {
        let err = self.ctx.failure(message, error);
        self.notice = err.notice();
        err
    }
}
