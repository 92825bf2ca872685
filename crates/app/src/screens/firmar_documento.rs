//! Signing form.
//!
//! A method is always selected (demo by default). Token signatures need a
//! PIN. After a successful submit the form is done and further submits are
//! rejected.

use spjt_core::DocumentoId;
use spjt_documentos::{FirmaRecord, FirmaRequest, TipoFirma};

use crate::actions::GatedAction;
use crate::context::AppContext;
use crate::error::ActionError;
use crate::notice::Notice;
use crate::screens::form::{FieldErrors, is_blank};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FirmaField {
    TipoFirma,
    Pin,
    Comentario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmaPhase {
    Editing,
    Submitting,
    Signed,
}

pub struct FirmarDocumentoScreen {
    ctx: AppContext,
    pub documento_id: DocumentoId,
    pub tipo_firma: TipoFirma,
    pub pin: String,
    pub comentario: String,
    pub errors: FieldErrors<FirmaField>,
    pub notice: Option<Notice>,
    phase: FirmaPhase,
}

impl FirmarDocumentoScreen {
    pub fn new(ctx: AppContext, documento_id: DocumentoId) -> Self {
        Self {
            ctx,
            documento_id,
            tipo_firma: TipoFirma::default(),
            pin: String::new(),
            comentario: String::new(),
            errors: FieldErrors::new(),
            notice: None,
            phase: FirmaPhase::Editing,
        }
    }

    pub fn phase(&self) -> FirmaPhase {
        self.phase
    }

    /// Whether the PIN input is shown.
    pub fn pin_required(&self) -> bool {
        self.tipo_firma.requires_pin()
    }

    pub fn select_tipo(&mut self, tipo: TipoFirma) {
        self.tipo_firma = tipo;
        self.errors.clear(FirmaField::TipoFirma);
    }

    pub fn edit(&mut self, field: FirmaField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FirmaField::TipoFirma => return,
            FirmaField::Pin => self.pin = value,
            FirmaField::Comentario => self.comentario = value,
        }
        self.errors.clear(field);
    }

    fn validate(&mut self) -> Result<FirmaRequest, ActionError> {
        let mut errors = FieldErrors::new();
        if self.pin_required() && is_blank(&self.pin) {
            errors.insert(FirmaField::Pin, "El PIN es requerido para firma con token");
        }

        self.errors = errors;
        self.errors.check()?;

        Ok(FirmaRequest {
            tipo_firma: self.tipo_firma,
            pin: self.pin_required().then(|| self.pin.trim().to_string()),
            comentario: (!is_blank(&self.comentario)).then(|| self.comentario.trim().to_string()),
        })
    }

    pub async fn submit(&mut self) -> Result<FirmaRecord, ActionError> {
        if self.phase != FirmaPhase::Editing {
            let err = ActionError::Rejected("El documento ya fue firmado".to_string());
            self.notice = err.notice();
            return Err(err);
        }
        if let Err(e) = self.ctx.guard(GatedAction::FirmarDocumento) {
            self.notice = e.notice();
            return Err(e);
        }
        let request = self.validate()?;

        self.phase = FirmaPhase::Submitting;
        let outcome = self.ctx.documentos.sign(&self.documento_id, &request).await;

        match outcome {
            Ok(record) => {
                self.phase = FirmaPhase::Signed;
                self.notice = Some(Notice::success("Documento firmado correctamente"));
                Ok(record)
            }
            Err(e) => {
                self.phase = FirmaPhase::Editing;
                let err = self.ctx.action_failure(GatedAction::FirmarDocumento, e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }
}
