use spjt_core::ExpedienteId;
use spjt_documentos::{Archivo, Documento, MAX_UPLOAD_BYTES, UploadMetadata};

use crate::actions::GatedAction;
use crate::context::AppContext;
use crate::error::ActionError;
use crate::notice::Notice;
use crate::screens::form::{FieldErrors, is_blank};

/// Document kinds offered by the upload form.
pub const TIPOS_DOCUMENTO: [&str; 5] = [
    "escrito",
    "resolucion",
    "sentencia",
    "notificacion",
    "otro",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DocumentoField {
    Nombre,
    Descripcion,
    Tipo,
    ExpedienteId,
    Archivo,
}

pub struct SubirDocumentoScreen {
    ctx: AppContext,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub expediente_id: String,
    pub archivo: Option<Archivo>,
    pub errors: FieldErrors<DocumentoField>,
    pub notice: Option<Notice>,
    pub is_submitting: bool,
}

impl SubirDocumentoScreen {
    /// `expediente_id` is pre-filled when opened from a case file.
    pub fn new(ctx: AppContext, expediente_id: Option<ExpedienteId>) -> Self {
        Self {
            ctx,
            nombre: String::new(),
            descripcion: String::new(),
            tipo: TIPOS_DOCUMENTO[0].to_string(),
            expediente_id: expediente_id.map(String::from).unwrap_or_default(),
            archivo: None,
            errors: FieldErrors::new(),
            notice: None,
            is_submitting: false,
        }
    }

    pub fn edit(&mut self, field: DocumentoField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DocumentoField::Nombre => self.nombre = value,
            DocumentoField::Descripcion => self.descripcion = value,
            DocumentoField::Tipo => self.tipo = value,
            DocumentoField::ExpedienteId => self.expediente_id = value,
            DocumentoField::Archivo => return,
        }
        self.errors.clear(field);
    }

    /// Picking a file also suggests its name when none was typed.
    pub fn select_archivo(&mut self, archivo: Archivo) {
        if is_blank(&self.nombre) {
            self.nombre = archivo.nombre.clone();
            self.errors.clear(DocumentoField::Nombre);
        }
        self.archivo = Some(archivo);
        self.errors.clear(DocumentoField::Archivo);
    }

    fn validate(&mut self) -> Result<(ExpedienteId, UploadMetadata), ActionError> {
        let mut errors = FieldErrors::new();

        if is_blank(&self.nombre) {
            errors.insert(DocumentoField::Nombre, "El nombre del documento es requerido");
        }
        match &self.archivo {
            None => errors.insert(DocumentoField::Archivo, "Debe seleccionar un archivo"),
            Some(archivo) if archivo.size_bytes() > MAX_UPLOAD_BYTES => errors.insert(
                DocumentoField::Archivo,
                format!("El archivo ({}) supera el máximo de 10 MB", archivo.size_label()),
            ),
            Some(_) => {}
        }
        let expediente_id = ExpedienteId::new(self.expediente_id.trim());
        if expediente_id.is_err() {
            errors.insert(DocumentoField::ExpedienteId, "Debe seleccionar un expediente");
        }

        self.errors = errors;
        self.errors.check()?;
        let expediente_id = expediente_id.map_err(|_| ActionError::Validation(1))?;

        let metadata = UploadMetadata::new()
            .with("nombre", self.nombre.trim())
            .with("descripcion", self.descripcion.trim())
            .with("tipo", self.tipo.trim())
            .with("expediente_id", expediente_id.as_str());
        Ok((expediente_id, metadata))
    }

    pub async fn submit(&mut self) -> Result<Documento, ActionError> {
        if let Err(e) = self.ctx.guard(GatedAction::SubirDocumento) {
            self.notice = e.notice();
            return Err(e);
        }
        let (expediente_id, metadata) = self.validate()?;
        let Some(archivo) = self.archivo.clone() else {
            return Err(ActionError::Validation(1));
        };

        self.is_submitting = true;
        let outcome = self.ctx.documentos.upload(&expediente_id, archivo, &metadata).await;
        self.is_submitting = false;

        match outcome {
            Ok(documento) => {
                self.notice = Some(Notice::success("Documento subido correctamente"));
                Ok(documento)
            }
            Err(e) => {
                let err = self.ctx.action_failure(GatedAction::SubirDocumento, e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }
}
