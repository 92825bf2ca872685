//! Case file list and detail.

use spjt_client::ClientError;
use spjt_core::{ExpedienteId, replace_by_id};
use spjt_documentos::Documento;
use spjt_expedientes::{
    Actuacion, EstadoFilter, Expediente, ExpedienteFilter, ExpedienteUpdate, NuevaActuacion,
};

use crate::actions::GatedAction;
use crate::context::AppContext;
use crate::error::ActionError;
use crate::navigation::Screen;
use crate::notice::Notice;
use crate::screens::form::{FieldErrors, is_blank};

pub struct ExpedientesScreen {
    ctx: AppContext,
    pub filter: ExpedienteFilter,
    pub items: Vec<Expediente>,
    pub is_loading: bool,
    pub notice: Option<Notice>,
}

impl ExpedientesScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            filter: ExpedienteFilter::default(),
            items: Vec::new(),
            is_loading: false,
            notice: None,
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_estado(&mut self, estado: EstadoFilter) {
        self.filter.estado = estado;
    }

    pub async fn load(&mut self) -> Result<(), ActionError> {
        self.is_loading = true;
        let outcome = self.ctx.expedientes.list(&self.filter).await;
        self.is_loading = false;

        match outcome {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                let err = self.ctx.failure("Error al cargar los expedientes", e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }

    /// `None` while there is something to show.
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.items.is_empty() && !self.is_loading).then(|| self.filter.empty_message())
    }

    /// Whether to show the "nuevo expediente" button.
    pub fn can_create(&self) -> bool {
        self.ctx.can(GatedAction::CrearExpediente)
    }

    /// Gated entry to the creation form.
    pub fn open_nuevo(&mut self) -> Result<Screen, ActionError> {
        match self.ctx.guard(GatedAction::CrearExpediente) {
            Ok(()) => Ok(Screen::NuevoExpediente),
            Err(e) => {
                self.notice = e.notice();
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActuacionField {
    Tipo,
    Descripcion,
}

/// Draft of a new filing on the detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActuacionForm {
    pub tipo: String,
    pub descripcion: String,
    pub errors: FieldErrors<ActuacionField>,
}

impl ActuacionForm {
    pub fn edit(&mut self, field: ActuacionField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ActuacionField::Tipo => self.tipo = value,
            ActuacionField::Descripcion => self.descripcion = value,
        }
        self.errors.clear(field);
    }

    pub fn validate(&mut self) -> Result<NuevaActuacion, ActionError> {
        let mut errors = FieldErrors::new();
        if is_blank(&self.tipo) {
            errors.insert(ActuacionField::Tipo, "El tipo de actuación es requerido");
        }
        if is_blank(&self.descripcion) {
            errors.insert(ActuacionField::Descripcion, "La descripción es requerida");
        }

        self.errors = errors;
        self.errors.check()?;

        Ok(NuevaActuacion {
            tipo: self.tipo.trim().to_string(),
            descripcion: self.descripcion.trim().to_string(),
        })
    }
}

pub struct ExpedienteDetailScreen {
    ctx: AppContext,
    pub id: ExpedienteId,
    pub expediente: Option<Expediente>,
    pub actuaciones: Vec<Actuacion>,
    pub documentos: Vec<Documento>,
    pub actuacion: ActuacionForm,
    pub notice: Option<Notice>,
}

impl ExpedienteDetailScreen {
    pub fn new(ctx: AppContext, id: ExpedienteId) -> Self {
        Self {
            ctx,
            id,
            expediente: None,
            actuaciones: Vec::new(),
            documentos: Vec::new(),
            actuacion: ActuacionForm::default(),
            notice: None,
        }
    }

    pub async fn load(&mut self) -> Result<(), ActionError> {
        let result = async {
            let expediente = self.ctx.expedientes.get(&self.id).await?;
            let actuaciones = self.ctx.expedientes.actuaciones(&self.id).await?;
            let documentos = self.ctx.expedientes.documentos(&self.id).await?;
            Ok::<_, ClientError>((expediente, actuaciones, documentos))
        }
        .await;

        match result {
            Ok((expediente, actuaciones, documentos)) => {
                self.expediente = Some(expediente);
                self.actuaciones = actuaciones;
                self.documentos = documentos;
                Ok(())
            }
            Err(e) => {
                let err = self.ctx.failure("Error al cargar el expediente", e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }

    fn guarded(&mut self, action: GatedAction) -> Result<(), ActionError> {
        self.ctx.guard(action).inspect_err(|e| self.notice = e.notice())
    }

    pub async fn update(&mut self, update: ExpedienteUpdate) -> Result<Expediente, ActionError> {
        self.guarded(GatedAction::EditarExpediente)?;

        match self.ctx.expedientes.update(&self.id, &update).await {
            Ok(updated) => {
                self.expediente = Some(updated.clone());
                self.notice = Some(Notice::success("Expediente actualizado correctamente"));
                Ok(updated)
            }
            Err(e) => {
                let err = self.ctx.action_failure(GatedAction::EditarExpediente, e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self) -> Result<(), ActionError> {
        self.guarded(GatedAction::EliminarExpediente)?;

        match self.ctx.expedientes.delete(&self.id).await {
            Ok(()) => {
                self.notice = Some(Notice::success("Expediente eliminado correctamente"));
                Ok(())
            }
            Err(e) => {
                let err = self.ctx.action_failure(GatedAction::EliminarExpediente, e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }

    /// Submit the filing draft. The draft is cleared once the server accepts it.
    pub async fn registrar_actuacion(&mut self) -> Result<Actuacion, ActionError> {
        self.guarded(GatedAction::RegistrarActuacion)?;
        let nueva = self.actuacion.validate()?;

        match self.ctx.expedientes.create_actuacion(&self.id, &nueva).await {
            Ok(created) => {
                self.actuaciones.push(created.clone());
                self.actuacion = ActuacionForm::default();
                self.notice = Some(Notice::success("Actuación registrada correctamente"));
                Ok(created)
            }
            Err(e) => {
                let err = self.ctx.action_failure(GatedAction::RegistrarActuacion, e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }

    /// Gated entry to the upload form for this case file.
    pub fn open_subir_documento(&mut self) -> Result<Screen, ActionError> {
        self.guarded(GatedAction::SubirDocumento)?;
        Ok(Screen::SubirDocumento)
    }
}

/// Merge an edited case file back into a list view.
pub fn apply_update(items: &mut [Expediente], updated: Expediente) -> bool {
    replace_by_id(items, updated)
}
