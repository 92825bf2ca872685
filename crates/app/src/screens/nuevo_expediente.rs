use spjt_core::InstitucionId;
use spjt_expedientes::{Expediente, NuevoExpediente};

use crate::actions::GatedAction;
use crate::context::AppContext;
use crate::error::ActionError;
use crate::notice::Notice;
use crate::screens::form::{FieldErrors, is_blank};

const MIN_CARATULA_LEN: usize = 10;

/// Court branches offered by the form.
pub const FUEROS: [&str; 5] = [
    "Civil",
    "Penal",
    "Laboral",
    "Familia",
    "Contencioso Administrativo",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExpedienteField {
    Nro,
    Caratula,
    Fuero,
    InstitucionId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NuevoExpedienteForm {
    pub nro: String,
    pub caratula: String,
    pub fuero: String,
    pub institucion_id: String,
    pub errors: FieldErrors<ExpedienteField>,
}

impl NuevoExpedienteForm {
    pub fn edit(&mut self, field: ExpedienteField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ExpedienteField::Nro => self.nro = value,
            ExpedienteField::Caratula => self.caratula = value,
            ExpedienteField::Fuero => self.fuero = value,
            ExpedienteField::InstitucionId => self.institucion_id = value,
        }
        self.errors.clear(field);
    }

    /// Validate every field and build the payload.
    pub fn validate(&mut self) -> Result<NuevoExpediente, ActionError> {
        let mut errors = FieldErrors::new();

        if is_blank(&self.nro) {
            errors.insert(ExpedienteField::Nro, "El número de expediente es requerido");
        }
        if is_blank(&self.caratula) {
            errors.insert(ExpedienteField::Caratula, "La carátula es requerida");
        } else if self.caratula.trim().chars().count() < MIN_CARATULA_LEN {
            errors.insert(
                ExpedienteField::Caratula,
                "La carátula debe tener al menos 10 caracteres",
            );
        }
        if is_blank(&self.fuero) {
            errors.insert(ExpedienteField::Fuero, "El fuero es requerido");
        }

        let institucion_id = if is_blank(&self.institucion_id) {
            None
        } else {
            match InstitucionId::new(self.institucion_id.trim()) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.insert(ExpedienteField::InstitucionId, "Institución inválida");
                    None
                }
            }
        };

        self.errors = errors;
        self.errors.check()?;

        Ok(NuevoExpediente {
            nro: self.nro.trim().to_string(),
            caratula: self.caratula.trim().to_string(),
            fuero: self.fuero.trim().to_string(),
            institucion_id,
        })
    }
}

pub struct NuevoExpedienteScreen {
    ctx: AppContext,
    pub form: NuevoExpedienteForm,
    pub notice: Option<Notice>,
    pub is_submitting: bool,
}

impl NuevoExpedienteScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: NuevoExpedienteForm::default(),
            notice: None,
            is_submitting: false,
        }
    }

    /// Permission first, then validation, then the create call.
    /// On failure the form keeps what the user typed.
    pub async fn submit(&mut self) -> Result<Expediente, ActionError> {
        if let Err(e) = self.ctx.guard(GatedAction::CrearExpediente) {
            self.notice = e.notice();
            return Err(e);
        }
        let nuevo = self.form.validate()?;

        self.is_submitting = true;
        let outcome = self.ctx.expedientes.create(&nuevo).await;
        self.is_submitting = false;

        match outcome {
            Ok(created) => {
                self.notice = Some(Notice::success("Expediente creado correctamente"));
                Ok(created)
            }
            Err(e) => {
                let err = self.ctx.action_failure(GatedAction::CrearExpediente, e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use crate::test_support::Harness;
    use spjt_auth::Role;
    use spjt_client::ClientError;

    fn filled() -> NuevoExpedienteForm {
        let mut form = NuevoExpedienteForm::default();
        form.edit(ExpedienteField::Nro, "EXP-2024-001");
        form.edit(ExpedienteField::Caratula, "Pérez c/ García s/ daños");
        form.edit(ExpedienteField::Fuero, FUEROS[0]);
        form
    }

    #[test]
    fn empty_form_flags_required_fields() {
        let mut form = NuevoExpedienteForm::default();
        assert_eq!(form.validate(), Err(ActionError::Validation(3)));
        assert!(form.errors.get(ExpedienteField::InstitucionId).is_none());
    }

    #[test]
    fn short_caratula_is_rejected() {
        let mut form = filled();
        form.edit(ExpedienteField::Caratula, "corta");
        assert_eq!(form.validate(), Err(ActionError::Validation(1)));
        assert_eq!(
            form.errors.get(ExpedienteField::Caratula),
            Some("La carátula debe tener al menos 10 caracteres")
        );

        form.edit(ExpedienteField::Caratula, "exactamente diez");
        assert!(form.errors.is_empty());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn caratula_length_counts_characters() {
        let mut form = filled();
        form.edit(ExpedienteField::Caratula, "ñandúñandú");
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn operador_is_denied_before_anything_is_sent() {
        let h = Harness::logged_in(Role::Operador).await;
        let mut screen = NuevoExpedienteScreen::new(h.ctx.clone());
        screen.form = filled();

        let err = screen.submit().await.unwrap_err();

        assert!(matches!(err, ActionError::PermissionDenied { .. }));
        assert_eq!(screen.notice.unwrap().kind, NoticeKind::Denied);
        assert!(h.resource_calls().is_empty());
    }

    #[tokio::test]
    async fn admin_creates_once() {
        let h = Harness::logged_in(Role::Admin).await;
        let mut screen = NuevoExpedienteScreen::new(h.ctx.clone());
        screen.form = filled();

        let created = screen.submit().await.unwrap();

        assert_eq!(created.nro, "EXP-2024-001");
        assert_eq!(h.expedientes.calls(), vec!["create EXP-2024-001"]);
        assert_eq!(screen.notice.unwrap().title, "Éxito");
    }

    #[tokio::test]
    async fn collaborator_failure_keeps_the_form() {
        let h = Harness::logged_in(Role::Secretario).await;
        h.expedientes.fail_with(ClientError::Api {
            status: 409,
            message: "duplicado".into(),
        });
        let mut screen = NuevoExpedienteScreen::new(h.ctx.clone());
        screen.form = filled();

        assert!(screen.submit().await.is_err());
        assert_eq!(screen.form.nro, "EXP-2024-001");
        assert_eq!(
            screen.notice.as_ref().map(|n| n.message.as_str()),
            Some("Error al crear el expediente")
        );
        assert!(h.ctx.session.get_session().is_authenticated());
    }

    #[tokio::test]
    async fn unauthorized_create_expires_the_session() {
        let h = Harness::logged_in(Role::Admin).await;
        h.expedientes.fail_with(ClientError::Unauthorized);
        let mut screen = NuevoExpedienteScreen::new(h.ctx.clone());
        screen.form = filled();

        let err = screen.submit().await.unwrap_err();

        assert!(err.is_session_expired());
        assert!(h.ctx.session.current_user().is_none());
    }
}
