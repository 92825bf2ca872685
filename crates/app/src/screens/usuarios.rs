//! User administration list.

use spjt_auth::{EstadoUsuario, RolFilter, User, UsuarioFilter};
use spjt_core::{UsuarioId, replace_by_id};

use crate::actions::GatedAction;
use crate::context::AppContext;
use crate::error::ActionError;
use crate::notice::Notice;
use crate::screens::usuario_form::UsuarioFormScreen;

/// Confirmation prompt for an activate/deactivate toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    pub id: UsuarioId,
    pub nuevo_estado: EstadoUsuario,
    pub prompt: String,
}

pub struct UsuariosScreen {
    ctx: AppContext,
    pub filter: UsuarioFilter,
    pub items: Vec<User>,
    pub total: u64,
    pub is_loading: bool,
    pub notice: Option<Notice>,
}

impl UsuariosScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            filter: UsuarioFilter::default(),
            items: Vec::new(),
            total: 0,
            is_loading: false,
            notice: None,
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_rol(&mut self, rol: RolFilter) {
        self.filter.rol = rol;
    }

    pub async fn load(&mut self) -> Result<(), ActionError> {
        self.is_loading = true;
        let outcome = self.ctx.usuarios.list(&self.filter).await;
        self.is_loading = false;

        match outcome {
            Ok(page) => {
                self.total = page.total;
                self.items = page.data;
                Ok(())
            }
            Err(e) => {
                let err = self.ctx.failure("Error al cargar los usuarios", e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }

    /// Loaded users that match the current filter.
    pub fn visible(&self) -> Vec<&User> {
        self.items.iter().filter(|u| self.filter.matches(u)).collect()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.visible().is_empty() || self.is_loading {
            return None;
        }
        Some(if self.filter.is_active() {
            "No se encontraron usuarios con los filtros aplicados"
        } else {
            "No hay usuarios registrados"
        })
    }

    /// Whether create/edit/toggle controls are shown.
    pub fn can_manage(&self) -> bool {
        self.ctx.can(GatedAction::CrearUsuario)
    }

    pub fn open_nuevo(&mut self) -> Result<UsuarioFormScreen, ActionError> {
        UsuarioFormScreen::alta(self.ctx.clone()).inspect_err(|e| self.notice = e.notice())
    }

    pub fn open_editar(&mut self, user: &User) -> Result<UsuarioFormScreen, ActionError> {
        UsuarioFormScreen::edicion(self.ctx.clone(), user.clone())
            .inspect_err(|e| self.notice = e.notice())
    }

    /// First step of a toggle: permission check and confirmation prompt.
    pub fn request_toggle(&mut self, user: &User) -> Result<PendingToggle, ActionError> {
        self.ctx
            .guard(GatedAction::CambiarEstadoUsuario)
            .inspect_err(|e| self.notice = e.notice())?;

        let nuevo_estado = user.estado.toggled();
        let verbo = match nuevo_estado {
            EstadoUsuario::Activo => "activar",
            EstadoUsuario::Inactivo => "desactivar",
        };
        Ok(PendingToggle {
            id: user.id.clone(),
            nuevo_estado,
            prompt: format!("¿Está seguro que desea {verbo} al usuario {}?", user.nombre),
        })
    }

    /// Second step. The gate is checked again since the session may have
    /// changed while the prompt was open.
    pub async fn confirm_toggle(&mut self, pending: PendingToggle) -> Result<User, ActionError> {
        self.ctx
            .guard(GatedAction::CambiarEstadoUsuario)
            .inspect_err(|e| self.notice = e.notice())?;

        match self.ctx.usuarios.set_estado(&pending.id, pending.nuevo_estado).await {
            Ok(updated) => {
                replace_by_id(&mut self.items, updated.clone());
                self.notice = Some(Notice::success(match updated.estado {
                    EstadoUsuario::Activo => "Usuario activado correctamente",
                    EstadoUsuario::Inactivo => "Usuario desactivado correctamente",
                }));
                Ok(updated)
            }
            Err(e) => {
                let err = self.ctx.action_failure(GatedAction::CambiarEstadoUsuario, e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }

    /// Merge a user saved from the form back into the list.
    pub fn apply_saved(&mut self, saved: User) {
        if !replace_by_id(&mut self.items, saved.clone()) {
            self.items.push(saved);
            self.total += 1;
        }
    }
}
