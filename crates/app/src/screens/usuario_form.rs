//! Account form shared by self-registration and user administration.

use spjt_auth::{NuevoUsuario, Role, User, UsuarioUpdate};

use crate::actions::GatedAction;
use crate::context::AppContext;
use crate::error::ActionError;
use crate::notice::Notice;
use crate::screens::form::{FieldErrors, is_blank, looks_like_email};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UsuarioField {
    Nombre,
    Email,
    Password,
    Rol,
    Institucion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsuarioFormMode {
    /// Account request from the login flow. Not gated.
    Registro,
    Alta,
    Edicion(User),
}

impl UsuarioFormMode {
    fn action(&self) -> Option<GatedAction> {
        match self {
            UsuarioFormMode::Registro => None,
            UsuarioFormMode::Alta => Some(GatedAction::CrearUsuario),
            UsuarioFormMode::Edicion(_) => Some(GatedAction::EditarUsuario),
        }
    }

    fn password_required(&self) -> bool {
        !matches!(self, UsuarioFormMode::Edicion(_))
    }
}

pub struct UsuarioFormScreen {
    ctx: AppContext,
    mode: UsuarioFormMode,
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub rol: Role,
    pub institucion: String,
    pub errors: FieldErrors<UsuarioField>,
    pub notice: Option<Notice>,
    pub is_submitting: bool,
}

impl UsuarioFormScreen {
    /// Self-registration ("Crear usuario" on the login flow).
    pub fn registro(ctx: AppContext) -> Self {
        Self::with_mode(ctx, UsuarioFormMode::Registro)
    }

    pub fn alta(ctx: AppContext) -> Result<Self, ActionError> {
        ctx.guard(GatedAction::CrearUsuario)?;
        Ok(Self::with_mode(ctx, UsuarioFormMode::Alta))
    }

    pub fn edicion(ctx: AppContext, user: User) -> Result<Self, ActionError> {
        ctx.guard(GatedAction::EditarUsuario)?;
        let mut screen = Self::with_mode(ctx, UsuarioFormMode::Edicion(user.clone()));
        screen.nombre = user.nombre;
        screen.email = user.email;
        screen.rol = user.rol;
        screen.institucion = user.institucion;
        Ok(screen)
    }

    fn with_mode(ctx: AppContext, mode: UsuarioFormMode) -> Self {
        Self {
            ctx,
            mode,
            nombre: String::new(),
            email: String::new(),
            password: String::new(),
            rol: Role::Operador,
            institucion: String::new(),
            errors: FieldErrors::new(),
            notice: None,
            is_submitting: false,
        }
    }

    pub fn mode(&self) -> &UsuarioFormMode {
        &self.mode
    }

    pub fn edit(&mut self, field: UsuarioField, value: impl Into<String>) {
        let value = value.into();
        match field {
            UsuarioField::Nombre => self.nombre = value,
            UsuarioField::Email => self.email = value,
            UsuarioField::Password => self.password = value,
            UsuarioField::Rol => self.rol = Role::parse(&value),
            UsuarioField::Institucion => self.institucion = value,
        }
        self.errors.clear(field);
    }

    fn validate(&mut self) -> Result<(), ActionError> {
        let mut errors = FieldErrors::new();
        if is_blank(&self.nombre) {
            errors.insert(UsuarioField::Nombre, "El nombre es requerido");
        }
        if is_blank(&self.email) {
            errors.insert(UsuarioField::Email, "El email es requerido");
        } else if !looks_like_email(&self.email) {
            errors.insert(UsuarioField::Email, "Ingrese un email válido");
        }
        if self.password.is_empty() {
            if self.mode.password_required() {
                errors.insert(UsuarioField::Password, "La contraseña es requerida");
            }
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                UsuarioField::Password,
                "La contraseña debe tener al menos 8 caracteres",
            );
        }
        if !self.rol.is_recognized() {
            errors.insert(UsuarioField::Rol, "Seleccione un rol válido");
        }

        self.errors = errors;
        self.errors.check()
    }

    fn nuevo(&self) -> NuevoUsuario {
        NuevoUsuario {
            nombre: self.nombre.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            rol: self.rol.clone(),
            institucion: self.institucion.trim().to_string(),
        }
    }

    /// Only fields that differ from the edited user are sent.
    fn update_for(&self, original: &User) -> UsuarioUpdate {
        let changed = |new: &str, old: &str| (new.trim() != old).then(|| new.trim().to_string());
        UsuarioUpdate {
            nombre: changed(&self.nombre, &original.nombre),
            email: changed(&self.email, &original.email),
            rol: (self.rol != original.rol).then(|| self.rol.clone()),
            institucion: changed(&self.institucion, &original.institucion),
            estado: None,
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        }
    }

    pub async fn submit(&mut self) -> Result<User, ActionError> {
        if let Some(action) = self.mode.action() {
            if let Err(e) = self.ctx.guard(action) {
                self.notice = e.notice();
                return Err(e);
            }
        }
        self.validate()?;

        self.is_submitting = true;
        let outcome = match &self.mode {
            UsuarioFormMode::Registro => self.ctx.auth.register(&self.nuevo()).await,
            UsuarioFormMode::Alta => self.ctx.usuarios.create(&self.nuevo()).await,
            UsuarioFormMode::Edicion(original) => {
                let update = self.update_for(original);
                self.ctx.usuarios.update(&original.id, &update).await
            }
        };
        self.is_submitting = false;

        match outcome {
            Ok(user) => {
                self.notice = Some(Notice::success(match self.mode {
                    UsuarioFormMode::Registro => "Solicitud de cuenta enviada correctamente",
                    UsuarioFormMode::Alta => "Usuario creado correctamente",
                    UsuarioFormMode::Edicion(_) => "Usuario actualizado correctamente",
                }));
                Ok(user)
            }
            Err(e) => {
                let err = match self.mode.action() {
                    Some(action) => self.ctx.action_failure(action, e),
                    None => self.ctx.failure("Error al crear la cuenta", e),
                };
                self.notice = err.notice();
                Err(err)
            }
        }
    }
}
