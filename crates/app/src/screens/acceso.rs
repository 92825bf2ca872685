//! Unauthenticated screens: login and password recovery.

use spjt_auth::User;
use spjt_client::{ClientError, Credentials};

use crate::context::AppContext;
use crate::error::ActionError;
use crate::notice::Notice;
use crate::screens::form::{FieldErrors, is_blank, looks_like_email};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

pub struct LoginScreen {
    ctx: AppContext,
    pub email: String,
    pub password: String,
    pub errors: FieldErrors<LoginField>,
    pub notice: Option<Notice>,
    pub is_submitting: bool,
}

impl LoginScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            email: String::new(),
            password: String::new(),
            errors: FieldErrors::new(),
            notice: None,
            is_submitting: false,
        }
    }

    pub fn edit(&mut self, field: LoginField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
        self.errors.clear(field);
    }

    fn validate(&mut self) -> Result<Credentials, ActionError> {
        let mut errors = FieldErrors::new();
        if is_blank(&self.email) {
            errors.insert(LoginField::Email, "El email es requerido");
        } else if !looks_like_email(&self.email) {
            errors.insert(LoginField::Email, "Ingrese un email válido");
        }
        if self.password.is_empty() {
            errors.insert(LoginField::Password, "La contraseña es requerida");
        }

        self.errors = errors;
        self.errors.check()?;
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// On success the session switches to the authenticated graph.
    pub async fn submit(&mut self) -> Result<User, ActionError> {
        let credentials = self.validate()?;

        self.is_submitting = true;
        let outcome = self.ctx.auth.login(&credentials).await;
        self.is_submitting = false;

        outcome.map_err(|e| {
            let message = match &e {
                ClientError::Unauthorized => "Credenciales inválidas",
                _ => "Error al iniciar sesión",
            };
            let err = ActionError::collaborator(message, e);
            self.notice = Some(Notice::error(message));
            err
        })
    }
}

pub struct RecuperarPasswordScreen {
    ctx: AppContext,
    pub email: String,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    pub sent: bool,
}

impl RecuperarPasswordScreen {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            email: String::new(),
            error: None,
            notice: None,
            sent: false,
        }
    }

    pub fn edit_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.error = None;
    }

    pub async fn submit(&mut self) -> Result<(), ActionError> {
        if is_blank(&self.email) {
            self.error = Some("El email es requerido".to_string());
            return Err(ActionError::Validation(1));
        }
        if !looks_like_email(&self.email) {
            self.error = Some("Ingrese un email válido".to_string());
            return Err(ActionError::Validation(1));
        }

        match self.ctx.auth.recover_password(self.email.trim()).await {
            Ok(()) => {
                self.sent = true;
                self.notice = Some(Notice::success(
                    "Se enviaron las instrucciones de recuperación a su email",
                ));
                Ok(())
            }
            Err(e) => {
                let err = ActionError::collaborator("Error al solicitar la recuperación", e);
                self.notice = err.notice();
                Err(err)
            }
        }
    }
}
